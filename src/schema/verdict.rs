// src/schema/verdict.rs

use serde::Serialize;

/// Canonical fact-check verdict categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum VerdictClass {
    Factible,
    Inviable,
    SinSustento,
    Enganosa,
    NoEnSusManos,
    Indeterminado,
}

impl VerdictClass {
    pub const ALL: [VerdictClass; 6] = [
        VerdictClass::Factible,
        VerdictClass::Inviable,
        VerdictClass::SinSustento,
        VerdictClass::Enganosa,
        VerdictClass::NoEnSusManos,
        VerdictClass::Indeterminado,
    ];

    /// Map free-text verdict to a category. Rules are ordered, first match wins.
    ///
    /// The `sin` and `no` rules are plain substring tests, so e.g. "nominal"
    /// lands in `NoEnSusManos`.
    pub fn classify(raw: &str) -> Self {
        let v = raw.trim().to_lowercase();
        if v.is_empty() {
            return VerdictClass::Indeterminado;
        }
        if v == "factible" {
            VerdictClass::Factible
        } else if v == "inviable" {
            VerdictClass::Inviable
        } else if v.contains("sin") {
            VerdictClass::SinSustento
        } else if v.contains("enga") {
            VerdictClass::Enganosa
        } else if v.contains("no") {
            VerdictClass::NoEnSusManos
        } else {
            VerdictClass::Indeterminado
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            VerdictClass::Factible => "FACTIBLE",
            VerdictClass::Inviable => "INVIABLE",
            VerdictClass::SinSustento => "SIN SUSTENTO",
            VerdictClass::Enganosa => "ENGAÑOSA",
            VerdictClass::NoEnSusManos => "no está en sus manos",
            VerdictClass::Indeterminado => "INDETERMINADO",
        }
    }

    /// Stable key, also used as the verdict filter value.
    pub fn key(&self) -> &'static str {
        match self {
            VerdictClass::Factible => "factible",
            VerdictClass::Inviable => "inviable",
            VerdictClass::SinSustento => "sin_sustento",
            VerdictClass::Enganosa => "enganosa",
            VerdictClass::NoEnSusManos => "no_en_sus_manos",
            VerdictClass::Indeterminado => "indeterminado",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    pub fn description(&self) -> &'static str {
        description_for_key(self.key())
    }
}

/// Explanatory text for a verdict key; empty for unknown keys.
pub fn description_for_key(key: &str) -> &'static str {
    match key {
        "factible" => "Propuesta que puede ejecutarse de manera factible durante una gestión.",
        "inviable" => "Propuesta que no puede ejecutarse dentro de una gestión o que contraviene la normativa vigente.",
        "no_en_sus_manos" => "Propuesta cuyo desarrollo o cumplimiento no depende exclusivamente del Ejecutivo, sino que requiere la acción de otros poderes del Estado.",
        "inexacta" => "Compromiso que no presenta información concreta ni criterios medibles para su desarrollo o evaluación.",
        "enganosa" => "Propuesta que incluye metas o cifras concretas, pero que sobredimensiona las capacidades reales del Ejecutivo, usa plazos o alcances irrealistas o presenta resultados que no son exigibles ni creíbles dadas las restricciones técnicas, presupuestales o institucionales.",
        "sin_sustento" => "No se cuenta con información suficiente para determinar la viabilidad de esta propuesta.",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_matches_ignore_case() {
        assert_eq!(VerdictClass::classify("Factible"), VerdictClass::Factible);
        assert_eq!(VerdictClass::classify(" INVIABLE "), VerdictClass::Inviable);
    }

    #[test]
    fn test_enganosa_with_and_without_tilde() {
        assert_eq!(VerdictClass::classify("Engañosa"), VerdictClass::Enganosa);
        assert_eq!(VerdictClass::classify("enganosa"), VerdictClass::Enganosa);
    }

    #[test]
    fn test_unrecognized_is_indeterminado() {
        assert_eq!(VerdictClass::classify("Verdadero"), VerdictClass::Indeterminado);
        assert_eq!(VerdictClass::classify(""), VerdictClass::Indeterminado);
        assert_eq!(VerdictClass::classify("   "), VerdictClass::Indeterminado);
    }

    #[test]
    fn test_sin_rule_is_a_single_substring_check() {
        // Any text containing "sin" lands here, not only "sin sustento".
        assert_eq!(VerdictClass::classify("Sin sustento"), VerdictClass::SinSustento);
        assert_eq!(VerdictClass::classify("sinceramente"), VerdictClass::SinSustento);
        assert_eq!(VerdictClass::classify("sustento"), VerdictClass::Indeterminado);
    }

    #[test]
    fn test_no_rule_over_matches() {
        assert_eq!(
            VerdictClass::classify("No está en sus manos"),
            VerdictClass::NoEnSusManos
        );
        // "no" inside an unrelated word still matches.
        assert_eq!(VerdictClass::classify("Anónimo nominal"), VerdictClass::NoEnSusManos);
        // "sin" wins over "no" because it is checked first.
        assert_eq!(VerdictClass::classify("no sin"), VerdictClass::SinSustento);
    }

    #[test]
    fn test_descriptions() {
        assert!(VerdictClass::Factible.description().starts_with("Propuesta que puede"));
        assert_eq!(VerdictClass::Indeterminado.description(), "");
        assert_ne!(description_for_key("inexacta"), "");
        assert_eq!(description_for_key("desconocido"), "");
    }

    #[test]
    fn test_key_round_trip() {
        for c in VerdictClass::ALL {
            assert_eq!(VerdictClass::from_key(c.key()), Some(c));
        }
        assert_eq!(VerdictClass::from_key("inexacta"), None);
    }
}
