// src/schema/types.rs

use serde::Serialize;
use std::collections::BTreeMap;

use super::sources::{format_sources, SourcePart};
use super::verdict::VerdictClass;
use crate::process::{utils::bullet_lines, Record, Topic, Value};

/// `tipo` discriminant of the primary sheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Kind {
    Partido,
    Candidato,
    Other(String),
}

impl Kind {
    /// Exact match, the sheet uses lower-case values.
    pub fn parse(s: &str) -> Self {
        match s {
            "partido" => Kind::Partido,
            "candidato" => Kind::Candidato,
            other => Kind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Kind::Partido => "partido",
            Kind::Candidato => "candidato",
            Kind::Other(s) => s,
        }
    }
}

/// Pull a known column out of the field map, leaving the rest as passthrough.
fn take_text(fields: &mut BTreeMap<String, Value>, key: &str) -> String {
    match fields.remove(key) {
        Some(Value::Text(s)) => s,
        _ => String::new(),
    }
}

fn into_extra(fields: BTreeMap<String, Value>) -> BTreeMap<String, String> {
    fields
        .into_iter()
        .filter_map(|(k, v)| match v {
            Value::Text(s) => Some((k, s)),
            Value::Topics(_) => None,
        })
        .collect()
}

/// A party or candidate row of the primary sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub id: String,
    pub kind: Kind,
    pub nombre: String,
    pub candidato: String,
    pub foto_url: String,
    pub logo_url: String,
    pub plan_url: String,
    pub vicepresidentes: String,
    pub edad: String,
    pub ubicacion: String,
    pub vision: String,
    /// Paired topics; `None` when the row lacks topics or descriptions.
    pub topics: Option<Vec<Topic>>,
    /// Raw `temas` text when it was not turned into topics.
    pub temas_raw: String,
    /// Unrecognized columns, verbatim.
    pub extra: BTreeMap<String, String>,
}

impl Profile {
    pub fn from_record(record: Record) -> Self {
        let mut f = record.into_fields();
        let (topics, temas_raw) = match f.remove("temas") {
            Some(Value::Topics(t)) => (Some(t), String::new()),
            Some(Value::Text(s)) => (None, s),
            None => (None, String::new()),
        };

        Profile {
            id: take_text(&mut f, "id"),
            kind: Kind::parse(&take_text(&mut f, "tipo")),
            nombre: take_text(&mut f, "nombre"),
            candidato: take_text(&mut f, "candidato"),
            foto_url: take_text(&mut f, "fotourl"),
            logo_url: take_text(&mut f, "logourl"),
            plan_url: take_text(&mut f, "planurl"),
            vicepresidentes: take_text(&mut f, "vicepresidentes"),
            edad: take_text(&mut f, "edad"),
            ubicacion: take_text(&mut f, "ubicacion"),
            vision: take_text(&mut f, "vision"),
            topics,
            temas_raw,
            extra: into_extra(f),
        }
    }

    /// Passthrough column, empty when absent.
    pub fn extra(&self, key: &str) -> &str {
        self.extra.get(key).map(String::as_str).unwrap_or("")
    }

    /// Name of the party a candidate runs for: `nombrepartido`, then
    /// `partido`, then the row's own `nombre`.
    pub fn party_name(&self) -> &str {
        [self.extra("nombrepartido"), self.extra("partido")]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or(self.nombre.as_str())
    }
}

/// One (party, theme) row of the comparison sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Proposal {
    pub partido_id: String,
    pub tema: String,
    pub propuestas: Vec<String>,
    pub titulo: String,
    pub tono_discursivo: String,
    pub coherencia: String,
    pub extra: BTreeMap<String, String>,
}

impl Proposal {
    pub fn from_record(record: Record) -> Self {
        let mut f = record.into_fields();
        Proposal {
            partido_id: take_text(&mut f, "partidoid"),
            tema: take_text(&mut f, "tema"),
            propuestas: bullet_lines(&take_text(&mut f, "propuestas")),
            titulo: take_text(&mut f, "titulopropuesta"),
            tono_discursivo: take_text(&mut f, "tonodiscursivo"),
            coherencia: take_text(&mut f, "coherencia"),
            extra: into_extra(f),
        }
    }

    pub fn has_discourse(&self) -> bool {
        !self.tono_discursivo.is_empty() || !self.coherencia.is_empty()
    }
}

/// A fact-checked claim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactCheck {
    pub partido: String,
    pub candidato: String,
    pub frase: String,
    pub veredicto: String,
    pub justificacion: String,
    pub fuentes: String,
    pub extra: BTreeMap<String, String>,
}

impl FactCheck {
    pub fn from_record(record: Record) -> Self {
        let mut f = record.into_fields();
        FactCheck {
            partido: take_text(&mut f, "partido"),
            candidato: take_text(&mut f, "candidato"),
            frase: take_text(&mut f, "frase"),
            veredicto: take_text(&mut f, "veredicto"),
            justificacion: take_text(&mut f, "justificacion"),
            fuentes: take_text(&mut f, "fuentes_consultadas"),
            extra: into_extra(f),
        }
    }

    pub fn verdict(&self) -> VerdictClass {
        VerdictClass::classify(&self.veredicto)
    }

    pub fn sources(&self) -> Vec<SourcePart> {
        format_sources(&self.fuentes)
    }

    /// Shown when the sheet cannot be fetched.
    pub fn example() -> Self {
        FactCheck {
            partido: "Ejemplo Partido".into(),
            candidato: "Candidato Ejemplo".into(),
            frase: "Propuesta de ejemplo para demostración.".into(),
            veredicto: "Indeterminado".into(),
            justificacion: "Esta es una justificación de ejemplo.".into(),
            fuentes: "Fuente Ejemplo\nhttps://ejemplo.com".into(),
            extra: BTreeMap::new(),
        }
    }
}
