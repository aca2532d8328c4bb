// src/schema/density.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Party ids arrive either as JSON strings or numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawParty {
    id: RawId,
    #[serde(default)]
    nombre: Option<String>,
    #[serde(rename = "logoUrl", default)]
    logo_url: Option<String>,
    /// Non-numeric percentages (null, text) are dropped and read as zero.
    #[serde(default)]
    densidad: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    partidos: Vec<RawParty>,
}

/// Topic emphasis of one party, in percent per theme id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityEntry {
    pub id: String,
    pub nombre: String,
    pub logo_url: String,
    pub densidad: BTreeMap<String, f64>,
}

impl DensityEntry {
    /// Percentage for `theme_id`, zero when the party does not mention it.
    pub fn percentage(&self, theme_id: &str) -> f64 {
        self.densidad.get(theme_id).copied().unwrap_or(0.0)
    }

    /// Stand-in dataset used when the density document cannot be loaded.
    pub fn placeholder() -> Self {
        DensityEntry {
            id: "1".into(),
            nombre: "Partido Ejemplo".into(),
            logo_url: String::new(),
            densidad: [("educacion", 15.0), ("salud", 25.0), ("economia", 20.0)]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }
}

/// Parse the density JSON document. Entries keep document order; a repeated
/// id replaces the earlier entry in place.
pub fn parse_density(json: &str) -> Result<Vec<DensityEntry>> {
    let doc: RawDocument = serde_json::from_str(json).context("parsing density document")?;

    let mut out: Vec<DensityEntry> = Vec::with_capacity(doc.partidos.len());
    for p in doc.partidos {
        let entry = DensityEntry {
            id: p.id.into_string(),
            nombre: p.nombre.unwrap_or_default(),
            logo_url: p.logo_url.unwrap_or_default(),
            densidad: p
                .densidad
                .into_iter()
                .filter_map(|(k, v)| v.as_f64().map(|n| (k, n)))
                .collect(),
        };
        match out.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => out.push(entry),
        }
    }
    Ok(out)
}
