// src/schema/sources.rs

use serde::Serialize;

use crate::process::utils::extract_domain;

pub const SOURCE_SEPARATOR: &str = " | ";
pub const NO_SOURCES: &str = "No especificada";

/// One piece of a formatted source list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourcePart {
    Link { href: String, text: String },
    Text(String),
}

impl SourcePart {
    pub fn text(&self) -> &str {
        match self {
            SourcePart::Link { text, .. } => text,
            SourcePart::Text(t) => t,
        }
    }
}

/// Turn the `fuentes_consultadas` cell into links and plain labels.
///
/// Lines alternate between labels and URLs. A URL takes the pending label as
/// its text, or its bare domain when there is none. A label that is not
/// followed by a URL stays plain text.
pub fn format_sources(raw: &str) -> Vec<SourcePart> {
    let normalized = raw
        .replace("\\n", "\n")
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    let mut parts = Vec::new();
    let mut pending: Option<String> = None;

    for line in normalized.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
        if line.starts_with("http") {
            let text = pending.take().unwrap_or_else(|| extract_domain(line));
            parts.push(SourcePart::Link {
                href: line.to_string(),
                text,
            });
        } else if let Some(label) = pending.replace(line.to_string()) {
            parts.push(SourcePart::Text(label));
        }
    }

    if let Some(label) = pending {
        parts.push(SourcePart::Text(label));
    }

    parts
}

/// Plain-text rendering with the fixed separator.
pub fn sources_display(parts: &[SourcePart]) -> String {
    if parts.is_empty() {
        return NO_SOURCES.to_string();
    }
    parts
        .iter()
        .map(SourcePart::text)
        .collect::<Vec<_>>()
        .join(SOURCE_SEPARATOR)
}
