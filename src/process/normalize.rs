// src/process/normalize.rs

use serde::Serialize;
use std::collections::BTreeMap;

use super::parse::Grid;
use super::utils::split_list;

pub const TOPICS_KEY: &str = "temas";
pub const TOPIC_DESCRIPTIONS_KEY: &str = "descripcionestemas";

/// One entry of a record's derived topic list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topic {
    pub name: String,
    pub description: String,
}

/// A normalized cell. `temas` turns into `Topics` once paired with its
/// descriptions; every other column stays `Text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Topics(Vec<Topic>),
}

/// A data row keyed by lower-cased header name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Text value for `key`; empty when the column is absent or holds topics.
    pub fn text(&self, key: &str) -> &str {
        match self.fields.get(key) {
            Some(Value::Text(s)) => s,
            _ => "",
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn topics(&self) -> Option<&[Topic]> {
        match self.fields.get(TOPICS_KEY) {
            Some(Value::Topics(t)) => Some(t),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), Value::Text(value.into()));
    }

    /// Consume the record, handing back the owned field map.
    pub fn into_fields(self) -> BTreeMap<String, Value> {
        self.fields
    }

    /// Pair the comma-separated `temas` with `descripcionestemas` by index.
    /// Missing descriptions become empty strings and surplus ones are dropped.
    fn annotate_topics(&mut self) {
        let names = self.text(TOPICS_KEY);
        let descriptions = self.text(TOPIC_DESCRIPTIONS_KEY);
        if names.is_empty() || descriptions.is_empty() {
            return;
        }

        let descriptions = split_list(descriptions);
        let topics: Vec<Topic> = split_list(names)
            .into_iter()
            .enumerate()
            .map(|(i, name)| Topic {
                name,
                description: descriptions.get(i).cloned().unwrap_or_default(),
            })
            .collect();

        self.fields
            .insert(TOPICS_KEY.to_string(), Value::Topics(topics));
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut r = Record::default();
        for (k, v) in iter {
            r.insert(k, v);
        }
        r
    }
}

/// Header plus records of one feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Lower-cased header names, in file order.
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn build_record(headers: &[String], row: &[String]) -> Record {
    let mut record: Record = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let v = row.get(i).map(|c| c.trim()).unwrap_or("");
            (h.clone(), v.to_string())
        })
        .collect();
    record.annotate_topics();
    record
}

/// Turn a parsed grid into keyed records, using the first row as header.
pub fn normalize(grid: &Grid) -> Table {
    let Some((header_row, rows)) = grid.split_first() else {
        return Table::default();
    };

    let headers: Vec<String> = header_row
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let records = rows.iter().map(|row| build_record(&headers, row)).collect();

    Table { headers, records }
}

/// Like [`normalize`], but drops records that carry neither a `partido` nor a
/// `frase`, which the fact-check sheet leaves behind as stray rows.
pub fn normalize_factchecks(grid: &Grid) -> Table {
    let mut table = normalize(grid);
    table
        .records
        .retain(|r| !r.text("partido").is_empty() || !r.text("frase").is_empty());
    table
}
