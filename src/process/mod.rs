// src/process/mod.rs
//! CSV ingestion: raw text → cell grid → keyed records.

pub mod normalize;
pub mod parse;
pub mod utils;

pub use normalize::{normalize, normalize_factchecks, Record, Table, Topic, Value};
pub use parse::{parse, parse_line, Grid};

use tracing::debug;

/// Parse a profile or comparison sheet export.
pub fn load_table(csv_text: &str) -> Table {
    let grid = parse(csv_text);
    let table = normalize(&grid);
    debug!(
        rows = grid.len(),
        records = table.len(),
        columns = table.headers.len(),
        "normalized table"
    );
    table
}

/// Parse the fact-check sheet export.
pub fn load_factcheck_table(csv_text: &str) -> Table {
    let grid = parse(csv_text);
    let table = normalize_factchecks(&grid);
    debug!(
        rows = grid.len(),
        records = table.len(),
        "normalized fact-check table"
    );
    table
}
