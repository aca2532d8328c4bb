// src/query/density.rs

use serde::Serialize;

use crate::config::{Theme, THEMES};
use crate::schema::DensityEntry;

/// One theme's share of a party's bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub theme_id: &'static str,
    /// Share of the bar width, 0 to 100.
    pub width: f64,
    pub selected: bool,
}

/// A party's stacked bar plus the raw figure for the selected theme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityBar<'a> {
    pub party: &'a DensityEntry,
    pub segments: Vec<Segment>,
    pub selected_percentage: f64,
}

/// Segments are normalized against the party's total over the theme
/// catalogue; a party with no mentions gets zero-width segments.
pub fn density_bar<'a>(party: &'a DensityEntry, selected: &Theme) -> DensityBar<'a> {
    let total: f64 = THEMES.iter().map(|t| party.percentage(t.id)).sum();
    let segments = THEMES
        .iter()
        .map(|t| Segment {
            theme_id: t.id,
            width: if total > 0.0 {
                party.percentage(t.id) / total * 100.0
            } else {
                0.0
            },
            selected: t.id == selected.id,
        })
        .collect();

    DensityBar {
        party,
        segments,
        selected_percentage: party.percentage(selected.id),
    }
}

/// Bars for every party in document order, or only `party_filter` when set.
pub fn density_bars<'a>(
    entries: &'a [DensityEntry],
    selected: &Theme,
    party_filter: Option<&str>,
) -> Vec<DensityBar<'a>> {
    entries
        .iter()
        .filter(|e| party_filter.map_or(true, |id| e.id == id))
        .map(|e| density_bar(e, selected))
        .collect()
}

/// Theme index under a slider position, `fraction` in 0..=1.
pub fn theme_index_at(fraction: f64) -> usize {
    let last = THEMES.len() - 1;
    let f = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    ((f * last as f64).round() as usize).min(last)
}
