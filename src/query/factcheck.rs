// src/query/factcheck.rs

use serde::Serialize;

use super::collate::sort_spanish;
use crate::schema::{FactCheck, VerdictClass};

pub const ITEMS_DESKTOP: usize = 8;
pub const ITEMS_MOBILE: usize = 3;
/// Viewports at most this wide use the mobile page size.
pub const MOBILE_BREAKPOINT: u32 = 768;

/// Which dropdown drives the fact-check list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    Partido,
    Candidato,
    Veredicto,
}

/// Current dropdown selection. An empty value selects everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactCheckFilter {
    pub mode: FilterMode,
    pub value: String,
}

impl FactCheckFilter {
    pub fn new(mode: FilterMode, value: impl Into<String>) -> Self {
        Self {
            mode,
            value: value.into(),
        }
    }

    pub fn all(mode: FilterMode) -> Self {
        Self::new(mode, "")
    }

    /// Party and candidate compare case-insensitively for equality; the
    /// verdict mode compares the classified category key.
    pub fn matches(&self, item: &FactCheck) -> bool {
        if self.value.is_empty() {
            return true;
        }
        match self.mode {
            FilterMode::Partido => item.partido.to_lowercase() == self.value.to_lowercase(),
            FilterMode::Candidato => item.candidato.to_lowercase() == self.value.to_lowercase(),
            FilterMode::Veredicto => item.verdict().key() == self.value,
        }
    }
}

pub fn filter_factchecks<'a>(items: &'a [FactCheck], filter: &FactCheckFilter) -> Vec<&'a FactCheck> {
    items.iter().filter(|fc| filter.matches(fc)).collect()
}

/// Dropdown options for a mode: distinct non-empty values, sorted. The
/// verdict mode lists every category key.
pub fn facet_values(items: &[FactCheck], mode: FilterMode) -> Vec<String> {
    let mut values: Vec<String> = match mode {
        FilterMode::Partido => items.iter().map(|fc| fc.partido.clone()).collect(),
        FilterMode::Candidato => items.iter().map(|fc| fc.candidato.clone()).collect(),
        FilterMode::Veredicto => {
            return VerdictClass::ALL.iter().map(|v| v.key().to_string()).collect();
        }
    };
    values.retain(|v| !v.is_empty());
    sort_spanish(&mut values);
    values.dedup();
    values
}

/// "Load more" pagination over a filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    per_page: usize,
    visible: usize,
}

impl Pager {
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page,
            visible: per_page,
        }
    }

    /// Page size for a viewport of `width` CSS pixels.
    pub fn for_width(width: u32) -> Self {
        if width <= MOBILE_BREAKPOINT {
            Self::new(ITEMS_MOBILE)
        } else {
            Self::new(ITEMS_DESKTOP)
        }
    }

    /// Back to the first page, as after changing the filter.
    pub fn reset(&mut self) {
        self.visible = self.per_page;
    }

    pub fn load_more(&mut self) {
        self.visible += self.per_page;
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible.min(items.len())]
    }

    pub fn has_more(&self, total: usize) -> bool {
        total > self.visible
    }

    /// Progress line, shown only while more results remain.
    pub fn summary(&self, total: usize) -> Option<String> {
        self.has_more(total)
            .then(|| format!("Mostrando {} de {} resultados", self.visible, total))
    }
}
