// src/query/mod.rs

pub mod collate;
pub mod compare;
pub mod density;
pub mod factcheck;
pub mod search;

pub use collate::{sort_spanish, spanish_cmp, CollationKey};
pub use compare::{Cell, ComparisonSlots};
pub use density::{density_bar, density_bars, theme_index_at, DensityBar, Segment};
pub use factcheck::{facet_values, filter_factchecks, FactCheckFilter, FilterMode, Pager};
pub use search::{autocomplete, filter_profiles, highlight_spans, Suggestion};
