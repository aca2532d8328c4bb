pub mod density;
pub mod sources;
pub mod types;
pub mod verdict;

pub use density::{parse_density, DensityEntry};
pub use sources::{format_sources, sources_display, SourcePart};
pub use types::{FactCheck, Kind, Profile, Proposal};
pub use verdict::{description_for_key, VerdictClass};
