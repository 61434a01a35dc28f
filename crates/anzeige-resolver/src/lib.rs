//! Location resolution for incident intake.
//!
//! Maps a free-text location name onto the location catalog: exact
//! case-insensitive match first, then Ratcliff/Obershelp fuzzy match, and
//! finally a placeholder stub entry when nothing clears the threshold.

pub mod catalog;
pub mod error;
pub mod resolver;
pub mod similarity;

pub use catalog::{get_or_create, LocationCatalog, MemoryCatalog, ResolveOutcome, Resolved};
pub use error::ResolveError;
pub use resolver::{
    find_by_fuzzy_name, get_by_exact_name, normalized_name, resolve, FuzzyMatch, Resolution,
    ResolverConfig, DEFAULT_FUZZY_THRESHOLD,
};
pub use similarity::similarity;
