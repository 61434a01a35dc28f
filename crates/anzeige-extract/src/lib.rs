//! Best-effort extraction of incident date, time and location from
//! notification content (plain text or HTML).
//!
//! Nothing in here fails on bad input: a field that cannot be found is
//! `None`, and malformed HTML is treated as plain text.

pub mod dates;
pub mod error;
pub mod extractor;
pub mod html;
pub mod location;
pub mod text;
pub mod times;

pub use dates::extract_date;
pub use error::ExtractError;
pub use extractor::{ContentExtractor, ExtractorConfig, DEFAULT_KNOWN_LOCATIONS};
pub use html::normalize;
pub use location::extract_location;
pub use times::extract_time;
