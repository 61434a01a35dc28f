//! Database operations for the `locations` table.

mod import;
mod read;
mod resolve;
mod types;
mod write;

pub use import::{import_locations, ImportSummary};
pub use read::{get_location, get_location_by_name, list_all_locations, list_locations};
pub use resolve::get_or_create_location;
pub use types::LocationRow;
pub use write::{create_location, delete_location, update_location};
