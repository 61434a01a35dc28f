//! Row types for the `locations` table.

use anzeige_core::Location;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A row from the `locations` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct LocationRow {
    pub id: i64,
    pub public_id: Uuid,
    pub name: String,
    pub city: String,
    pub state: String,
    pub postal_code: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LocationRow> for Location {
    fn from(row: LocationRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            city: row.city,
            state: row.state,
            postal_code: row.postal_code,
            address: row.address,
        }
    }
}
