use anzeige_core::NewLocation;
use sqlx::PgPool;

use super::read::fetch_location_by_name;
use super::write::{insert_location, validate_new_location};
use crate::DbError;

/// Counts reported by [`import_locations`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub skipped: usize,
}

/// Load catalog entries, skipping any whose name already exists
/// (case-insensitively), including names inserted earlier in the same batch.
///
/// All inserts run inside a single transaction; if any operation fails the
/// entire batch is rolled back.
///
/// # Errors
///
/// Returns [`DbError::InvalidInput`] if an entry has a blank name, city, or
/// state (nothing is written), or [`DbError::Sqlx`] if any database
/// operation fails.
pub async fn import_locations(
    pool: &PgPool,
    entries: &[NewLocation],
) -> Result<ImportSummary, DbError> {
    for entry in entries {
        validate_new_location(entry)?;
    }

    let mut tx = pool.begin().await?;
    let mut summary = ImportSummary::default();

    for entry in entries {
        if let Some(existing) = fetch_location_by_name(&mut *tx, &entry.name).await? {
            tracing::debug!(
                name = %entry.name,
                location_id = existing.id,
                "location already present, skipping"
            );
            summary.skipped += 1;
            continue;
        }
        insert_location(&mut *tx, entry).await?;
        summary.inserted += 1;
    }

    tx.commit().await?;
    tracing::info!(
        inserted = summary.inserted,
        skipped = summary.skipped,
        "location catalog imported"
    );
    Ok(summary)
}
