use anzeige_core::{Location, NewLocation};
use anzeige_resolver::{
    normalized_name, resolve, Resolution, ResolveOutcome, Resolved, ResolverConfig,
};
use sqlx::PgPool;

use super::read::fetch_all_locations;
use super::write::insert_location;
use crate::DbError;

/// Resolve `name` against the stored catalog, inserting a stub location when
/// neither an exact nor a fuzzy match exists.
///
/// Runs in one transaction holding an advisory lock keyed on the normalized
/// name, so concurrent callers with the same unmatched name create exactly
/// one stub: the second caller waits, then sees the first caller's row as an
/// exact match.
///
/// # Errors
///
/// Returns [`DbError::Resolve`] for a blank name or an out-of-range
/// threshold (nothing is written), or [`DbError::Sqlx`] if any database
/// operation fails.
pub async fn get_or_create_location(
    pool: &PgPool,
    name: &str,
    config: &ResolverConfig,
) -> Result<Resolved, DbError> {
    let key = normalized_name(name)?;

    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(&key)
        .execute(&mut *tx)
        .await?;

    let catalog: Vec<Location> = fetch_all_locations(&mut *tx)
        .await?
        .into_iter()
        .map(Location::from)
        .collect();

    let resolved = match resolve(&catalog, name, config)? {
        Resolution::Exact(location) => Resolved {
            location,
            outcome: ResolveOutcome::Exact,
        },
        Resolution::Fuzzy { location, score } => Resolved {
            location,
            outcome: ResolveOutcome::Fuzzy { score },
        },
        Resolution::NotFound => {
            let stub = NewLocation::stub(name, &config.stub_placeholder);
            let row = insert_location(&mut *tx, &stub).await?;
            tracing::info!(
                name = %row.name,
                location_id = row.id,
                "created stub location"
            );
            Resolved {
                location: row.into(),
                outcome: ResolveOutcome::Created,
            }
        }
    };

    tx.commit().await?;
    Ok(resolved)
}
