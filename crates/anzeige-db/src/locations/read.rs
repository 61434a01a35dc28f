//! Read operations for the `locations` table.

use sqlx::{PgExecutor, PgPool};

use super::types::LocationRow;

/// Fetch one location by primary key.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn get_location(pool: &PgPool, id: i64) -> Result<Option<LocationRow>, sqlx::Error> {
    sqlx::query_as::<_, LocationRow>(
        "SELECT id, public_id, name, city, state, postal_code, address, \
                created_at, updated_at \
         FROM locations \
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Fetch the first location (lowest `id`) whose name equals `name`, ignoring
/// case and surrounding whitespace.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn get_location_by_name(
    pool: &PgPool,
    name: &str,
) -> Result<Option<LocationRow>, sqlx::Error> {
    fetch_location_by_name(pool, name).await
}

/// List locations ordered by `id`, skipping `skip` rows and returning at
/// most `limit`.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_locations(
    pool: &PgPool,
    skip: u32,
    limit: u32,
) -> Result<Vec<LocationRow>, sqlx::Error> {
    sqlx::query_as::<_, LocationRow>(
        "SELECT id, public_id, name, city, state, postal_code, address, \
                created_at, updated_at \
         FROM locations \
         ORDER BY id ASC \
         OFFSET $1 LIMIT $2",
    )
    .bind(i64::from(skip))
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await
}

/// List every location ordered by `id`; this is the resolver's catalog order.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_all_locations(pool: &PgPool) -> Result<Vec<LocationRow>, sqlx::Error> {
    fetch_all_locations(pool).await
}

pub(super) async fn fetch_all_locations<'e, E>(executor: E) -> Result<Vec<LocationRow>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, LocationRow>(
        "SELECT id, public_id, name, city, state, postal_code, address, \
                created_at, updated_at \
         FROM locations \
         ORDER BY id ASC",
    )
    .fetch_all(executor)
    .await
}

pub(super) async fn fetch_location_by_name<'e, E>(
    executor: E,
    name: &str,
) -> Result<Option<LocationRow>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, LocationRow>(
        "SELECT id, public_id, name, city, state, postal_code, address, \
                created_at, updated_at \
         FROM locations \
         WHERE LOWER(name) = LOWER($1) \
         ORDER BY id ASC \
         LIMIT 1",
    )
    .bind(name.trim())
    .fetch_optional(executor)
    .await
}
