//! Write operations for the `locations` table.

use anzeige_core::{LocationUpdate, NewLocation};
use sqlx::{PgExecutor, PgPool};

use super::types::LocationRow;
use crate::DbError;

/// Insert a location and return the stored row.
///
/// The name is trimmed before storing so case-insensitive lookups match it.
///
/// # Errors
///
/// Returns [`DbError::InvalidInput`] if the name, city, or state is blank,
/// or [`DbError::Sqlx`] if the insert fails.
pub async fn create_location(pool: &PgPool, new: &NewLocation) -> Result<LocationRow, DbError> {
    validate_new_location(new)?;
    let row = insert_location(pool, new).await?;
    tracing::debug!(location_id = row.id, name = %row.name, "location created");
    Ok(row)
}

/// Apply a partial update. Fields left `None` keep their stored value.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row has `id`,
/// [`DbError::InvalidInput`] if the update blanks a required field, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn update_location(
    pool: &PgPool,
    id: i64,
    update: &LocationUpdate,
) -> Result<LocationRow, DbError> {
    for (field, value) in [
        ("name", &update.name),
        ("city", &update.city),
        ("state", &update.state),
    ] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(DbError::InvalidInput(format!("{field} must not be empty")));
        }
    }

    sqlx::query_as::<_, LocationRow>(
        "UPDATE locations SET \
             name        = COALESCE($2, name), \
             city        = COALESCE($3, city), \
             state       = COALESCE($4, state), \
             postal_code = COALESCE($5, postal_code), \
             address     = COALESCE($6, address), \
             updated_at  = NOW() \
         WHERE id = $1 \
         RETURNING id, public_id, name, city, state, postal_code, address, \
                   created_at, updated_at",
    )
    .bind(id)
    .bind(update.name.as_deref().map(str::trim))
    .bind(update.city.as_deref())
    .bind(update.state.as_deref())
    .bind(update.postal_code.as_deref())
    .bind(update.address.as_deref())
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)
}

/// Delete a location by primary key.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row has `id`, or [`DbError::Sqlx`] if
/// the query fails.
pub async fn delete_location(pool: &PgPool, id: i64) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM locations WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    tracing::debug!(location_id = id, "location deleted");
    Ok(())
}

pub(super) fn validate_new_location(new: &NewLocation) -> Result<(), DbError> {
    for (field, value) in [("name", &new.name), ("city", &new.city), ("state", &new.state)] {
        if value.trim().is_empty() {
            return Err(DbError::InvalidInput(format!("{field} must not be empty")));
        }
    }
    Ok(())
}

pub(super) async fn insert_location<'e, E>(
    executor: E,
    new: &NewLocation,
) -> Result<LocationRow, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, LocationRow>(
        "INSERT INTO locations (name, city, state, postal_code, address) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, public_id, name, city, state, postal_code, address, \
                   created_at, updated_at",
    )
    .bind(new.name.trim())
    .bind(&new.city)
    .bind(&new.state)
    .bind(&new.postal_code)
    .bind(&new.address)
    .fetch_one(executor)
    .await
}
