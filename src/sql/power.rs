//! Power operations for the SQLite database.
//!
//! Descriptions are validated with [`crate::validate_description`] before every insert and
//! update, so a row with a short or blank description never reaches storage.

use sqlx::{Sqlite, Transaction};

use super::SqlResult;
use crate::{Hero, Power, validate_description};

/// Creates a new power and returns it with its generated id.
///
/// # Returns
/// * `Ok(Power)` - Power created; `description` is stored trimmed
/// * `Err(DataStoreError::InvalidValue)` - The description failed validation
pub async fn create(
    tx: &mut Transaction<'_, Sqlite>,
    name: &str,
    description: &str,
) -> SqlResult<Power> {
    let description = validate_description(Some(description))?;

    let power = sqlx::query_as::<_, Power>(
        r#"
        INSERT INTO powers (name, description)
        VALUES (?, ?)
        RETURNING id, name, description
        "#,
    )
    .bind(name)
    .bind(description)
    .fetch_one(&mut **tx)
    .await?;

    Ok(power)
}

/// Retrieves a power by id.
pub async fn get(tx: &mut Transaction<'_, Sqlite>, id: i64) -> SqlResult<Option<Power>> {
    let power = sqlx::query_as::<_, Power>(
        r#"
        SELECT id, name, description
        FROM powers
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(power)
}

/// Lists all powers in storage order.
pub async fn list(tx: &mut Transaction<'_, Sqlite>) -> SqlResult<Vec<Power>> {
    let powers = sqlx::query_as::<_, Power>(
        r#"
        SELECT id, name, description
        FROM powers
        ORDER BY id ASC
        "#,
    )
    .fetch_all(&mut **tx)
    .await?;

    Ok(powers)
}

/// Replaces the description of a power.
///
/// The description is validated first; nothing is written when it fails.
///
/// # Returns
/// * `Ok(Some(Power))` - The updated power
/// * `Ok(None)` - No power has this id
/// * `Err(DataStoreError::InvalidValue)` - The description failed validation
pub async fn update_description(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
    description: Option<&str>,
) -> SqlResult<Option<Power>> {
    let description = validate_description(description)?;

    let power = sqlx::query_as::<_, Power>(
        r#"
        UPDATE powers
        SET description = ?
        WHERE id = ?
        RETURNING id, name, description
        "#,
    )
    .bind(description)
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(power)
}

/// Deletes a power.
///
/// This will cascade delete every hero-power that references the power.
pub async fn delete(tx: &mut Transaction<'_, Sqlite>, id: i64) -> SqlResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM powers
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Deletes every power (and, through the cascade, every hero-power).
pub async fn delete_all(tx: &mut Transaction<'_, Sqlite>) -> SqlResult<u64> {
    let result = sqlx::query("DELETE FROM powers")
        .execute(&mut **tx)
        .await?;
    Ok(result.rows_affected())
}

/// Lists the distinct heroes that have a power, ordered by hero id.
pub async fn heroes(tx: &mut Transaction<'_, Sqlite>, id: i64) -> SqlResult<Vec<Hero>> {
    let heroes = sqlx::query_as::<_, Hero>(
        r#"
        SELECT DISTINCT h.id, h.name, h.super_name
        FROM heroes h
        JOIN hero_powers hp ON hp.hero_id = h.id
        WHERE hp.power_id = ?
        ORDER BY h.id ASC
        "#,
    )
    .bind(id)
    .fetch_all(&mut **tx)
    .await?;

    Ok(heroes)
}
