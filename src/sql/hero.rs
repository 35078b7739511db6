//! Hero operations for the SQLite database.
//!
//! Heroes are provisioned out-of-band (see [`crate::seed`]); the HTTP layer only reads them.

use sqlx::{Sqlite, Transaction};

use super::SqlResult;
use crate::{Hero, Power};

/// Creates a new hero and returns it with its generated id.
///
/// # Examples
/// ```no_run
/// # use superheroes::sql;
/// # async fn example(pool: sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
/// let mut tx = pool.begin().await?;
/// let hero = sql::hero::create(&mut tx, "Kamala Khan", "Ms. Marvel").await?;
/// tx.commit().await?;
/// assert_eq!(hero.super_name, "Ms. Marvel");
/// # Ok(())
/// # }
/// ```
pub async fn create(
    tx: &mut Transaction<'_, Sqlite>,
    name: &str,
    super_name: &str,
) -> SqlResult<Hero> {
    let hero = sqlx::query_as::<_, Hero>(
        r#"
        INSERT INTO heroes (name, super_name)
        VALUES (?, ?)
        RETURNING id, name, super_name
        "#,
    )
    .bind(name)
    .bind(super_name)
    .fetch_one(&mut **tx)
    .await?;

    Ok(hero)
}

/// Retrieves a hero by id.
///
/// # Returns
/// * `Ok(Some(Hero))` - Hero found
/// * `Ok(None)` - No hero has this id
/// * `Err(DataStoreError::Internal)` - Database error
pub async fn get(tx: &mut Transaction<'_, Sqlite>, id: i64) -> SqlResult<Option<Hero>> {
    let hero = sqlx::query_as::<_, Hero>(
        r#"
        SELECT id, name, super_name
        FROM heroes
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(hero)
}

/// Lists all heroes in storage order.
pub async fn list(tx: &mut Transaction<'_, Sqlite>) -> SqlResult<Vec<Hero>> {
    let heroes = sqlx::query_as::<_, Hero>(
        r#"
        SELECT id, name, super_name
        FROM heroes
        ORDER BY id ASC
        "#,
    )
    .fetch_all(&mut **tx)
    .await?;

    Ok(heroes)
}

/// Deletes a hero.
///
/// This will cascade delete every hero-power that references the hero.
///
/// # Returns
/// * `Ok(true)` - Hero existed and was deleted
/// * `Ok(false)` - Hero did not exist
pub async fn delete(tx: &mut Transaction<'_, Sqlite>, id: i64) -> SqlResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM heroes
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Deletes every hero (and, through the cascade, every hero-power).
pub async fn delete_all(tx: &mut Transaction<'_, Sqlite>) -> SqlResult<u64> {
    let result = sqlx::query("DELETE FROM heroes")
        .execute(&mut **tx)
        .await?;
    Ok(result.rows_affected())
}

/// Lists the distinct powers a hero has, ordered by power id.
pub async fn powers(tx: &mut Transaction<'_, Sqlite>, id: i64) -> SqlResult<Vec<Power>> {
    let powers = sqlx::query_as::<_, Power>(
        r#"
        SELECT DISTINCT p.id, p.name, p.description
        FROM powers p
        JOIN hero_powers hp ON hp.power_id = p.id
        WHERE hp.hero_id = ?
        ORDER BY p.id ASC
        "#,
    )
    .bind(id)
    .fetch_all(&mut **tx)
    .await?;

    Ok(powers)
}
