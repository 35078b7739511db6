//! Hero-power operations for the SQLite database.
//!
//! A hero-power is the join row between one hero and one power.  Both foreign keys carry
//! `ON DELETE CASCADE`, so these rows disappear with either parent.

use sqlx::{FromRow, Sqlite, Transaction};

use super::SqlResult;
use crate::{DataStoreError, Hero, HeroPower, NewHeroPower, Power, validate_strength};

#[derive(FromRow)]
struct HeroPowerRow {
    id: i64,
    strength: String,
    hero_id: i64,
    power_id: i64,
}

impl TryFrom<HeroPowerRow> for HeroPower {
    type Error = DataStoreError;

    fn try_from(row: HeroPowerRow) -> Result<Self, Self::Error> {
        let strength = validate_strength(&row.strength).map_err(|_| {
            DataStoreError::Internal(format!(
                "hero_power {} has invalid strength {:?}",
                row.id, row.strength
            ))
        })?;
        Ok(HeroPower {
            id: row.id,
            strength,
            hero_id: row.hero_id,
            power_id: row.power_id,
        })
    }
}

#[derive(FromRow)]
struct HeroPowerWithPowerRow {
    #[sqlx(flatten)]
    hero_power: HeroPowerRow,
    power_name: String,
    power_description: String,
}

#[derive(FromRow)]
struct HeroPowerWithHeroRow {
    #[sqlx(flatten)]
    hero_power: HeroPowerRow,
    hero_name: String,
    hero_super_name: String,
}

/// Creates a new hero-power from validated input.
///
/// # Returns
/// * `Ok(HeroPower)` - Row created with a fresh id
/// * `Err(DataStoreError::IntegrityViolation)` - A referenced hero or power does not exist
pub async fn create(tx: &mut Transaction<'_, Sqlite>, new: &NewHeroPower) -> SqlResult<HeroPower> {
    let row = sqlx::query_as::<_, HeroPowerRow>(
        r#"
        INSERT INTO hero_powers (strength, hero_id, power_id)
        VALUES (?, ?, ?)
        RETURNING id, strength, hero_id, power_id
        "#,
    )
    .bind(new.strength.as_str())
    .bind(new.hero_id)
    .bind(new.power_id)
    .fetch_one(&mut **tx)
    .await?;

    row.try_into()
}

/// Retrieves a hero-power by id.
pub async fn get(tx: &mut Transaction<'_, Sqlite>, id: i64) -> SqlResult<Option<HeroPower>> {
    let row = sqlx::query_as::<_, HeroPowerRow>(
        r#"
        SELECT id, strength, hero_id, power_id
        FROM hero_powers
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    row.map(HeroPower::try_from).transpose()
}

/// Lists a hero's hero-powers, each paired with its power, in storage order.
pub async fn list_for_hero(
    tx: &mut Transaction<'_, Sqlite>,
    hero_id: i64,
) -> SqlResult<Vec<(HeroPower, Power)>> {
    let rows = sqlx::query_as::<_, HeroPowerWithPowerRow>(
        r#"
        SELECT hp.id, hp.strength, hp.hero_id, hp.power_id,
               p.name AS power_name, p.description AS power_description
        FROM hero_powers hp
        JOIN powers p ON p.id = hp.power_id
        WHERE hp.hero_id = ?
        ORDER BY hp.id ASC
        "#,
    )
    .bind(hero_id)
    .fetch_all(&mut **tx)
    .await?;

    rows.into_iter()
        .map(|row| -> SqlResult<(HeroPower, Power)> {
            let power = Power {
                id: row.hero_power.power_id,
                name: row.power_name,
                description: row.power_description,
            };
            Ok((HeroPower::try_from(row.hero_power)?, power))
        })
        .collect()
}

/// Lists a power's hero-powers, each paired with its hero, in storage order.
pub async fn list_for_power(
    tx: &mut Transaction<'_, Sqlite>,
    power_id: i64,
) -> SqlResult<Vec<(HeroPower, Hero)>> {
    let rows = sqlx::query_as::<_, HeroPowerWithHeroRow>(
        r#"
        SELECT hp.id, hp.strength, hp.hero_id, hp.power_id,
               h.name AS hero_name, h.super_name AS hero_super_name
        FROM hero_powers hp
        JOIN heroes h ON h.id = hp.hero_id
        WHERE hp.power_id = ?
        ORDER BY hp.id ASC
        "#,
    )
    .bind(power_id)
    .fetch_all(&mut **tx)
    .await?;

    rows.into_iter()
        .map(|row| -> SqlResult<(HeroPower, Hero)> {
            let hero = Hero {
                id: row.hero_power.hero_id,
                name: row.hero_name,
                super_name: row.hero_super_name,
            };
            Ok((HeroPower::try_from(row.hero_power)?, hero))
        })
        .collect()
}

/// Deletes every hero-power.
pub async fn delete_all(tx: &mut Transaction<'_, Sqlite>) -> SqlResult<u64> {
    let result = sqlx::query("DELETE FROM hero_powers")
        .execute(&mut **tx)
        .await?;
    Ok(result.rows_affected())
}
