//! # Heroes
//!
//! A hero has a civilian `name` and a `super_name`.  Heroes are read-only over HTTP:
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | `GET` | `/heroes` | `[{id, name, super_name}, ...]` |
//! | `GET` | `/heroes/:id` | `{id, name, super_name, hero_powers: [{id, hero_id, power_id, strength, power}]}` |

use axum::Router;
use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::get;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::{ApiError, Power, Strength, sql};

/// A hero as stored, and as listed by `GET /heroes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Hero {
    /// Generated identifier.
    pub id: i64,
    /// Civilian name.
    pub name: String,
    /// Superhero alias.
    pub super_name: String,
}

/// One of a hero's powers as shown by `GET /heroes/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroPowerEntry {
    /// Identifier of the hero-power row.
    pub id: i64,
    /// The hero this entry belongs to.
    pub hero_id: i64,
    /// The power's identifier.
    pub power_id: i64,
    /// How strong the hero is at the power.
    pub strength: Strength,
    /// The power itself.
    pub power: Power,
}

/// Response body of `GET /heroes/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroDetail {
    /// Generated identifier.
    pub id: i64,
    /// Civilian name.
    pub name: String,
    /// Superhero alias.
    pub super_name: String,
    /// Every hero-power of this hero, with its power expanded.
    pub hero_powers: Vec<HeroPowerEntry>,
}

/// Parses a path id; ids that are not integers cannot match any row.
pub(crate) fn parse_id(raw: &str, entity: &'static str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound(entity))
}

async fn list_heroes(State(pool): State<SqlitePool>) -> Result<Json<Vec<Hero>>, ApiError> {
    let mut tx = pool.begin().await?;
    let heroes = sql::hero::list(&mut tx)
        .await
        .map_err(|e| ApiError::from_data_store("Hero", e))?;
    tx.commit().await?;

    Ok(Json(heroes))
}

async fn get_hero(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<HeroDetail>, ApiError> {
    let id = parse_id(&id, "Hero")?;

    let mut tx = pool.begin().await?;
    let hero = sql::hero::get(&mut tx, id)
        .await
        .map_err(|e| ApiError::from_data_store("Hero", e))?
        .ok_or(ApiError::NotFound("Hero"))?;
    let hero_powers = sql::hero_power::list_for_hero(&mut tx, id)
        .await
        .map_err(|e| ApiError::from_data_store("HeroPower", e))?;
    tx.commit().await?;

    let hero_powers = hero_powers
        .into_iter()
        .map(|(hero_power, power)| HeroPowerEntry {
            id: hero_power.id,
            hero_id: hero_power.hero_id,
            power_id: hero_power.power_id,
            strength: hero_power.strength,
            power,
        })
        .collect();

    Ok(Json(HeroDetail {
        id: hero.id,
        name: hero.name,
        super_name: hero.super_name,
        hero_powers,
    }))
}

/// Creates the HTTP router for hero endpoints.
pub fn create_hero_router(pool: SqlitePool) -> Router {
    Router::new()
        .route("/heroes", get(list_heroes))
        .route("/heroes/:id", get(get_hero))
        .with_state(pool)
}
