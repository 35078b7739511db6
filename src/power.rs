//! # Powers
//!
//! A power has a `name` and a `description` of at least twenty characters.  The
//! description is the only field that may change over HTTP.
//!
//! | Method | Path | Body | Response |
//! |---|---|---|---|
//! | `GET` | `/powers` | | `[{id, name, description}, ...]` |
//! | `GET` | `/powers/:id` | | `{id, name, description}` |
//! | `PATCH` | `/powers/:id` | `{description}` | `{id, name, description}` |

use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::get;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::hero::parse_id;
use crate::{ApiError, DataStoreError, sql};

/// A power as stored and as served by every power endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Power {
    /// Generated identifier.
    pub id: i64,
    /// Short name of the ability.
    pub name: String,
    /// What the ability does.
    pub description: String,
}

/// Request body of `PATCH /powers/:id`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdatePowerRequest {
    /// The replacement description.
    #[serde(default)]
    pub description: Option<String>,
}

async fn list_powers(State(pool): State<SqlitePool>) -> Result<Json<Vec<Power>>, ApiError> {
    let mut tx = pool.begin().await?;
    let powers = sql::power::list(&mut tx)
        .await
        .map_err(|e| ApiError::from_data_store("Power", e))?;
    tx.commit().await?;

    Ok(Json(powers))
}

async fn get_power(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<Power>, ApiError> {
    let id = parse_id(&id, "Power")?;

    let mut tx = pool.begin().await?;
    let power = sql::power::get(&mut tx, id)
        .await
        .map_err(|e| ApiError::from_data_store("Power", e))?
        .ok_or(ApiError::NotFound("Power"))?;
    tx.commit().await?;

    Ok(Json(power))
}

async fn update_power(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
    request: Result<Json<UpdatePowerRequest>, JsonRejection>,
) -> Result<Json<Power>, ApiError> {
    let id = parse_id(&id, "Power")?;

    let mut tx = sql::begin_write(&pool).await?;
    if sql::power::get(&mut tx, id)
        .await
        .map_err(|e| ApiError::from_data_store("Power", e))?
        .is_none()
    {
        return Err(ApiError::NotFound("Power"));
    }

    let Json(request) = request.map_err(|rejection| {
        tracing::debug!("rejected power update body: {}", rejection);
        ApiError::InvalidValue(vec![rejection.body_text()])
    })?;

    let updated = match sql::power::update_description(&mut tx, id, request.description.as_deref())
        .await
    {
        Ok(Some(power)) => power,
        Ok(None) => return Err(ApiError::NotFound("Power")),
        Err(DataStoreError::InvalidValue(err)) => {
            tracing::debug!(power_id = id, "invalid description: {}", err);
            return Err(err.into());
        }
        Err(e) => {
            tx.rollback().await?;
            return Err(ApiError::from_data_store("Power", e));
        }
    };
    tx.commit().await?;

    tracing::info!(power_id = id, "updated power description");
    Ok(Json(updated))
}

/// Creates the HTTP router for power endpoints.
pub fn create_power_router(pool: SqlitePool) -> Router {
    Router::new()
        .route("/powers", get(list_powers))
        .route("/powers/:id", get(get_power).patch(update_power))
        .with_state(pool)
}
