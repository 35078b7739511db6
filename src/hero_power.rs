//! # Hero-Powers
//!
//! A hero-power records how strong one hero is at one power.  It is the only thing that
//! can be created over HTTP:
//!
//! ```text
//! POST /hero_powers {"strength": "Average", "hero_id": 1, "power_id": 2}
//!
//! 201 {"id": 7, "hero_id": 1, "power_id": 2, "strength": "Average",
//!      "hero": {"id": 1, ...}, "power": {"id": 2, ...}}
//! ```
//!
//! The request is validated before the transaction starts.  The transaction takes the
//! write lock up front (see [`sql::begin_write`]), and the referenced hero and power are then
//! looked up inside it, so a missing parent is reported as 404 before anything is written.
//! Should the insert still trip a foreign key, or the store report lock contention, the
//! transaction is rolled back and the client gets a 400.

use axum::Router;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::post;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::{ApiError, DataStoreError, Hero, Power, Strength, sql, validate_new_hero_power};

/// A hero-power as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroPower {
    /// Generated identifier.
    pub id: i64,
    /// How strong the hero is at the power.
    pub strength: Strength,
    /// The hero.
    pub hero_id: i64,
    /// The power.
    pub power_id: i64,
}

/// Request body of `POST /hero_powers`.
///
/// `strength` is kept as raw JSON so that a missing value and a value of the wrong type
/// are both reported as validation errors rather than as a body parse failure.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateHeroPowerRequest {
    /// Expected to be one of `Strong`, `Weak`, `Average`.
    #[serde(default)]
    pub strength: Option<Value>,
    /// Referenced hero.
    #[serde(default)]
    pub hero_id: Option<i64>,
    /// Referenced power.
    #[serde(default)]
    pub power_id: Option<i64>,
}

/// Response body of `POST /hero_powers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroPowerDetail {
    /// Generated identifier.
    pub id: i64,
    /// The hero.
    pub hero_id: i64,
    /// The power.
    pub power_id: i64,
    /// How strong the hero is at the power.
    pub strength: Strength,
    /// The referenced hero.
    pub hero: Hero,
    /// The referenced power.
    pub power: Power,
}

async fn create_hero_power(
    State(pool): State<SqlitePool>,
    request: Result<Json<CreateHeroPowerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<HeroPowerDetail>), ApiError> {
    let Json(request) = request.map_err(|rejection| {
        tracing::debug!("rejected hero_power body: {}", rejection);
        ApiError::InvalidValue(vec![rejection.body_text()])
    })?;

    let new = validate_new_hero_power(
        request.strength.as_ref().and_then(Value::as_str),
        request.hero_id,
        request.power_id,
    )?;

    let mut tx = sql::begin_write(&pool).await?;
    let hero = sql::hero::get(&mut tx, new.hero_id)
        .await
        .map_err(|e| ApiError::from_data_store("Hero", e))?
        .ok_or(ApiError::NotFound("Hero"))?;
    let power = sql::power::get(&mut tx, new.power_id)
        .await
        .map_err(|e| ApiError::from_data_store("Power", e))?
        .ok_or(ApiError::NotFound("Power"))?;

    let hero_power = match sql::hero_power::create(&mut tx, &new).await {
        Ok(hero_power) => hero_power,
        Err(e @ (DataStoreError::IntegrityViolation(_) | DataStoreError::Conflict(_))) => {
            tx.rollback().await?;
            return Err(ApiError::from_data_store("HeroPower", e));
        }
        Err(e) => return Err(ApiError::from_data_store("HeroPower", e)),
    };
    tx.commit().await?;

    tracing::info!(
        hero_power_id = hero_power.id,
        hero_id = hero.id,
        power_id = power.id,
        strength = %hero_power.strength,
        "created hero_power"
    );

    Ok((
        StatusCode::CREATED,
        Json(HeroPowerDetail {
            id: hero_power.id,
            hero_id: hero_power.hero_id,
            power_id: hero_power.power_id,
            strength: hero_power.strength,
            hero,
            power,
        }),
    ))
}

/// Creates the HTTP router for hero-power endpoints.
pub fn create_hero_power_router(pool: SqlitePool) -> Router {
    Router::new()
        .route("/hero_powers", post(create_hero_power))
        .with_state(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use serde_json::json;

    async fn fixture() -> (TestServer, SqlitePool, Hero, Power) {
        let pool = sql::tests::setup_test_db().await;
        let mut tx = pool.begin().await.unwrap();
        let hero = sql::hero::create(&mut tx, "Kamala Khan", "Ms. Marvel").await.unwrap();
        let power = sql::power::create(&mut tx, "elasticity", "can stretch the human body to extreme lengths")
            .await
            .unwrap();
        tx.commit().await.unwrap();
        let server = TestServer::new(create_hero_power_router(pool.clone())).unwrap();
        (server, pool, hero, power)
    }

    async fn count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM hero_powers")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_returns_nested_hero_and_power() {
        let (server, pool, hero, power) = fixture().await;

        let response = server
            .post("/hero_powers")
            .json(&json!({"strength": "Strong", "hero_id": hero.id, "power_id": power.id}))
            .await;
        response.assert_status(StatusCode::CREATED);

        let created: HeroPowerDetail = response.json();
        assert_eq!(created.strength, Strength::Strong);
        assert_eq!(created.hero_id, hero.id);
        assert_eq!(created.power_id, power.id);
        assert_eq!(created.hero, hero);
        assert_eq!(created.power, power);

        let mut tx = pool.begin().await.unwrap();
        let stored = sql::hero_power::get(&mut tx, created.id).await.unwrap().unwrap();
        assert_eq!(
            stored,
            HeroPower {
                id: created.id,
                strength: Strength::Strong,
                hero_id: hero.id,
                power_id: power.id,
            }
        );
    }

    #[tokio::test]
    async fn create_assigns_fresh_ids() {
        let (server, _pool, hero, power) = fixture().await;
        let body = json!({"strength": "Weak", "hero_id": hero.id, "power_id": power.id});

        let first: HeroPowerDetail = server.post("/hero_powers").json(&body).await.json();
        let second: HeroPowerDetail = server.post("/hero_powers").json(&body).await.json();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn invalid_strength_is_rejected() {
        let (server, pool, hero, power) = fixture().await;

        let response = server
            .post("/hero_powers")
            .json(&json!({"strength": "strong", "hero_id": hero.id, "power_id": power.id}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "errors": ["strength must be one of the following values: Strong, Weak, Average"]
        }));
        assert_eq!(count(&pool).await, 0);
    }

    #[tokio::test]
    async fn strength_must_be_a_string() {
        let (server, pool, hero, power) = fixture().await;

        for strength in [json!(null), json!(3), json!(["Strong"])] {
            let response = server
                .post("/hero_powers")
                .json(&json!({"strength": strength, "hero_id": hero.id, "power_id": power.id}))
                .await;
            response.assert_status(StatusCode::BAD_REQUEST);
            response.assert_json(&json!({"errors": ["strength must be a string"]}));
        }

        let response = server
            .post("/hero_powers")
            .json(&json!({"hero_id": hero.id, "power_id": power.id}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(count(&pool).await, 0);
    }

    #[tokio::test]
    async fn missing_ids_are_rejected() {
        let (server, pool, _hero, _power) = fixture().await;

        let response = server
            .post("/hero_powers")
            .json(&json!({"strength": "Average"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "errors": ["hero_id must not be null", "power_id must not be null"]
        }));
        assert_eq!(count(&pool).await, 0);
    }

    #[tokio::test]
    async fn unknown_hero_or_power_is_not_found() {
        let (server, pool, hero, power) = fixture().await;

        let response = server
            .post("/hero_powers")
            .json(&json!({"strength": "Average", "hero_id": hero.id + 100, "power_id": power.id}))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({"error": "Hero not found"}));

        let response = server
            .post("/hero_powers")
            .json(&json!({"strength": "Average", "hero_id": hero.id, "power_id": power.id + 100}))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({"error": "Power not found"}));

        assert_eq!(count(&pool).await, 0);
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let (server, pool, _hero, power) = fixture().await;

        let response = server
            .post("/hero_powers")
            .json(&json!({"strength": "Average", "hero_id": "one", "power_id": power.id}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["errors"].is_array());
        assert_eq!(count(&pool).await, 0);
    }

    #[tokio::test]
    async fn integrity_violation_rolls_back() {
        let (server, pool, hero, power) = fixture().await;
        sqlx::query(
            r#"
            CREATE TRIGGER vanish_hero BEFORE INSERT ON hero_powers
            BEGIN
                DELETE FROM heroes WHERE id = NEW.hero_id;
            END
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        let response = server
            .post("/hero_powers")
            .json(&json!({"strength": "Strong", "hero_id": hero.id, "power_id": power.id}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"errors": ["validation errors"]}));

        assert_eq!(count(&pool).await, 0);
        let mut tx = pool.begin().await.unwrap();
        assert_eq!(sql::hero::get(&mut tx, hero.id).await.unwrap(), Some(hero));
    }
}
