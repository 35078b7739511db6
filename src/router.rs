use axum::{Router, routing::get};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::{create_hero_power_router, create_hero_router, create_power_router};

/// Plain-text body of `GET /`.
pub const WELCOME_MESSAGE: &str =
    "Welcome to the Superhero API! Use /heroes to get a list of superheroes.";

async fn home() -> &'static str {
    WELCOME_MESSAGE
}

/// Creates the full application router: every resource router plus request tracing.
pub fn create_router(pool: SqlitePool) -> Router {
    Router::new()
        .route("/", get(home))
        .merge(create_hero_router(pool.clone()))
        .merge(create_power_router(pool.clone()))
        .merge(create_hero_power_router(pool))
        .layer(TraceLayer::new_for_http())
}
