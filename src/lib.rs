//! # Superheroes: Heroes, Powers, and How Strong They Are
//!
//! This crate serves a small relational dataset over HTTP:
//!
//! - **Heroes** have a civilian name and a super name
//! - **Powers** have a name and a description of at least twenty characters
//! - **Hero-powers** link one hero to one power with a strength of `Strong`, `Weak`,
//!   or `Average`
//!
//! Heroes and powers are provisioned out-of-band (see [`seed`]).  Over HTTP a client can
//! read heroes and powers, change a power's description, and give a hero a power.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ HTTP API Layer (Axum routes)            │
//! ├─────────────────────────────────────────┤
//! │ Validation (strength, ids, description) │
//! ├─────────────────────────────────────────┤
//! │ SQL operations (one transaction/request)│
//! ├─────────────────────────────────────────┤
//! │ SQLite (foreign keys, cascade deletes)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Endpoints
//!
//! | Method | Path | Success | Failure |
//! |---|---|---|---|
//! | `GET` | `/` | 200 welcome text | |
//! | `GET` | `/heroes` | 200 hero summaries | |
//! | `GET` | `/heroes/:id` | 200 hero with `hero_powers` | 404 |
//! | `GET` | `/powers` | 200 powers | |
//! | `GET` | `/powers/:id` | 200 power | 404 |
//! | `PATCH` | `/powers/:id` | 200 updated power | 400, 404 |
//! | `POST` | `/hero_powers` | 201 hero-power with nested hero and power | 400, 404 |
//!
//! Not-found errors are `{"error": "<Entity> not found"}`; validation and integrity errors
//! are `{"errors": [...]}`.
//!
//! ## Usage Examples
//!
//! ```rust
//! # use superheroes::{Strength, ValidationError, validate_new_hero_power};
//! let new = validate_new_hero_power(Some("Average"), Some(1), Some(2)).unwrap();
//! assert_eq!(new.strength, Strength::Average);
//!
//! let err: ValidationError = validate_new_hero_power(Some("Mighty"), Some(1), None).unwrap_err();
//! assert_eq!(err.messages().len(), 2);
//! ```
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = superheroes::sql::open("sqlite://heroes.db").await?;
//! superheroes::seed::seed(&pool, true).await?;
//! let app = superheroes::create_router(pool);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5555").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
mod errors;
mod hero;
mod hero_power;
mod power;
mod router;
mod validate;

/// Command-line interface utilities for program termination and output formatting.
pub mod cli_utils;

/// Command-line interface command handlers for heroctl.
pub mod commands;

/// HTTP client utilities for interacting with the superheroes API.
pub mod http_utils;

/// Canonical dataset and the function that loads it.
pub mod seed;

/// SQLite database operations, connection setup, and embedded migrations.
pub mod sql;

pub use errors::{
    ApiError, DataStoreError, INTEGRITY_VIOLATION_MESSAGE, INTERNAL_ERROR_MESSAGE,
};
pub use hero::{Hero, HeroDetail, HeroPowerEntry, create_hero_router};
pub use hero_power::{
    CreateHeroPowerRequest, HeroPower, HeroPowerDetail, create_hero_power_router,
};
pub use power::{Power, UpdatePowerRequest, create_power_router};
pub use router::{WELCOME_MESSAGE, create_router};
pub use validate::{
    DESCRIPTION_MISSING, DESCRIPTION_TOO_SHORT, MIN_DESCRIPTION_LENGTH, NewHeroPower, Strength,
    ValidationError, validate_description, validate_foreign_key, validate_new_hero_power,
    validate_strength,
};
