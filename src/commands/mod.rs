//! # Command Handlers
//!
//! Command handlers for the heroctl CLI application, one submodule per resource.
//!
//! ## Structure
//!
//! - `hero` - Hero commands (list, get)
//! - `power` - Power commands (list, get, update)
//! - `hero_power` - Hero-power commands (create)
//! - `shared` - Argument checking and dispatch

pub mod hero;
pub mod hero_power;
pub mod power;
pub mod shared;

pub use hero::handle_hero_command;
pub use hero_power::handle_hero_power_command;
pub use power::handle_power_command;
