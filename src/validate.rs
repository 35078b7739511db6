//! # Field Validation
//!
//! Every write to a power or a hero-power passes through the functions in this module
//! before it reaches storage.  Each function either returns the value that should be
//! persisted or a [`ValidationError`] listing everything that was wrong with it.
//!
//! ## Rules
//!
//! - `strength` must be exactly one of `Strong`, `Weak`, `Average` (case-sensitive)
//! - `hero_id` and `power_id` must be present
//! - `description` must be present, non-blank, and at least
//!   [`MIN_DESCRIPTION_LENGTH`] characters once surrounding whitespace is removed
//!
//! The description rule is the same for creation and update; the stored value is the
//! trimmed description.
//!
//! ```rust
//! # use superheroes::{Strength, validate_description, validate_strength};
//! assert_eq!(validate_strength("Weak").unwrap(), Strength::Weak);
//! assert!(validate_strength("weak").is_err());
//!
//! let description = validate_description(Some("  gives the wielder super-human strengths ")).unwrap();
//! assert_eq!(description, "gives the wielder super-human strengths");
//! assert!(validate_description(Some("short")).is_err());
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Minimum number of characters a power description must carry after trimming.
pub const MIN_DESCRIPTION_LENGTH: usize = 20;

/// Message reported when a description is absent or blank.
pub const DESCRIPTION_MISSING: &str = "description must be present";

/// Message reported when a description is shorter than [`MIN_DESCRIPTION_LENGTH`].
pub const DESCRIPTION_TOO_SHORT: &str = "description must be at least 20 characters long";

/////////////////////////////////////////////// Strength ///////////////////////////////////////////////

/// How strong a hero is at one of their powers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strength {
    /// The hero excels at the power.
    Strong,
    /// The hero can barely use the power.
    Weak,
    /// Somewhere in between.
    Average,
}

impl Strength {
    /// All accepted strengths, in the order they are reported to clients.
    pub const ALL: [Strength; 3] = [Strength::Strong, Strength::Weak, Strength::Average];

    /// The canonical spelling stored in the database and sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::Strong => "Strong",
            Strength::Weak => "Weak",
            Strength::Average => "Average",
        }
    }
}

impl Display for Strength {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Strength {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_strength(s)
    }
}

/////////////////////////////////////////// ValidationError ////////////////////////////////////////////

/// One or more field-level violations detected before a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    messages: Vec<String>,
}

impl ValidationError {
    /// Creates an error with a single message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    /// Human-readable messages, one per violation, in the order they were found.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Consumes the error, yielding its messages.
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.messages.join("; "))
    }
}

impl std::error::Error for ValidationError {}

///////////////////////////////////////////// Validators ///////////////////////////////////////////////

/// Validates a strength value.
pub fn validate_strength(value: &str) -> Result<Strength, ValidationError> {
    Strength::ALL
        .into_iter()
        .find(|strength| strength.as_str() == value)
        .ok_or_else(|| {
            let accepted: Vec<&str> = Strength::ALL.iter().map(Strength::as_str).collect();
            ValidationError::new(format!(
                "strength must be one of the following values: {}",
                accepted.join(", ")
            ))
        })
}

/// Validates that a foreign key named `key` is present.
pub fn validate_foreign_key(key: &str, value: Option<i64>) -> Result<i64, ValidationError> {
    value.ok_or_else(|| ValidationError::new(format!("{} must not be null", key)))
}

/// Validates a power description and returns the trimmed value to persist.
pub fn validate_description(value: Option<&str>) -> Result<String, ValidationError> {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(ValidationError::new(DESCRIPTION_MISSING));
    }
    if trimmed.chars().count() < MIN_DESCRIPTION_LENGTH {
        return Err(ValidationError::new(DESCRIPTION_TOO_SHORT));
    }
    Ok(trimmed.to_string())
}

/// A hero-power that passed validation and may be inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewHeroPower {
    /// Validated strength.
    pub strength: Strength,
    /// Referenced hero.
    pub hero_id: i64,
    /// Referenced power.
    pub power_id: i64,
}

/// Validates every field of a hero-power creation request at once.
///
/// `strength` is `None` when the client omitted it or sent something other than a string.
pub fn validate_new_hero_power(
    strength: Option<&str>,
    hero_id: Option<i64>,
    power_id: Option<i64>,
) -> Result<NewHeroPower, ValidationError> {
    let strength = match strength {
        Some(strength) => validate_strength(strength),
        None => Err(ValidationError::new("strength must be a string")),
    };
    let hero_id = validate_foreign_key("hero_id", hero_id);
    let power_id = validate_foreign_key("power_id", power_id);

    match (strength, hero_id, power_id) {
        (Ok(strength), Ok(hero_id), Ok(power_id)) => Ok(NewHeroPower {
            strength,
            hero_id,
            power_id,
        }),
        (strength, hero_id, power_id) => {
            let messages = [strength.err(), hero_id.err(), power_id.err()]
                .into_iter()
                .flatten()
                .flat_map(ValidationError::into_messages)
                .collect();
            Err(ValidationError { messages })
        }
    }
}
