//! # Seed Data
//!
//! Heroes and powers are never created over HTTP.  This module provisions the canonical
//! dataset used by `heroes-seed` and by tests.

use sqlx::SqlitePool;

use crate::{DataStoreError, NewHeroPower, Strength, sql};

/// `(name, super_name)` of every seeded hero, in insertion order.
pub const HEROES: [(&str, &str); 10] = [
    ("Kamala Khan", "Ms. Marvel"),
    ("Doreen Green", "Squirrel Girl"),
    ("Gwen Stacy", "Spider-Gwen"),
    ("Janet Van Dyne", "The Wasp"),
    ("Wanda Maximoff", "Scarlet Witch"),
    ("Carol Danvers", "Captain Marvel"),
    ("Jean Grey", "Dark Phoenix"),
    ("Ororo Munroe", "Storm"),
    ("Kitty Pryde", "Shadowcat"),
    ("Elektra Natchios", "Elektra"),
];

/// `(name, description)` of every seeded power, in insertion order.
pub const POWERS: [(&str, &str); 4] = [
    ("super strength", "gives the wielder super-human strengths"),
    (
        "flight",
        "gives the wielder the ability to fly through the skies at supersonic speed",
    ),
    (
        "super human senses",
        "allows the wielder to use her senses at a super-human level",
    ),
    ("elasticity", "can stretch the human body to extreme lengths"),
];

/// `(hero index, power index, strength)` into [`HEROES`] and [`POWERS`].
pub const HERO_POWERS: [(usize, usize, Strength); 6] = [
    (0, 1, Strength::Strong),
    (0, 3, Strength::Average),
    (1, 0, Strength::Weak),
    (2, 2, Strength::Strong),
    (5, 0, Strength::Strong),
    (7, 1, Strength::Average),
];

/// Counts of what [`seed`] inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Heroes inserted.
    pub heroes: usize,
    /// Powers inserted.
    pub powers: usize,
    /// Hero-powers inserted.
    pub hero_powers: usize,
}

/// Inserts the canonical dataset in one transaction.
///
/// With `reset`, every existing row is deleted first.
pub async fn seed(pool: &SqlitePool, reset: bool) -> Result<SeedSummary, DataStoreError> {
    let mut tx = sql::begin_write(pool).await?;

    if reset {
        let removed = sql::hero_power::delete_all(&mut tx).await?;
        let heroes = sql::hero::delete_all(&mut tx).await?;
        let powers = sql::power::delete_all(&mut tx).await?;
        tracing::info!(removed, heroes, powers, "cleared existing rows");
    }

    let mut heroes = Vec::with_capacity(HEROES.len());
    for (name, super_name) in HEROES {
        heroes.push(sql::hero::create(&mut tx, name, super_name).await?);
    }

    let mut powers = Vec::with_capacity(POWERS.len());
    for (name, description) in POWERS {
        powers.push(sql::power::create(&mut tx, name, description).await?);
    }

    for (hero, power, strength) in HERO_POWERS {
        let new = NewHeroPower {
            strength,
            hero_id: heroes[hero].id,
            power_id: powers[power].id,
        };
        sql::hero_power::create(&mut tx, &new).await?;
    }

    tx.commit().await?;

    Ok(SeedSummary {
        heroes: heroes.len(),
        powers: powers.len(),
        hero_powers: HERO_POWERS.len(),
    })
}
