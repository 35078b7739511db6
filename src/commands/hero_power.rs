//! # Hero-Power Command Handler

use serde_json::Value;

use crate::{
    CreateHeroPowerRequest, HeroPowerDetail, Strength, cli_utils,
    commands::shared::{dispatch_command, validate_args_count_or_exit},
    http_utils,
};

const HERO_POWER_USAGE: &str = "Usage: heroctl heropower create <hero-id> <power-id> <strength>";

/// Handles all hero-power commands.
pub async fn handle_hero_power_command(args: &[String], client: &http_utils::HeroesClient) {
    dispatch_command!("heropower", HERO_POWER_USAGE, args, client, {
        "create" => handle_hero_power_create,
    });
}

async fn handle_hero_power_create(args: &[String], client: &http_utils::HeroesClient) {
    validate_args_count_or_exit(args, 4, 4, "create", HERO_POWER_USAGE);
    let hero_id = cli_utils::parse_id_or_exit(&args[1], "hero");
    let power_id = cli_utils::parse_id_or_exit(&args[2], "power");
    let strength: Strength = args[3]
        .parse()
        .unwrap_or_else(|e| cli_utils::exit_with_error(&format!("{}", e)));

    let request = CreateHeroPowerRequest {
        strength: Some(Value::String(strength.to_string())),
        hero_id: Some(hero_id),
        power_id: Some(power_id),
    };

    let created = http_utils::execute_or_exit(
        || client.post::<CreateHeroPowerRequest, HeroPowerDetail>("hero_powers", &request),
        "Failed to create hero power",
    )
    .await;

    println!(
        "Created hero power {}: {} is {} at {}",
        created.id, created.hero.super_name, created.strength, created.power.name
    );
}
