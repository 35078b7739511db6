//! # Hero Command Handler
//!
//! Lists heroes and shows a single hero with their powers.

use crate::{
    Hero, HeroDetail, cli_utils,
    commands::shared::{dispatch_command, validate_args_count_or_exit},
    http_utils,
};

const HERO_USAGE: &str = "Usage: heroctl hero <list|get> [args...]";

/// Handles all hero-related commands.
///
/// # Arguments
/// * `args` - Command arguments (first element is the subcommand)
/// * `client` - HTTP client for API communication
pub async fn handle_hero_command(args: &[String], client: &http_utils::HeroesClient) {
    dispatch_command!("hero", HERO_USAGE, args, client, {
        "list" => handle_hero_list,
        "get" => handle_hero_get,
    });
}

async fn handle_hero_list(args: &[String], client: &http_utils::HeroesClient) {
    validate_args_count_or_exit(args, 1, 1, "list", "Usage: heroctl hero list");
    let heroes = http_utils::execute_or_exit(
        || client.get::<Vec<Hero>>("heroes"),
        "Failed to list heroes",
    )
    .await;

    if heroes.is_empty() {
        println!("No heroes found");
    } else {
        println!("Heroes:");
        for hero in heroes {
            println!("  {:>4}  {} ({})", hero.id, hero.super_name, hero.name);
        }
    }
}

async fn handle_hero_get(args: &[String], client: &http_utils::HeroesClient) {
    validate_args_count_or_exit(args, 2, 2, "get", "Usage: heroctl hero get <hero-id>");
    let id = cli_utils::parse_id_or_exit(&args[1], "hero");
    let path = format!("heroes/{}", id);

    let hero = http_utils::execute_or_exit(
        || client.get::<HeroDetail>(&path),
        "Failed to get hero",
    )
    .await;

    cli_utils::print_json_or_exit(&hero, "hero");
}
