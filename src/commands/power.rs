//! # Power Command Handler
//!
//! Lists, shows, and re-describes powers.

use crate::{
    Power, UpdatePowerRequest, cli_utils,
    commands::shared::{dispatch_command, validate_args_count_or_exit},
    http_utils,
};

const POWER_USAGE: &str = "Usage: heroctl power <list|get|update> [args...]";

/// Handles all power-related commands.
pub async fn handle_power_command(args: &[String], client: &http_utils::HeroesClient) {
    dispatch_command!("power", POWER_USAGE, args, client, {
        "list" => handle_power_list,
        "get" => handle_power_get,
        "update" => handle_power_update,
    });
}

async fn handle_power_list(args: &[String], client: &http_utils::HeroesClient) {
    validate_args_count_or_exit(args, 1, 1, "list", "Usage: heroctl power list");
    let powers = http_utils::execute_or_exit(
        || client.get::<Vec<Power>>("powers"),
        "Failed to list powers",
    )
    .await;

    if powers.is_empty() {
        println!("No powers found");
    } else {
        println!("Powers:");
        for power in powers {
            println!("  {:>4}  {}: {}", power.id, power.name, power.description);
        }
    }
}

async fn handle_power_get(args: &[String], client: &http_utils::HeroesClient) {
    validate_args_count_or_exit(args, 2, 2, "get", "Usage: heroctl power get <power-id>");
    let id = cli_utils::parse_id_or_exit(&args[1], "power");
    let path = format!("powers/{}", id);

    let power =
        http_utils::execute_or_exit(|| client.get::<Power>(&path), "Failed to get power").await;

    cli_utils::print_json_or_exit(&power, "power");
}

/// Handles `power update <power-id> <description>`.
///
/// The description is validated by the server; it must be at least 20 characters.
async fn handle_power_update(args: &[String], client: &http_utils::HeroesClient) {
    validate_args_count_or_exit(
        args,
        3,
        3,
        "update",
        "Usage: heroctl power update <power-id> <description>",
    );
    let id = cli_utils::parse_id_or_exit(&args[1], "power");
    let path = format!("powers/{}", id);
    let request = UpdatePowerRequest {
        description: Some(args[2].clone()),
    };

    let power = http_utils::execute_or_exit(
        || client.patch::<UpdatePowerRequest, Power>(&path, &request),
        "Failed to update power",
    )
    .await;

    println!("Updated power {}: {}", power.id, power.description);
}
