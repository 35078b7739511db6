use arrrg::CommandLine;
use arrrg_derive::CommandLine;

use superheroes::{
    cli_utils,
    commands::{handle_hero_command, handle_hero_power_command, handle_power_command},
    http_utils,
};

#[derive(CommandLine, Default, PartialEq, Eq)]
struct Options {
    #[arrrg(optional, "Base URL of the superheroes API server")]
    base_url: String,
}

const USAGE: &str = r#"Usage: heroctl [options] <command> [args...]

Options:
  --base-url <url>     Base URL of the superheroes API server (default: http://localhost:5555)

Commands:
  hero list                                       List all heroes
  hero get <hero-id>                              Get a hero and their powers
  power list                                      List all powers
  power get <power-id>                            Get a power
  power update <power-id> <description>           Update a power's description
  heropower create <hero-id> <power-id> <strength> Give a hero a power (Strong, Weak, Average)"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (options, free) = Options::from_command_line_relaxed("USAGE: heroctl <command> [args...]");

    if free.is_empty() {
        cli_utils::exit_with_usage_error("No command specified", USAGE);
    }

    let base_url = if options.base_url.is_empty() {
        "http://localhost:5555".to_string()
    } else {
        options.base_url
    };

    let client = http_utils::HeroesClient::new(base_url);

    match free[0].as_str() {
        "hero" => {
            handle_hero_command(&free[1..], &client).await;
        }
        "power" => {
            handle_power_command(&free[1..], &client).await;
        }
        "heropower" => {
            handle_hero_power_command(&free[1..], &client).await;
        }
        _ => {
            cli_utils::exit_with_error(&format!(
                "Unknown command '{}'. Available commands: hero, power, heropower",
                free[0]
            ));
        }
    }

    Ok(())
}
