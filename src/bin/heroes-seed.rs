//! Loads the canonical heroes, powers, and hero-powers into a database.

use arrrg::CommandLine;
use arrrg_derive::CommandLine;

use superheroes::{seed, sql};

#[derive(CommandLine, Default, PartialEq, Eq)]
struct Options {
    #[arrrg(required, "SQLite database URL")]
    database_url: String,
    #[arrrg(flag, "Keep existing rows instead of clearing them first")]
    keep: bool,
}

const USAGE: &str = r#"Usage: heroes-seed --database-url <URL> [--keep]

Seed the superheroes database.  Pending migrations are applied first.

Arguments:
  --database-url <URL>    SQLite database URL
  --keep                  Keep existing rows instead of clearing them first

Example:
  heroes-seed --database-url sqlite://heroes.db"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (options, free) = Options::from_command_line(USAGE);

    if !free.is_empty() {
        eprintln!("Error: Unexpected arguments: {:?}", free);
        eprintln!();
        eprintln!("{}", USAGE);
        std::process::exit(1);
    }

    tracing_subscriber::fmt().init();

    println!("Connecting to database: {}", options.database_url);
    let pool = sql::open(&options.database_url).await?;

    println!("Seeding...");
    let summary = seed::seed(&pool, !options.keep).await?;

    println!(
        "Seeded {} heroes, {} powers, {} hero powers.",
        summary.heroes, summary.powers, summary.hero_powers
    );

    Ok(())
}
