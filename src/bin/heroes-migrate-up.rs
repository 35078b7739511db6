//! Database migration tool for superheroes.
//!
//! This binary runs database migrations using sqlx's embedded migrations.
//! Migrations are embedded into the binary at compile time from the `migrations/` directory.

use arrrg::CommandLine;
use arrrg_derive::CommandLine;

use superheroes::sql;

#[derive(CommandLine, Default, PartialEq, Eq)]
struct Options {
    #[arrrg(required, "SQLite database URL")]
    database_url: String,
}

const USAGE: &str = r#"Usage: heroes-migrate-up --database-url <URL>

Run database migrations for superheroes.

Arguments:
  --database-url <URL>    SQLite database URL

Example:
  heroes-migrate-up --database-url sqlite://heroes.db

The migrations are embedded at compile time from the migrations/ directory."#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (options, free) = Options::from_command_line(USAGE);

    if !free.is_empty() {
        eprintln!("Error: Unexpected arguments: {:?}", free);
        eprintln!();
        eprintln!("{}", USAGE);
        std::process::exit(1);
    }

    println!("Connecting to database: {}", options.database_url);
    let pool = sql::connect(&options.database_url).await?;

    println!("Running migrations...");
    sql::MIGRATOR.run(&pool).await?;

    println!("Migrations completed successfully!");

    Ok(())
}
