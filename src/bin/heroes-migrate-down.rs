//! Reverts the most recent superheroes database migration.

use arrrg::CommandLine;
use arrrg_derive::CommandLine;

use superheroes::sql;

#[derive(CommandLine, Default, PartialEq, Eq)]
struct Options {
    #[arrrg(required, "SQLite database URL")]
    database_url: String,
}

const USAGE: &str = r#"Usage: heroes-migrate-down --database-url <URL>

Revert the most recent database migration for superheroes.

Arguments:
  --database-url <URL>    SQLite database URL

Example:
  heroes-migrate-down --database-url sqlite://heroes.db

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

    println!("Reverting most recent migration...");

    // undo() reverts every applied migration newer than the target version.
    let applied: Vec<i64> =
        sqlx::query_scalar("SELECT version FROM _sqlx_migrations ORDER BY version DESC LIMIT 2")
            .fetch_all(&pool)
            .await?;
    let Some(latest) = applied.first() else {
        println!("No migrations to revert.");
        return Ok(());
    };
    let target = applied.get(1).copied().unwrap_or(0);
    sql::MIGRATOR.undo(&pool, target).await?;

    println!("Migration {} reverted successfully!", latest);

    Ok(())
}
