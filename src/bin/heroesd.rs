use arrrg::CommandLine;
use arrrg_derive::CommandLine;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use superheroes::{create_router, sql};

#[derive(CommandLine, Default, PartialEq, Eq)]
struct Args {
    #[arrrg(optional, "SQLite database URL")]
    database_url: Option<String>,
    #[arrrg(optional, "Host to bind the HTTP server")]
    host: Option<String>,
    #[arrrg(optional, "Port to bind the HTTP server")]
    port: Option<u16>,
    #[arrrg(flag, "Enable verbose logging")]
    verbose: bool,
}

const HELP_TEXT: &str = r#"heroesd - Superheroes API daemon

USAGE:
    heroesd [OPTIONS]

OPTIONS:
    --database-url <URL> SQLite database URL [default: $DATABASE_URL or sqlite://heroes.db]
    --host <HOST>        Host to bind the HTTP server [default: 127.0.0.1]
    --port <PORT>        Port to bind the HTTP server [default: 5555]
    --verbose            Enable verbose logging

DESCRIPTION:
    Runs the Superheroes API.  Pending migrations are applied at startup and the
    database file is created if it does not exist.  Populate it with heroes-seed.

    Log filtering follows RUST_LOG when it is set.

    The server supports graceful shutdown via Ctrl+C.

API ENDPOINTS:
    GET    /                 Welcome message
    GET    /heroes           List all heroes
    GET    /heroes/{id}      Get a hero and their powers
    GET    /powers           List all powers
    GET    /powers/{id}      Get a power
    PATCH  /powers/{id}      Update a power's description
    POST   /hero_powers      Give a hero a power"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, free) = Args::from_command_line("USAGE: heroesd [OPTIONS]");

    if !free.is_empty() && free[0] == "help" {
        println!("{}", HELP_TEXT);
        return Ok(());
    }

    let config = ServerConfig::from_args(args);
    init_tracing(config.verbose);

    tracing::debug!(
        database_url = %config.database_url,
        host = %config.host,
        port = config.port,
        "starting with configuration"
    );

    let pool = sql::open(&config.database_url)
        .await
        .map_err(|e| format!("Failed to open database {}: {}", config.database_url, e))?;
    tracing::info!(database_url = %config.database_url, "database ready");

    let app = create_router(pool.clone());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("listening on http://{}", addr);

    let shutdown_signal = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("shutdown signal received, stopping server gracefully");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    pool.close().await;
    tracing::info!("heroesd stopped");

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

struct ServerConfig {
    database_url: String,
    host: String,
    port: u16,
    verbose: bool,
}

impl ServerConfig {
    fn from_args(args: Args) -> Self {
        Self {
            database_url: args
                .database_url
                .or_else(|| std::env::var("DATABASE_URL").ok())
                .unwrap_or_else(|| "sqlite://heroes.db".to_string()),
            host: args.host.unwrap_or_else(|| "127.0.0.1".to_string()),
            port: args.port.unwrap_or(5555),
            verbose: args.verbose,
        }
    }
}
