//! HTTP server for the Open Classical tournament engine.
//!
//! Wires the Postgres-backed store, authorization gate, and managers
//! together and serves the JSON API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Error;
use ctrlc::set_handler;
use oc_server::api;
use oc_server::config::ServerConfig;
use oc_server::logging;
use open_classical::{
    auth::{AuthManager, PgAuthorizationGate},
    db::{Database, PgTournamentStore, run_migrations},
    ledger::{PgResultsLedger, SubmitManager},
    notify::LogNotifier,
    tournament::{ModerationManager, QueryManager},
};
use pico_args::Arguments;
use tracing::info;

const HELP: &str = "\
Run the Open Classical tournament server

USAGE:
  oc_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:8972]
  --db-url     URL         Database connection string  [default: env DATABASE_URL or postgres://postgres@localhost/open_classical_db]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  DATABASE_URL             PostgreSQL connection string
  JWT_SECRET               JWT verification secret (required, min 32 chars)
  SKIP_MIGRATIONS          Set to true to skip schema migrations at startup
  (See .env file for all configuration options)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind_override: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;
    let database_url_override: Option<String> = pargs.opt_value_from_str("--db-url")?;

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    logging::init();

    let config = ServerConfig::from_env(bind_override, database_url_override)?;

    info!("Starting Open Classical server at {}", config.bind);
    info!("Connecting to database: {}", config.database.database_url);

    let db = Database::new(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

    info!("Database connected successfully");

    if config.skip_migrations {
        info!("Skipping schema migrations (SKIP_MIGRATIONS is set)");
    } else {
        run_migrations(db.pool())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
        info!("Schema migrations applied");
    }

    // Create managers
    let store = Arc::new(PgTournamentStore::new(db.pool().clone()));
    let gate = Arc::new(PgAuthorizationGate::new(db.pool().clone()));
    let ledger = Arc::new(PgResultsLedger::new(db.pool().clone()));
    let notifier = Arc::new(LogNotifier);
    let auth_manager = Arc::new(AuthManager::new(config.jwt_secret.clone()));

    let moderation = ModerationManager::new(store.clone(), gate, notifier);
    let queries = QueryManager::new(store);
    let submit = SubmitManager::new(ledger);

    // Create API state
    let api_state = api::AppState {
        moderation,
        queries,
        submit,
        auth_manager,
        pool: db.pool().clone(),
    };

    // Create router
    let app = api::create_router(api_state);

    // Start HTTP server
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
}
