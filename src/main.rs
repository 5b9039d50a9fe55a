use clap::Parser;
use tracing_subscriber::EnvFilter;

use report_api_rust::config::{self, StorageBackend};
use report_api_rust::server::{self, AppState};
use report_api_rust::{is_development, is_production};

#[derive(Parser)]
#[command(name = "report-api-rust")]
#[command(about = "Report API server - authenticated CRUD over user-owned reports")]
#[command(version)]
struct Args {
    #[arg(long, help = "Port to listen on (overrides REPORT_API_PORT/PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Address to bind (overrides REPORT_API_BIND)")]
    bind: Option<String>,

    #[arg(long, help = "Keep reports and users in process memory instead of PostgreSQL")]
    memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    let default_filter = if is_development!() {
        "report_api_rust=debug,tower_http=debug"
    } else {
        "report_api_rust=info,tower_http=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    let args = Args::parse();

    // Initialize configuration (this loads the config singleton)
    let mut config = config::config().clone();
    tracing::info!("Starting Report API in {:?} mode", config.environment);

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }
    if args.memory {
        config.database.backend = StorageBackend::Memory;
    }

    if config.security.jwt_secret.is_empty() {
        if is_production!() {
            anyhow::bail!("JWT_SECRET must be set in production");
        }
        tracing::warn!("JWT_SECRET is empty; logins will fail until it is configured");
    }

    let bind_addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let state = AppState::from_config(config).await?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    tracing::info!("Report API listening on http://{}", bind_addr);

    server::serve(listener, state).await?;
    Ok(())
}
