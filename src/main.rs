use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use foodlink_api::auth::{generate_jwt, Claims};
use foodlink_api::database::Store;
use foodlink_api::{app, AppConfig, AppState};

#[derive(Parser)]
#[command(name = "foodlink-api")]
#[command(about = "Food waste reduction backend for restaurants and NGOs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Override the configured port")]
        port: Option<u16>,
    },

    #[command(about = "Apply database migrations and exit")]
    Migrate,

    #[command(about = "Mint a bearer token for local testing")]
    Token {
        #[arg(long)]
        user: Uuid,

        #[arg(long, default_value = "ngo")]
        role: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("foodlink_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    tracing::info!("Starting FoodLink API in {:?} mode", config.environment);

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        Commands::Migrate => {
            let store = Store::connect(&config.database)?;
            store.migrate().await.context("failed to apply migrations")?;
            store.close().await;
            Ok(())
        }
        Commands::Token { user, role } => {
            let claims = Claims::new(user, role, config.security.jwt_expiry_hours);
            println!("{}", generate_jwt(&claims, &config.security.jwt_secret)?);
            Ok(())
        }
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    if config.security.jwt_secret.is_empty() {
        tracing::warn!("JWT_SECRET is not set; every protected request will be rejected");
    }

    let store = Store::connect(&config.database)?;
    if config.database.run_migrations && store.is_configured() {
        store.migrate().await.context("failed to apply migrations")?;
    }

    let state = AppState::new(&config, store.clone());
    let router = app(state, &config);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("FoodLink API listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
