use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use notes_api::config::AppConfig;
use notes_api::AppState;

#[derive(Parser, Debug)]
#[command(name = "notes-api", version, about = "Personal notes service")]
struct Cli {
    #[arg(long, help = "Address to bind (overrides NOTES_HOST)")]
    host: Option<String>,

    #[arg(short, long, help = "Port to listen on (overrides NOTES_PORT/PORT)")]
    port: Option<u16>,

    #[arg(long, value_name = "PATH", help = "Notes JSON document (overrides NOTES_FILE)")]
    notes_file: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "Users JSON document (overrides USERS_FILE)")]
    users_file: Option<PathBuf>,
}

impl Cli {
    fn apply(self, config: &mut AppConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(path) = self.notes_file {
            config.storage.notes_path = path;
        }
        if let Some(path) = self.users_file {
            config.storage.users_path = path;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up ACCESS_TOKEN_SECRET, NOTES_FILE, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("notes_api=info,tower_http=info")),
        )
        .init();

    let mut config = notes_api::config::config().clone();
    Cli::parse().apply(&mut config);
    tracing::info!("Starting Notes API in {:?} mode", config.environment);

    let state = AppState::from_config(&config).await?;
    let app = notes_api::app(state, &config);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Notes API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
