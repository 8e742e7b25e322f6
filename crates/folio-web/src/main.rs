mod error;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use folio_core::chat::{ChatService, GenerationParams};
use folio_core::config::FolioConfig;
use folio_core::knowledge::KnowledgeStore;
use folio_core::llm::{CompletionClient, LlmService};
use tracing_subscriber::EnvFilter;

pub struct AppState {
    pub chat: ChatService<LlmService>,
    pub config: FolioConfig,
}

#[derive(Parser)]
#[command(name = "folio-web", about = "Folio portfolio API server")]
struct Cli {
    /// Address to bind (overrides web.host)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides web.port)
    #[arg(long)]
    port: Option<u16>,

    /// Directory containing .folio/config.toml
    #[arg(long, value_name = "DIR")]
    project_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("folio_web=info,folio_core=info,tower_http=info")),
        )
        .init();

    let project_dir = match cli.project_dir {
        Some(dir) => Some(dir),
        None => std::env::current_dir().ok(),
    };

    // Missing files already resolve to defaults; a file that fails to parse is fatal.
    let mut config = FolioConfig::load(project_dir.as_deref())
        .context("failed to load configuration")?;
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }

    let knowledge = Arc::new(KnowledgeStore::load(&config.knowledge)?);
    let llm = LlmService::from_config(&config.llm)?;
    if !llm.has_credential() {
        tracing::warn!(
            "no API key for {} (set {} or llm.api_key); /api/chat will answer with an apology",
            llm.provider_name(),
            llm.credential_hint()
        );
    }

    let chat = ChatService::new(knowledge, llm, GenerationParams::from_config(&config.llm));
    let addr = format!("{}:{}", config.web.host, config.web.port);

    let state = Arc::new(AppState { chat, config });
    let app = routes::app(state);

    tracing::info!("folio-web listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
