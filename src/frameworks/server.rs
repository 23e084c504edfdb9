// Framework bootstrap for the platformer server runtime.

use crate::domain::dialog::StandardProvider;
use crate::domain::ports::PasswordBackend;
use crate::frameworks::config::ServerConfig;
use crate::interface_adapters::clients::LlmClient;
use crate::interface_adapters::net::{inventory_handler, status_handler, ws_handler};
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::storage::{FileLevelRepository, FileSnapshotStore};
use crate::use_cases::GameHost;

use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::{io::Result, sync::Arc};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/inventory", get(inventory_handler))
        .route("/status", get(status_handler))
        .with_state(state)
}

pub async fn run(listener: tokio::net::TcpListener, config: ServerConfig) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state(&config)?;
    let app = router(state);

    tracing::info!(%address, level_id = %config.level_id, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();
    let config = ServerConfig::from_env();

    let address = SocketAddr::from(([127, 0, 0, 1], config.port));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, config).await
}

fn build_state(config: &ServerConfig) -> Result<Arc<AppState>> {
    let mut dialogs = StandardProvider::new();
    match &config.llm_proxy_url {
        Some(url) => {
            let client = LlmClient::new(
                url.clone(),
                config.team_token.clone(),
                config.llm_timeout,
                tokio::runtime::Handle::current(),
            )
            .map_err(|e| std::io::Error::other(format!("failed to initialize llm client: {e}")))?;
            tracing::debug!(
                llm_proxy_url = %url,
                llm_timeout_ms = config.llm_timeout.as_millis(),
                "llm client configured"
            );
            let backend: Arc<dyn PasswordBackend> = Arc::new(client);
            dialogs = dialogs.with_password_backend(backend);
        }
        None => tracing::warn!("LLM_PROXY_URL unset; password dialogs unavailable"),
    }

    let host = GameHost::new(
        config.level_id.clone(),
        Arc::new(FileLevelRepository::new(&config.levels_dir)),
        Arc::new(FileSnapshotStore::new(&config.snapshots_dir)),
        Arc::new(dialogs),
    );
    tracing::debug!(
        levels_dir = %config.levels_dir.display(),
        snapshots_dir = %config.snapshots_dir.display(),
        "storage configured"
    );

    Ok(Arc::new(AppState {
        host: Arc::new(host),
    }))
}
