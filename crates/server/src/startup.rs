use std::{env, net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};
use service::{resource::ResourceService, runtime, storage::JsonResourceStore};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> Result<SocketAddr, StartupError> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    format!("{}:{}", host, port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address: {e}")))
}

/// Resolve the store data file path from config or `DATA_PATH`.
fn load_data_path() -> String {
    match configs::load_default() {
        Ok(mut cfg) => {
            cfg.store.normalize_from_env();
            cfg.store.data_path
        }
        Err(_) => env::var("DATA_PATH").unwrap_or_else(|_| "data/resources.json".to_string()),
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let data_path = load_data_path();
    if let Some(parent) = Path::new(&data_path).parent().filter(|p| !p.as_os_str().is_empty()) {
        runtime::ensure_env(&parent.to_string_lossy()).await?;
    }

    // Explicit wiring: store into service into router state.
    let store = JsonResourceStore::new(&data_path).await?;
    let state = ServerState { resources: Arc::new(ResourceService::new(store)) };

    let cors = build_cors();
    let app: Router = routes::build_router(state, cors);

    let addr = load_bind_addr()?;
    info!(%addr, data_path = %data_path, "starting resource catalogue server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
