use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend};
use service::ship::repo::{InMemoryShipRepository, SeaOrmShipRepository};
use service::ship::ShipRepository;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the configured ship store; Postgres must answer a ping before serving.
pub async fn build_repository(cfg: &AppConfig) -> Result<Arc<dyn ShipRepository>, StartupError> {
    match cfg.storage.backend {
        StorageBackend::Memory => {
            warn!("using in-memory ship storage; data is lost on exit");
            Ok(Arc::new(InMemoryShipRepository::new()))
        }
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database)
                .await
                .map_err(|e| StartupError::Storage(e.to_string()))?;
            models::db::ping(&db).await.map_err(|e| StartupError::Storage(e.to_string()))?;
            info!("postgres ship store ready");
            Ok(Arc::new(SeaOrmShipRepository::new(db)))
        }
    }
}

/// Router for an already opened store.
pub fn build_app(repo: Arc<dyn ShipRepository>) -> Router {
    routes::build_router(ServerState::new(repo), build_cors())
}

/// Build the app from resolved configuration and serve until the listener fails.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let repo = build_repository(&cfg).await?;
    let app = build_app(repo);

    let addr: SocketAddr = cfg
        .server
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))?;
    info!(%addr, storage = ?cfg.storage.backend, "starting ship registry");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
