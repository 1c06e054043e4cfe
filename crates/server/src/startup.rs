use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::backend::BackendClient;
use configs::AppConfig;
use migration::MigratorTrait;
use service::submission::{repo::seaorm::SeaOrmSubmissionRepository, SubmissionService};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, FrontendState, StoreState};

/// Which of the three services this process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deployment {
    /// Owns the database; JSON list at `/view`.
    Backend,
    /// Renders pages and proxies to the backend.
    Frontend,
    /// Pages and database in one process.
    Standalone,
}

impl Deployment {
    pub fn name(self) -> &'static str {
        match self {
            Deployment::Backend => "backend",
            Deployment::Frontend => "frontend",
            Deployment::Standalone => "standalone",
        }
    }

    /// Port used when neither `server.port` nor `SERVER_PORT` is set.
    pub fn default_port(self) -> u16 {
        match self {
            Deployment::Backend => 9000,
            Deployment::Frontend => 8000,
            Deployment::Standalone => 5000,
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn load_bind_addr(cfg: &AppConfig, deployment: Deployment) -> Result<SocketAddr, StartupError> {
    let addr = cfg
        .server
        .bind_addr(deployment.default_port())
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    addr.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {addr}: {e}")))
}

/// Connect, migrate, and wrap the store in the submission service.
async fn store_state(cfg: &AppConfig) -> Result<StoreState, StartupError> {
    cfg.database
        .validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    let repo = SeaOrmSubmissionRepository::new(db);
    Ok(StoreState { submissions: SubmissionService::new(Arc::new(repo)) })
}

fn frontend_state(cfg: &AppConfig) -> Result<FrontendState, StartupError> {
    cfg.backend
        .validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    info!(backend_url = %cfg.backend.base_url, "proxying to backend");
    Ok(FrontendState { backend: BackendClient::new(cfg.backend.base_url.clone()) })
}

/// Build the router for `deployment` from configuration.
pub async fn build_app(cfg: &AppConfig, deployment: Deployment) -> Result<Router, StartupError> {
    let cors = build_cors();
    let app = match deployment {
        Deployment::Backend => routes::build_backend_router(store_state(cfg).await?, cors),
        Deployment::Frontend => routes::build_frontend_router(frontend_state(cfg)?, cors),
        Deployment::Standalone => routes::build_standalone_router(store_state(cfg).await?, cors),
    };
    Ok(app)
}

/// Public entry: build the app from an already loaded config and run the HTTP server
pub async fn run(cfg: AppConfig, deployment: Deployment) -> anyhow::Result<()> {
    let addr = load_bind_addr(&cfg, deployment)?;
    let app = build_app(&cfg, deployment).await?;

    info!(service = deployment.name(), %addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
