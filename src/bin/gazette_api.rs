//! 官報保存APIサーバー（/api 配下に公開）

use std::sync::Arc;

use axum::Router;
use gazette_scraper::logging::{self, LogConfig};
use gazette_scraper::server::{self, AppState, InMemoryGazetteStore};
use gazette_scraper::ServerConfig;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(&LogConfig::from_env())?;

    let config = ServerConfig::from_env();
    let state = AppState::new(Arc::new(InMemoryGazetteStore::new()));
    let app = Router::new().nest("/api", server::router(state));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Gazette API listening on {}", config.bind_addr);
    warn!("Records are kept in memory and are lost when the server stops");
    axum::serve(listener, app).await?;

    Ok(())
}
