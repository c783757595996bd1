use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use city_explorer::cache::{LocationCache, MemoryLocationCache, PgLocationCache};
use city_explorer::{AppState, ExplorerConfig, ServiceClients, logging, web};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = ExplorerConfig::load_from_path(config_path)?;
    logging::init(&config.logging)?;

    let cache: Arc<dyn LocationCache> = match &config.database_url {
        Some(url) => {
            let cache = PgLocationCache::connect(url, config.database.max_connections)
                .await
                .context("Failed to connect to the location cache database")?;
            info!("Connected to location cache database");
            Arc::new(cache)
        }
        None => {
            warn!("DATABASE_URL not set, caching locations in memory");
            Arc::new(MemoryLocationCache::new())
        }
    };

    let services = ServiceClients::new(&config)?;
    let state = AppState::new(cache, services);

    web::run(state, config.port).await
}
