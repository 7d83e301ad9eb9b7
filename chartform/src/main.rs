mod config;
mod web;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::AppConfig;
use crate::web::WebState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let config = AppConfig::from_env();
    tokio::fs::create_dir_all(&config.upload_dir).await?;
    info!("upload directory ready at {}", config.upload_dir.display());
    let state = WebState {
        config: Arc::new(config),
    };
    web::start_web(state).await
}
