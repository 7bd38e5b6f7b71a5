use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};

use flashdeck_lib::{start_server, DeckStore, ServerConfig};

pub fn run(config_path: Option<&Path>, bind: Option<SocketAddr>, max_upload_bytes: Option<usize>) -> Result<()> {
    let mut config = match config_path {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = bind {
        config.bind = bind;
    }
    if let Some(limit) = max_upload_bytes {
        config.max_upload_bytes = limit;
    }

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(async {
        let store = Arc::new(DeckStore::new());
        let server = start_server(config, Arc::clone(&store))
            .await
            .map_err(|e| anyhow!("Failed to start server: {}", e))?;

        println!("Serving decks on {}", server.base_url());

        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for Ctrl-C")?;

        server.stop().await;
        log::info!("Stopped with {} stored upload(s)", store.len());
        Ok::<(), anyhow::Error>(())
    })
}
