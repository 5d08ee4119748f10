use std::sync::Arc;

use clap::Parser;
use postbox::{http, AppState, Config, QueueManager};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let config = Config::parse();

    let manager = Arc::new(QueueManager::new(config.default_capacity, config.max_queues));

    let state = AppState {
        manager,
        default_timeout: config.default_timeout(),
    };
    let router = http::create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        max_queues = config.max_queues,
        default_capacity = config.default_capacity,
        default_timeout_secs = config.default_timeout,
        "postbox listening on {}",
        addr
    );

    axum::serve(listener, router).await?;

    Ok(())
}
