use std::process;
use std::sync::Arc;

use logpump::broker::InMemoryBroker;
use logpump::config::load_config;
use logpump::consumer::Consumer;
use logpump::handler::PayloadLogger;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let config = load_config().expect("Failed to load configuration");

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(
        host = %config.broker.host,
        port = config.broker.port,
        shards = config.consumer.shard_count,
        "starting log consumer"
    );

    // The bundled backend runs in-process; a production deployment provides a
    // real broker client behind the same trait.
    let broker = Arc::new(InMemoryBroker::new());
    let consumer = Consumer::new(Arc::new(PayloadLogger), &config.consumer);

    if let Err(e) = consumer.subscribe_all(broker.clone()).await {
        eprintln!("subscription setup failed: {e}");
        process::exit(1);
    }

    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
    info!("shutting down");
}
