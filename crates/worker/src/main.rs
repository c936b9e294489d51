//! GolfPlex content-generation worker binary.
//!
//! Environment variables are documented on
//! [`WorkerConfig::from_env`](golfplex_worker::config::WorkerConfig::from_env);
//! a `.env` file is honoured in development.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use golfplex_worker::config::WorkerConfig;
use golfplex_worker::runner::Runner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WorkerConfig::from_env();
    tracing::info!(
        api_url = %config.api_url,
        ollama_url = %config.ollama_url,
        model = %config.model,
        output_dir = %config.output_dir.display(),
        worker_id = %config.worker_id,
        "Starting GolfPlex content worker",
    );

    Runner::new(config)?.run().await
}
