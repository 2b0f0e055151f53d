//! Binary entrypoint for the tripplan API server.
use tripplan_api::{config::Config, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // OPENAI_* and TRIPPLAN_* variables, see config.rs
    let config = Config::from_env()?;
    run(config).await
}
