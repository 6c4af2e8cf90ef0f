use anyhow::Result;
use slang_explainer::{config::Config, server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("slang_explainer=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    info!(
        "Starting slang explainer (model: {}, explanations {})",
        config.openai_model,
        if config.enrichment_enabled() { "enabled" } else { "disabled" }
    );

    server::run(config).await
}
