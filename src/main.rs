// Veritas - terminal entry point

use std::sync::Arc;

use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use veritas::state::AppState;
use veritas::storage::ConfigService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env may provide API_KEY / GEMINI_API_KEY
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays the conversation
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "veritas=info,veritas_llm=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_service = ConfigService::new()?;
    tracing::info!(path = %config_service.path().display(), "configuration loaded");

    let state = Arc::new(AppState::initialize(config_service)?);
    veritas::repl::run(state, BufReader::new(tokio::io::stdin())).await?;

    tracing::info!("session ended");
    Ok(())
}
