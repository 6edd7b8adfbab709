mod gateway;
mod terminal;

use pos_core::application::session::PosSession;
use pos_core::config::Config;

use crate::gateway::build_gateway;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for POS_API_URL / RUST_LOG when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = Config::from_env()?;
    let gateway = build_gateway(config.api_url.as_deref())?;
    let session = PosSession::new(gateway);

    terminal::run(session).await
}
