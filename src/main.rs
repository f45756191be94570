//! OpenForm API - main entry point

use openform_api::config::ServerConfig;
use openform_api::store::FormStore;
use openform_api::{build_router, ApiState};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("OpenForm API v{}", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::from_env()?;
    let bind_addr = config.bind_addr;
    let app = build_router(ApiState { store: FormStore::new(), config });

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("listening on {bind_addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
