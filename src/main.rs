use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use realty_hub::api::{self, AppState};
use realty_hub::config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("realty_hub=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    info!("🏠 Realty Hub API");
    let config = AppConfig::from_env();

    let state = Arc::new(AppState::new(&config).await?);
    info!(
        "Loaded {} listings and {} agents",
        state.store.properties().await.len(),
        state.store.agents().await.len()
    );

    let app = api::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
