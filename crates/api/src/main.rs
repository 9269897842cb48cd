use std::env;

use anyhow::Result;
use ghoomo_api::build_app;
use ghoomo_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("ghoomo_api");

    let bind = env::var("GHOOMO_BIND").unwrap_or_else(|_| "0.0.0.0:5001".to_string());

    let app = build_app()?;

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(bind = %bind, "ghoomo ai service started");

    axum::serve(listener, app).await?;
    Ok(())
}
