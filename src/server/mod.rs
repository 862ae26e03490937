//! Read-only HTTP API over the merged catalog. Records are read from disk per
//! request, so overrides and fresh pipeline output show up without a restart.

pub mod api;
pub mod routes;

use tracing::info;

use crate::config::Config;

pub async fn serve(config: &Config) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!("crabtools server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, routes::router(config)).await
}

pub fn run_server(config: &Config) -> std::io::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(config))
}
