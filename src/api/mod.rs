use routes::create_router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

use crate::services::config::AppConfig;

pub mod errors;
pub mod handlers;
pub mod pages;
pub mod routes;

pub async fn api(config: AppConfig) -> anyhow::Result<()> {
    let router = create_router(config);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(&addr).await?;
    info!("Pension calculator listening on http://{}", addr);
    Ok(axum::serve(listener, router.into_make_service()).await?)
}
