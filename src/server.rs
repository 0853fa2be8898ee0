use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Extension;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::directory::DirectoryProvider;
use crate::routes;

/// Starts the server with the given directory backend.
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(provider: Arc<dyn DirectoryProvider>) -> anyhow::Result<()> {
    let router = routes::handler()
        .layer(Extension(provider))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(5)));

    let addr = SocketAddr::from((
        [0, 0, 0, 0],
        std::env::var("PORT").map_or(Ok(8090), |p| p.parse())?,
    ));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Identity directory started on http://{addr}");

    // ConnectInfo is what lets handlers see the peer address.
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(anyhow::Error::from)
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .unwrap_or_else(|err| tracing::error!("Failed to listen for shutdown signal: {err}"));
}
