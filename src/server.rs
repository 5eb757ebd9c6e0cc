use std::{
    future::{Future, IntoFuture},
    path::Path,
    sync::Arc,
    time::Duration,
};

use axum::{Extension, Router, routing::get};
use tokio::{net::TcpListener, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tower_http::{services::ServeDir, timeout::TimeoutLayer};
use tracing::{info, warn};

use crate::{api, cache::CacheStore};

pub fn router(cache: Arc<CacheStore>, static_dir: &Path, request_timeout: Duration) -> Router {
    let router = Router::new()
        .route("/", get(api::home))
        .route("/band", get(api::band))
        .route("/search", get(api::search))
        .route("/health", get(api::health))
        .nest_service("/web/static", ServeDir::new(static_dir))
        .fallback(api::not_found)
        .method_not_allowed_fallback(api::method_not_allowed)
        .layer(Extension(cache));

    with_request_timeout(router, request_timeout)
}

/// Answers `408 Request Timeout` for any request `router` takes longer than
/// `timeout` to handle, so a stalled client cannot hold a connection forever.
pub fn with_request_timeout(router: Router, timeout: Duration) -> Router {
    router.layer(TimeoutLayer::new(timeout))
}

/// Serves `router` until `shutdown` is cancelled.
///
/// After cancellation no new connections are accepted and in-flight requests
/// get `grace` to finish before the server future is dropped.
pub async fn start_api_server(
    listener: TcpListener,
    router: Router,
    shutdown: CancellationToken,
    grace: Duration,
) -> std::io::Result<()> {
    let server = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown.clone().cancelled_owned())
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => result,
        _ = async {
            shutdown.cancelled().await;
            tokio::time::sleep(grace).await;
        } => {
            warn!(grace_secs = grace.as_secs(), "in-flight requests did not finish in time");
            Ok(())
        }
    }
}

/// Cancels `token` once `signal` resolves.
///
/// The task also ends, without doing anything, when `token` is cancelled
/// from somewhere else first.
pub fn cancel_on<F>(signal: F, token: CancellationToken) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        tokio::select! {
            _ = signal => {}
            _ = token.cancelled() => return,
        }
        token.cancel();
    })
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C"),
        _ = terminate => info!("received SIGTERM"),
    }
}
