use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::{
    cache::CacheStore,
    config::Settings,
    error, info,
    scheduler::{Refresher, Watchdog},
    server,
    snapshot::SnapshotStore,
    success,
    types::{Catalog, CatalogOrigin},
    upstream::{self, HttpProbe},
    warning,
};

/// Runs the service until Ctrl+C or SIGTERM.
///
/// Startup warms the cache from the on-disk snapshot, then starts the refresh
/// loop, the connectivity watchdog and the HTTP server. Shutdown stops the
/// loops, lets in-flight requests drain and waits for the watchdog's final
/// snapshot before returning.
pub async fn serve(settings: Settings) {
    let shutdown = CancellationToken::new();
    let signal_task = server::cancel_on(server::shutdown_signal(), shutdown.clone());

    let store = SnapshotStore::new(&settings.snapshot_dir);
    info!("Warming cache from {}", store.dir().display());
    let raw = store.load_all().await;
    let catalog = if raw.is_empty() {
        warning!(
            "No snapshot in {}, serving empty until the first refresh",
            store.dir().display()
        );
        Catalog::default()
    } else {
        Catalog::build(raw, CatalogOrigin::Snapshot)
    };
    let cache = Arc::new(CacheStore::new(catalog));

    let client = match upstream::build_client(settings.fetch_timeout) {
        Ok(client) => client,
        Err(e) => error!("Cannot build HTTP client. Err: {}", e),
    };
    let probe = match HttpProbe::new(
        settings.probe_url.clone(),
        settings.probe_status,
        settings.probe_timeout,
    ) {
        Ok(probe) => probe,
        Err(e) => error!("Cannot build connectivity probe. Err: {}", e),
    };

    let refresher = Refresher::new(client, settings.endpoints.clone(), Arc::clone(&cache));
    let refresh_task =
        tokio::spawn(refresher.run(settings.refresh_interval, shutdown.child_token()));

    let watchdog = Watchdog::new(probe, store, Arc::clone(&cache), settings.snapshot_every);
    let watchdog_task =
        tokio::spawn(watchdog.run(settings.probe_interval, shutdown.child_token()));

    let listener = match TcpListener::bind(&settings.server_address).await {
        Ok(listener) => listener,
        Err(e) => {
            shutdown.cancel();
            error!("Failed to bind {}. Err: {}", settings.server_address, e)
        }
    };
    success!("Server started: http://{}", settings.server_address);

    let router = server::router(
        Arc::clone(&cache),
        &settings.static_dir,
        settings.request_timeout,
    );
    if let Err(e) =
        server::start_api_server(listener, router, shutdown.clone(), settings.shutdown_grace).await
    {
        warning!("Server stopped with error: {}", e);
    }
    shutdown.cancel();
    let _ = signal_task.await;

    if let Err(e) = refresh_task.await {
        warning!("Refresh loop ended abnormally: {}", e);
    }
    if let Err(e) = watchdog_task.await {
        warning!("Watchdog ended abnormally: {}", e);
    }

    success!("Server stopped");
}
