mod common;

use std::{
    net::SocketAddr,
    time::{Duration, Instant},
};

use axum::{Router, http::StatusCode, routing::get};
use common::spawn_server;
use groupie_tracker::server;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle, time::sleep};
use tokio_util::sync::CancellationToken;

fn slow_router(delay: Duration) -> Router {
    Router::new().route(
        "/slow",
        get(move || async move {
            sleep(delay).await;
            "done"
        }),
    )
}

async fn start(
    router: Router,
    shutdown: CancellationToken,
    grace: Duration,
) -> (SocketAddr, JoinHandle<std::io::Result<()>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let task = tokio::spawn(server::start_api_server(listener, router, shutdown, grace));
    (addr, task)
}

#[tokio::test]
async fn test_shutdown_lets_in_flight_request_finish() {
    let shutdown = CancellationToken::new();
    let (addr, server_task) = start(
        slow_router(Duration::from_millis(300)),
        shutdown.clone(),
        Duration::from_secs(3),
    )
    .await;

    let request = tokio::spawn(reqwest::get(format!("http://{}/slow", addr)));
    sleep(Duration::from_millis(50)).await;
    shutdown.cancel();

    let response = request.await.unwrap().unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "done");

    tokio::time::timeout(Duration::from_secs(5), server_task)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_shutdown_is_bounded_by_grace() {
    let shutdown = CancellationToken::new();
    let (addr, server_task) = start(
        slow_router(Duration::from_secs(10)),
        shutdown.clone(),
        Duration::from_millis(200),
    )
    .await;

    let _request = tokio::spawn(reqwest::get(format!("http://{}/slow", addr)));
    sleep(Duration::from_millis(50)).await;
    let cancelled_at = Instant::now();
    shutdown.cancel();

    tokio::time::timeout(Duration::from_secs(5), server_task)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    let waited = cancelled_at.elapsed();

    assert!(waited >= Duration::from_millis(150), "returned after {:?}", waited);
    assert!(waited < Duration::from_secs(2), "returned after {:?}", waited);
}

#[tokio::test]
async fn test_idle_server_stops_on_cancel() {
    let shutdown = CancellationToken::new();
    let (_, server_task) = start(
        slow_router(Duration::from_millis(10)),
        shutdown.clone(),
        Duration::from_secs(10),
    )
    .await;

    shutdown.cancel();

    tokio::time::timeout(Duration::from_secs(2), server_task)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_slow_request_times_out() {
    let router = server::with_request_timeout(
        slow_router(Duration::from_secs(5)),
        Duration::from_millis(100),
    );
    let addr = spawn_server(router).await;

    let started = Instant::now();
    let response = reqwest::get(format!("http://{}/slow", addr)).await.unwrap();

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_fast_request_within_timeout() {
    let router = server::with_request_timeout(
        slow_router(Duration::from_millis(10)),
        Duration::from_secs(5),
    );
    let addr = spawn_server(router).await;

    let response = reqwest::get(format!("http://{}/slow", addr)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cancel_on_signal() {
    let token = CancellationToken::new();
    let (tx, rx) = oneshot::channel::<()>();
    let task = server::cancel_on(
        async move {
            let _ = rx.await;
        },
        token.clone(),
    );

    sleep(Duration::from_millis(20)).await;
    assert!(!token.is_cancelled());

    tx.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .unwrap()
        .unwrap();
    assert!(token.is_cancelled());
}

#[tokio::test]
async fn test_cancel_on_ends_when_token_cancelled_elsewhere() {
    let token = CancellationToken::new();
    let task = server::cancel_on(std::future::pending(), token.clone());

    token.cancel();

    tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .unwrap()
        .unwrap();
}
