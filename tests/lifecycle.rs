//! Graceful shutdown behavior.

use std::time::{Duration, Instant};

use axum::routing::get;
use axum::Router;
use reqwest::StatusCode;
use tokio::net::TcpListener;

use commerce_api::http::HttpServer;
use commerce_api::lifecycle::shutdown::{self, ShutdownError};
use commerce_api::lifecycle::Shutdown;
use commerce_api::RouteGroup;

mod common;

#[tokio::test]
async fn shutdown_waits_for_in_flight_requests() {
    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_millis(500)).await;
        "done"
    }
    let slow_routes: Router = Router::new().route("/{id}", get(slow));

    let mut server = HttpServer::new(common::test_config(), "/api/v1");
    server.setup_routes(RouteGroup::new(
        Some(slow_routes),
        common::stub_route_group().product,
    ));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    let server_task = tokio::spawn(async move { server.run(listener, shutdown_rx).await });

    let client = common::client();
    let request = tokio::spawn(async move {
        client
            .get(format!("http://{addr}/api/v1/orders/1"))
            .send()
            .await
    });

    // Let the request reach the slow handler, then ask the server to stop.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let started = Instant::now();
    shutdown.trigger();

    let response = request.await.unwrap().unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "done");

    let run_result = tokio::time::timeout(Duration::from_secs(5), server_task)
        .await
        .expect("server should drain well before the deadline")
        .unwrap();
    assert!(run_result.is_ok());

    // The drain waited for the handler rather than returning immediately.
    assert!(started.elapsed() >= Duration::from_millis(300));
}

#[tokio::test]
async fn drain_deadline_abandons_stuck_requests() {
    async fn stuck() -> &'static str {
        tokio::time::sleep(Duration::from_secs(60)).await;
        "too late"
    }
    let stuck_routes: Router = Router::new().route("/{id}", get(stuck));

    let mut server = HttpServer::new(common::test_config(), "/api/v1");
    server.setup_routes(RouteGroup::new(
        Some(stuck_routes),
        common::stub_route_group().product,
    ));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    let server_task = tokio::spawn(async move {
        let _ = server.run(listener, shutdown_rx).await;
    });

    let client = common::client();
    let _request = tokio::spawn(async move {
        let _ = client
            .get(format!("http://{addr}/api/v1/orders/1"))
            .send()
            .await;
    });

    // Let the request reach the stuck handler, then ask the server to stop.
    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown.trigger();

    let err = shutdown::drain(server_task, Duration::from_millis(200))
        .await
        .expect_err("a stuck request must trip the drain deadline");
    assert!(matches!(err, ShutdownError::Timeout(_)));
}

#[tokio::test]
async fn shutdown_stops_accepting_new_connections() {
    let mut server = HttpServer::new(common::test_config(), "/api/v1");
    server.setup_routes(common::stub_route_group());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    let server_task = tokio::spawn(async move { server.run(listener, shutdown_rx).await });

    let client = common::client();
    let res = client
        .get(format!("http://{addr}/api/v1/orders/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), server_task)
        .await
        .expect("server should stop promptly")
        .unwrap()
        .unwrap();

    let err = client
        .get(format!("http://{addr}/api/v1/orders/1"))
        .send()
        .await;
    assert!(err.is_err(), "stopped server should refuse connections");
}
