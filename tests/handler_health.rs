mod common;

use axum_test::TestServer;
use std::sync::Arc;

use common::{InMemoryAccessLogRepository, InMemoryRouteRepository};
use link_redirector::domain::audit_worker::FailurePolicy;

#[tokio::test]
async fn test_health_endpoint_success() {
    let app = common::spawn_app_with_routes(vec![]);
    let server = TestServer::new(app.router).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["audit_queue"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_endpoint_degraded_on_store_fault() {
    let app = common::spawn_app(
        Arc::new(InMemoryRouteRepository::failing()),
        Arc::new(InMemoryAccessLogRepository::new()),
        FailurePolicy::Halt,
        false,
    );
    let server = TestServer::new(app.router).unwrap();

    let response = server.get("/health").await;

    response.assert_status_service_unavailable();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "error");
}

#[tokio::test]
async fn test_health_endpoint_degraded_when_worker_stopped() {
    let app = common::spawn_app_with_routes(vec![]);
    app.worker.abort();
    let _ = app.worker.await;

    let server = TestServer::new(app.router).unwrap();

    let response = server.get("/health").await;

    response.assert_status_service_unavailable();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["checks"]["audit_queue"]["status"], "error");
}
