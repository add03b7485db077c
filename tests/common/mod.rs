#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, extract::ConnectInfo};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tower::Layer;

use link_redirector::application::services::{AuditLogger, RouteResolver};
use link_redirector::domain::audit_worker::{
    AuditError, AuditWorker, AuditWorkerSettings, FailurePolicy,
};
use link_redirector::domain::entities::{AccessLog, Route};
use link_redirector::domain::repositories::{AccessLogRepository, RouteRepository};
use link_redirector::error::AppError;
use link_redirector::routes::app_router;
use link_redirector::state::AppState;

pub const PEER_ADDR: &str = "127.0.0.1:12345";

/// Route store kept in insertion order, with an optional injected fault.
#[derive(Default)]
pub struct InMemoryRouteRepository {
    routes: Mutex<Vec<Route>>,
    failing: AtomicBool,
}

impl InMemoryRouteRepository {
    pub fn with_routes(routes: Vec<Route>) -> Self {
        Self {
            routes: Mutex::new(routes),
            failing: AtomicBool::new(false),
        }
    }

    pub fn failing() -> Self {
        Self {
            routes: Mutex::new(Vec::new()),
            failing: AtomicBool::new(true),
        }
    }
}

#[async_trait]
impl RouteRepository for InMemoryRouteRepository {
    async fn find_by_path(&self, path: &str) -> Result<Option<Route>, AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::internal("Database error", json!({})));
        }

        let routes = self.routes.lock().unwrap();
        Ok(routes.iter().find(|r| r.path == path).cloned())
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::internal("Database error", json!({})));
        }
        Ok(())
    }
}

/// Access-log store that records inserts, or fails each one after `delay`.
#[derive(Default)]
pub struct InMemoryAccessLogRepository {
    logs: Mutex<Vec<AccessLog>>,
    failing: bool,
    delay: Duration,
}

impl InMemoryAccessLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(delay: Duration) -> Self {
        Self {
            logs: Mutex::new(Vec::new()),
            failing: true,
            delay,
        }
    }

    pub fn logs(&self) -> Vec<AccessLog> {
        self.logs.lock().unwrap().clone()
    }

    /// Polls until at least `count` records exist or `timeout` elapses.
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> Vec<AccessLog> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let logs = self.logs();
            if logs.len() >= count || tokio::time::Instant::now() >= deadline {
                return logs;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

#[async_trait]
impl AccessLogRepository for InMemoryAccessLogRepository {
    async fn insert(&self, log: &AccessLog) -> Result<(), AppError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.failing {
            return Err(AppError::internal("Database error", json!({})));
        }
        self.logs.lock().unwrap().push(log.clone());
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub logs: Arc<InMemoryAccessLogRepository>,
    pub worker: JoinHandle<Result<(), AuditError>>,
}

pub fn worker_settings(failure_policy: FailurePolicy) -> AuditWorkerSettings {
    AuditWorkerSettings {
        concurrency: 4,
        retries: 1,
        retry_base_delay: Duration::from_millis(1),
        failure_policy,
    }
}

pub fn spawn_app(
    routes: Arc<dyn RouteRepository>,
    logs: Arc<InMemoryAccessLogRepository>,
    failure_policy: FailurePolicy,
    behind_proxy: bool,
) -> TestApp {
    let (tx, rx) = mpsc::channel(100);

    let worker = AuditWorker::new(rx, logs.clone(), worker_settings(failure_policy));
    let worker = tokio::spawn(worker.run());

    let state = AppState::new(
        Arc::new(RouteResolver::new(routes)),
        AuditLogger::new(tx, Duration::from_millis(10)),
        behind_proxy,
    );

    let router = app_router(state).layer(MockConnectInfoLayer);

    TestApp {
        router,
        logs,
        worker,
    }
}

pub fn spawn_app_with_routes(routes: Vec<Route>) -> TestApp {
    spawn_app(
        Arc::new(InMemoryRouteRepository::with_routes(routes)),
        Arc::new(InMemoryAccessLogRepository::new()),
        FailurePolicy::Halt,
        false,
    )
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = PEER_ADDR.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
