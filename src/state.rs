//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AuditLogger, RouteResolver};

/// Handles every request handler needs.
///
/// Store access is injected through the services; there is no global connection.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<RouteResolver>,
    pub audit_logger: AuditLogger,
    /// When true, the origin IP is read from `X-Forwarded-For` / `X-Real-IP`.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(resolver: Arc<RouteResolver>, audit_logger: AuditLogger, behind_proxy: bool) -> Self {
        Self {
            resolver,
            audit_logger,
            behind_proxy,
        }
    }
}
