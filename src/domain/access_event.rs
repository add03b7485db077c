//! Access event model for asynchronous audit logging.

use crate::domain::entities::AccessStatus;

/// Request metadata captured verbatim from the inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMeta {
    pub origin_ip: String,
    pub http_method: String,
    pub referer: Option<String>,
}

impl RequestMeta {
    pub fn new(
        origin_ip: impl Into<String>,
        http_method: impl Into<String>,
        referer: Option<&str>,
    ) -> Self {
        Self {
            origin_ip: origin_ip.into(),
            http_method: http_method.into(),
            referer: referer.map(|s| s.to_string()),
        }
    }
}

/// An in-memory representation of one redirect request and its outcome.
///
/// Passed from the redirect handler to the background audit worker through a
/// bounded channel, so the HTTP response never waits on the log store.
///
/// # Usage Flow
///
/// 1. Created in the redirect handler once the lookup outcome is known
/// 2. Enqueued via [`crate::application::services::AuditLogger::record`]
/// 3. Consumed by [`crate::domain::audit_worker::AuditWorker`]
/// 4. Converted to [`crate::domain::entities::AccessLog`] for persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessEvent {
    pub path: String,
    pub meta: RequestMeta,
    pub status: AccessStatus,
}

impl AccessEvent {
    pub fn new(path: String, meta: RequestMeta, status: AccessStatus) -> Self {
        Self { path, meta, status }
    }
}
