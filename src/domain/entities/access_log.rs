//! Access-log entity recorded for every redirect request.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use crate::domain::access_event::AccessEvent;

/// Outcome of a redirect request as stored on the access log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessStatus {
    /// A route was found and the client was redirected.
    Success,
    /// No route matched the requested token.
    NotFound,
    /// The request could not be turned into a redirect (undecodable token,
    /// or a location that is not a valid header value).
    BadRequest,
    /// The route store faulted during lookup.
    Error,
}

impl AccessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessStatus::Success => "success",
            AccessStatus::NotFound => "not-found",
            AccessStatus::BadRequest => "bad-request",
            AccessStatus::Error => "error",
        }
    }
}

impl fmt::Display for AccessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A write-once audit record of a single inbound request.
///
/// Never read back by the service. The identity is assigned once, before the
/// first write attempt, so retried inserts cannot produce duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessLog {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub path: String,
    pub origin_ip: String,
    pub http_method: String,
    pub referer: Option<String>,
    pub status: AccessStatus,
}

impl AccessLog {
    /// Builds the record for a queued event, stamped with a new id and the current time.
    pub fn from_event(event: AccessEvent) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            path: event.path,
            origin_ip: event.meta.origin_ip,
            http_method: event.meta.http_method,
            referer: event.meta.referer,
            status: event.status,
        }
    }
}
