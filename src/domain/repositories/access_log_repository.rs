//! Repository trait for access-log persistence.

use crate::domain::entities::AccessLog;
use crate::error::AppError;
use async_trait::async_trait;

/// Append-only access to the access-log store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAccessLogRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessLogRepository: Send + Sync {
    /// Inserts a single access-log record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, log: &AccessLog) -> Result<(), AppError>;
}
