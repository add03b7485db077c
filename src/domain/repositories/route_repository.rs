//! Repository trait for route lookups.

use crate::domain::entities::Route;
use crate::error::AppError;
use async_trait::async_trait;

/// Read-only access to the route mapping store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRouteRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RouteRepository: Send + Sync {
    /// Finds the route whose `path` equals `path` exactly.
    ///
    /// No normalization is applied. When several routes share the path, the
    /// first one in the store's natural order is returned.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Route))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the store is unreachable or the query fails.
    async fn find_by_path(&self, path: &str) -> Result<Option<Route>, AppError>;

    /// Checks store connectivity.
    async fn ping(&self) -> Result<(), AppError>;
}
