//! Route resolution service.

use std::sync::Arc;

use crate::domain::entities::Route;
use crate::domain::repositories::RouteRepository;
use crate::error::AppError;
use serde_json::json;
use tracing::debug;

/// Resolves short path tokens to their stored routes.
///
/// Purely a read: no caching, no normalization of the token.
#[derive(Clone)]
pub struct RouteResolver {
    repository: Arc<dyn RouteRepository>,
}

impl RouteResolver {
    /// Creates a new resolver over a route store.
    pub fn new(repository: Arc<dyn RouteRepository>) -> Self {
        Self { repository }
    }

    /// Looks up the route for `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no route has this exact path.
    /// Returns [`AppError::Internal`] if the store faults; callers must keep
    /// the two apart.
    pub async fn lookup(&self, path: &str) -> Result<Route, AppError> {
        let route = self.repository.find_by_path(path).await?;

        match route {
            Some(route) => {
                debug!(path, target = %route.target, "Route resolved");
                Ok(route)
            }
            None => {
                debug!(path, "No route for path");
                Err(AppError::not_found(
                    "Route not found",
                    json!({ "path": path }),
                ))
            }
        }
    }

    /// Checks that the route store is reachable.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

/// Builds the redirect location for a resolved route.
///
/// Plain concatenation: no separator is inserted, nothing is escaped or
/// validated. An empty `query` yields `target` unchanged.
pub fn compose_location(target: &str, query: &str) -> String {
    let mut location = String::with_capacity(target.len() + query.len());
    location.push_str(target);
    location.push_str(query);
    location
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockRouteRepository;

    #[test]
    fn test_compose_appends_query_verbatim() {
        assert_eq!(
            compose_location("https://example.com/x", "?y=1"),
            "https://example.com/x?y=1"
        );
        assert_eq!(compose_location("https://golang.org", "/doc"), "https://golang.org/doc");
    }

    #[test]
    fn test_compose_empty_query_is_identity() {
        assert_eq!(compose_location("https://example.com", ""), "https://example.com");
    }

    #[test]
    fn test_compose_does_not_insert_separators() {
        assert_eq!(
            compose_location("https://example.com/?a=1", "b=2"),
            "https://example.com/?a=1b=2"
        );
        assert_eq!(compose_location("", "?q"), "?q");
    }

    #[tokio::test]
    async fn test_lookup_found() {
        let mut mock_repo = MockRouteRepository::new();

        let route = Route::new("golang", "go", "https://golang.org");
        let expected = route.clone();
        mock_repo
            .expect_find_by_path()
            .withf(|path| path == "go")
            .times(1)
            .returning(move |_| Ok(Some(route.clone())));

        let resolver = RouteResolver::new(Arc::new(mock_repo));

        let result = resolver.lookup("go").await;

        assert_eq!(result.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_lookup_not_found() {
        let mut mock_repo = MockRouteRepository::new();
        mock_repo
            .expect_find_by_path()
            .times(1)
            .returning(|_| Ok(None));

        let resolver = RouteResolver::new(Arc::new(mock_repo));

        let result = resolver.lookup("missing").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_lookup_store_fault_is_not_not_found() {
        let mut mock_repo = MockRouteRepository::new();
        mock_repo
            .expect_find_by_path()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let resolver = RouteResolver::new(Arc::new(mock_repo));

        let result = resolver.lookup("go").await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_lookup_passes_token_unmodified() {
        let mut mock_repo = MockRouteRepository::new();
        mock_repo
            .expect_find_by_path()
            .withf(|path| path == "Go/")
            .times(1)
            .returning(|_| Ok(None));

        let resolver = RouteResolver::new(Arc::new(mock_repo));

        assert!(resolver.lookup("Go/").await.is_err());
    }
}
