//! Route entity representing a short path token mapping.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A persisted mapping from a short path token to a destination.
///
/// Routes are created and updated by an external management interface;
/// this service only reads them. `path` is expected to be unique but the
/// store does not enforce it.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Route {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub target: String,
    pub path: String,
}

impl Route {
    /// Creates a new Route instance with a fresh identity.
    pub fn new(name: impl Into<String>, path: impl Into<String>, target: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            name: name.into(),
            target: target.into(),
            path: path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_creation() {
        let route = Route::new("golang", "go", "https://golang.org");

        assert_eq!(route.name, "golang");
        assert_eq!(route.path, "go");
        assert_eq!(route.target, "https://golang.org");
        assert_eq!(route.created_at, route.updated_at);
    }

    #[test]
    fn test_routes_get_distinct_ids() {
        let a = Route::new("a", "a", "https://a.example");
        let b = Route::new("a", "a", "https://a.example");

        assert_ne!(a.id, b.id);
    }
}
