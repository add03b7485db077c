//! PostgreSQL implementation of route repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Route;
use crate::domain::repositories::RouteRepository;
use crate::error::AppError;

/// PostgreSQL repository for route lookups.
pub struct PgRouteRepository {
    pool: Arc<PgPool>,
}

impl PgRouteRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RouteRepository for PgRouteRepository {
    async fn find_by_path(&self, path: &str) -> Result<Option<Route>, AppError> {
        // No ORDER BY: duplicates resolve to the first row the planner yields.
        let route = sqlx::query_as::<_, Route>(
            r#"
            SELECT id, created_at, updated_at, name, target, path
            FROM routes
            WHERE path = $1
            LIMIT 1
            "#,
        )
        .bind(path)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(route)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
