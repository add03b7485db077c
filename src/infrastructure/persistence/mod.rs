//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! bound parameters.
//!
//! # Repositories
//!
//! - [`PgRouteRepository`] - Route lookup
//! - [`PgAccessLogRepository`] - Access-log writes

pub mod pg_access_log_repository;
pub mod pg_route_repository;

pub use pg_access_log_repository::PgAccessLogRepository;
pub use pg_route_repository::PgRouteRepository;
