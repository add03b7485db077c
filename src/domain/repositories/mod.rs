//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`RouteRepository`] - Read-only route lookup
//! - [`AccessLogRepository`] - Append-only access-log writes

pub mod access_log_repository;
pub mod route_repository;

pub use access_log_repository::AccessLogRepository;
pub use route_repository::RouteRepository;

#[cfg(test)]
pub use access_log_repository::MockAccessLogRepository;
#[cfg(test)]
pub use route_repository::MockRouteRepository;
