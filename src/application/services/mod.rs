//! Business logic services for the application layer.

pub mod audit_logger;
pub mod resolver;

pub use audit_logger::AuditLogger;
pub use resolver::{RouteResolver, compose_location};
