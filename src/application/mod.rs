//! Application layer services implementing business logic.
//!
//! Services consume repository traits and the audit queue and provide a small
//! API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::resolver::RouteResolver`] - Path token resolution and redirect composition
//! - [`services::audit_logger::AuditLogger`] - Non-blocking access-log dispatch

pub mod services;
