//! Domain layer containing business entities and logic.
//!
//! Defines entities, repository interfaces, and the audit pipeline independent
//! of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//! - [`access_event`] - Access event model passed to the audit worker
//! - [`audit_worker`] - Asynchronous access-log writer
//!
//! # Access Logging Flow
//!
//! 1. HTTP handler resolves the requested token
//! 2. [`access_event::AccessEvent`] is sent to a bounded channel
//! 3. [`audit_worker::AuditWorker`] writes events with retry logic
//! 4. Records are persisted via [`repositories::AccessLogRepository`]

pub mod access_event;
pub mod audit_worker;
pub mod entities;
pub mod repositories;
