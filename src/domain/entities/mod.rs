//! Core domain entities representing the persisted data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`Route`] - A mapping from a short path token to a redirect target
//! - [`AccessLog`] - An append-only audit record of one redirect request
//! - [`AccessStatus`] - Outcome vocabulary stored on access logs

pub mod access_log;
pub mod route;

pub use access_log::{AccessLog, AccessStatus};
pub use route::Route;
