//! HTTP request handlers.

pub mod health;
pub mod redirect;

pub use health::health_handler;
pub use redirect::{NOT_FOUND_BODY, redirect_handler, redirect_head_handler};
