//! Ponitor HTTP server library.
//!
//! The binary in `main.rs` wires this router to a TCP listener; tests
//! drive the router directly.

pub mod api;
pub mod types;

pub use api::{create_router, AppState};
