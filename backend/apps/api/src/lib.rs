//! Task Tracker API
//!
//! Composition root: configuration and router assembly. The binary in
//! `main.rs` adds the database pool, migrations and the listener.

pub mod app;
pub mod config;

pub use app::{app_router, cors_layer};
pub use config::ApiConfig;
