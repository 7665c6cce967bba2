//! Task Backend Module
//!
//! Per-user task list behind the session access gate.
//!
//! Clean Architecture structure:
//! - `domain/` - Task entity, title rules, repository trait
//! - `application/` - Use case
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{TaskError, TaskResult};
pub use infra::{InMemoryTaskRepository, PgTaskRepository};
pub use presentation::router::task_router;
