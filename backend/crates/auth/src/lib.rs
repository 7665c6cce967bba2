//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, access gate
//!
//! ## Features
//! - User signup/login with email + password
//! - Stateless HS256 session tokens delivered in an HttpOnly cookie
//! - Access gate middleware for protected route groups
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never logged or returned
//! - Unknown email and wrong password produce the same response
//! - Any token problem (missing, forged, expired) is a uniform 401

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryUserRepository, PgUserRepository};
pub use presentation::middleware::{AccessGateState, AuthenticatedUser, require_session};
pub use presentation::router::{access_gate, auth_router};
pub use presentation::AuthAppState;
