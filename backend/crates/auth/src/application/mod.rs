//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod credentials;
pub mod log_in;
pub mod sign_up;
pub mod token;

// Re-exports
pub use config::AuthConfig;
pub use credentials::{Credentials, CredentialsValidator, UserCredentialsValidator};
pub use log_in::{LogInOutput, LogInUseCase};
pub use sign_up::{SignUpOutput, SignUpUseCase};
pub use token::{SessionClaims, SessionTokenService, TokenError};
