//! Auth Router

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::AccessGateState;

/// Create the session router (`/signup`, `/login`, `/logout`)
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/login", post(handlers::log_in::<R>))
        .route("/logout", post(handlers::log_out::<R>))
        .with_state(state)
}

/// Gate state sharing the router's token service and config
pub fn access_gate<R>(state: &AuthAppState<R>) -> AccessGateState
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    AccessGateState {
        config: Arc::clone(&state.config),
        tokens: Arc::clone(&state.tokens),
    }
}
