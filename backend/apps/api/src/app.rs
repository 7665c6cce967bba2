//! Router Composition
//!
//! Wires the session routes and the gated task routes into one router.

use std::sync::Arc;

use auth::domain::repository::UserRepository;
use auth::{AuthAppState, AuthConfig, access_gate, auth_router};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use platform::password::CredentialHasher;
use task::domain::repository::TaskRepository;
use task::task_router;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn app_router<U, T>(
    users: U,
    tasks: T,
    hasher: Arc<dyn CredentialHasher>,
    auth_config: AuthConfig,
) -> anyhow::Result<Router>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TaskRepository + Clone + Send + Sync + 'static,
{
    let auth_state = AuthAppState::new(users, hasher, auth_config)?;
    let gate = access_gate(&auth_state);

    Ok(Router::new()
        .merge(auth_router(auth_state))
        .merge(task_router(tasks, gate))
        .layer(TraceLayer::new_for_http()))
}

/// CORS for credentialed requests from the listed origins
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_credentials(true)
}
