//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors go through
//! `kernel::error::AppError`.

use std::sync::Arc;

use api::{ApiConfig, app_router, cors_layer};
use auth::PgUserRepository;
use platform::password::{Argon2Hasher, CredentialHasher};
use sqlx::postgres::PgPoolOptions;
use task::PgTaskRepository;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,task=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Password hashing
    let mut hasher = Argon2Hasher::new(config.hash_cost)?;
    if let Some(pepper) = config.auth.pepper() {
        hasher = hasher.with_pepper(pepper.to_vec());
    }
    let hasher: Arc<dyn CredentialHasher> = Arc::new(hasher);

    // Build router
    let app = app_router(
        PgUserRepository::new(pool.clone()),
        PgTaskRepository::new(pool),
        hasher,
        config.auth.clone(),
    )?
    .layer(cors_layer(&config.allowed_origins));

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
