//! Startup Configuration
//!
//! Read once from the environment in `main`; nothing below the
//! composition root touches environment variables.

use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::{Context, bail};
use auth::AuthConfig;
use platform::password::HashCost;

/// Origin always allowed by CORS (local frontend dev server)
pub const LOCAL_FRONTEND_ORIGIN: &str = "http://localhost:3000";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Process configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    /// Origins allowed to send credentialed requests
    pub allowed_origins: Vec<String>,
    pub hash_cost: HashCost,
    pub auth: AuthConfig,
}

impl ApiConfig {
    /// Load from process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variables; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let database_max_connections =
            parse_or(var("DATABASE_MAX_CONNECTIONS"), "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address such as 0.0.0.0:8080")?;

        let mut allowed_origins = vec![LOCAL_FRONTEND_ORIGIN.to_string()];
        if let Some(fe_url) = var("FE_URL") {
            let fe_url = fe_url.trim().trim_end_matches('/').to_string();
            if !allowed_origins.contains(&fe_url) {
                allowed_origins.push(fe_url);
            }
        }

        let defaults = HashCost::default();
        let hash_cost = HashCost {
            memory_kib: parse_or(var("ARGON2_MEMORY_KIB"), "ARGON2_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_or(var("ARGON2_ITERATIONS"), "ARGON2_ITERATIONS", defaults.iterations)?,
            parallelism: parse_or(
                var("ARGON2_PARALLELISM"),
                "ARGON2_PARALLELISM",
                defaults.parallelism,
            )?,
        };

        let mut auth = match var("SECRET") {
            Some(secret) => AuthConfig::with_secret(secret.into_bytes()),
            None if cfg!(debug_assertions) => {
                tracing::warn!("SECRET not set; using a random signing secret for this process");
                AuthConfig::with_random_secret()
            }
            None => bail!("SECRET must be set"),
        };
        auth.cookie_domain = var("API_DOMAIN");
        auth.cookie_secure = match var("COOKIE_SECURE") {
            Some(v) => parse_bool(&v).context("COOKIE_SECURE must be true or false")?,
            None => !cfg!(debug_assertions),
        };
        auth.password_pepper = var("PASSWORD_PEPPER").map(String::into_bytes);

        Ok(Self {
            database_url,
            database_max_connections,
            bind_addr,
            allowed_origins,
            hash_cost,
            auth,
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(v) => v
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {v}")),
        None => Ok(default),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<ApiConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_minimal_config() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/tasks"),
            ("SECRET", "s3cret"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.allowed_origins, vec![LOCAL_FRONTEND_ORIGIN]);
        assert_eq!(config.hash_cost, HashCost::default());
        assert_eq!(config.auth.token_secret, b"s3cret");
        assert_eq!(config.auth.cookie_domain, None);
    }

    #[test]
    fn test_full_config() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/tasks"),
            ("SECRET", "s3cret"),
            ("API_DOMAIN", "api.example.com"),
            ("FE_URL", "https://app.example.com/"),
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("COOKIE_SECURE", "false"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("ARGON2_MEMORY_KIB", "65536"),
            ("ARGON2_ITERATIONS", "3"),
            ("ARGON2_PARALLELISM", "2"),
            ("PASSWORD_PEPPER", "pepper"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.database_max_connections, 12);
        assert_eq!(
            config.allowed_origins,
            vec![LOCAL_FRONTEND_ORIGIN, "https://app.example.com"]
        );
        assert_eq!(config.auth.cookie_domain.as_deref(), Some("api.example.com"));
        assert!(!config.auth.cookie_secure);
        assert_eq!(config.auth.pepper(), Some(&b"pepper"[..]));
        assert_eq!(
            config.hash_cost,
            HashCost {
                memory_kib: 65536,
                iterations: 3,
                parallelism: 2
            }
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(load(&[("SECRET", "s")]).is_err());
        assert!(
            load(&[
                ("DATABASE_URL", "postgres://localhost/tasks"),
                ("SECRET", "s"),
                ("BIND_ADDR", "not an address"),
            ])
            .is_err()
        );
        assert!(
            load(&[
                ("DATABASE_URL", "postgres://localhost/tasks"),
                ("SECRET", "s"),
                ("ARGON2_ITERATIONS", "many"),
            ])
            .is_err()
        );
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_debug_build_generates_secret() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/tasks")]).unwrap();
        assert_eq!(config.auth.token_secret.len(), 32);
    }
}
