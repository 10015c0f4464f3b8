//! Environment-supplied process configuration.

use anyhow::{bail, Context as _};

use notably_auth::DEFAULT_TTL_SECS;

/// Placeholder secret for local development only.
pub const DEV_JWT_SECRET: &str = "dev-secret-change-me";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Token signing secret (`JWT_SECRET`).
    pub jwt_secret: String,
    /// Cross-origin allow-list (`CORS_ORIGIN`), `*` for permissive.
    pub cors_origin: String,
    /// Token lifetime in seconds (`TOKEN_TTL_SECS`).
    pub token_ttl_secs: i64,
    /// Listen address (`BIND_ADDR`).
    pub bind_addr: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEV_JWT_SECRET.to_string(),
            cors_origin: "*".to_string(),
            token_ttl_secs: DEFAULT_TTL_SECS,
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

impl ApiConfig {
    /// Read configuration from the environment.
    ///
    /// The insecure dev secret is tolerated with a warning, except under
    /// `APP_ENV=production` where a missing or placeholder `JWT_SECRET` is
    /// fatal.
    pub fn from_env() -> anyhow::Result<Self> {
        let production = std::env::var("APP_ENV").is_ok_and(|v| v == "production");

        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() && secret != DEV_JWT_SECRET => secret,
            _ if production => {
                bail!("JWT_SECRET must be set to a real secret when APP_ENV=production")
            }
            _ => {
                tracing::warn!("JWT_SECRET not set; using insecure dev default");
                DEV_JWT_SECRET.to_string()
            }
        };

        let cors_origin = std::env::var("CORS_ORIGIN").unwrap_or_else(|_| "*".to_string());

        let token_ttl_secs = match std::env::var("TOKEN_TTL_SECS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("invalid TOKEN_TTL_SECS: {raw:?}"))?,
            Err(_) => DEFAULT_TTL_SECS,
        };

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        Ok(Self {
            jwt_secret,
            cors_origin,
            token_ttl_secs,
            bind_addr,
        })
    }
}
