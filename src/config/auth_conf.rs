use std::env;
use tracing::{debug, error, info};

use crate::config::ConfigError;

/// Registration gate configuration.
///
/// The admin secret code authorizes self-registration with the `admin` role.
/// It must be provided explicitly; the server refuses to start with a
/// missing or trivially short code.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub admin_secret_code: String,
}

impl AuthConfig {
    /// Expected environment variables:
    /// - ADMIN_SECRET_CODE: shared code gating admin registration (required, min 12 chars)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading auth configuration from environment variables");

        let admin_secret_code = env::var("ADMIN_SECRET_CODE").map_err(|_| {
            error!("ADMIN_SECRET_CODE environment variable not found");
            ConfigError::EnvVarNotFound("ADMIN_SECRET_CODE".to_string())
        })?;

        if admin_secret_code.len() < 12 {
            error!("ADMIN_SECRET_CODE is too short (minimum 12 characters required)");
            return Err(ConfigError::InvalidValue(
                "ADMIN_SECRET_CODE must be at least 12 characters long".to_string(),
            ));
        }
        debug!(
            "Admin secret code loaded (length: {} chars)",
            admin_secret_code.len()
        );

        Ok(AuthConfig { admin_secret_code })
    }
}
