//! Environment-driven configuration loading.
//!
//! Policy: missing required values are errors, malformed optional values
//! produce a warning and fall back to their default. Every knob can be set
//! through the environment; `.env` is honored when present.

use std::path::PathBuf;

use crate::models::{Config, ConfigWarnings};

/// Fatal problems encountered while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("JWT_SECRET must be set (32+ random bytes recommended)")]
    MissingJwtSecret,

    #[error("invalid {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Result of a load: the config plus any non-fatal warnings.
#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

/// Builder-style loader so tests can inject variables without touching the
/// process environment.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    overrides: Vec<(String, String)>,
    skip_env_file: bool,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide a variable that takes precedence over the environment.
    pub fn with_var(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.overrides.push((key.into(), value.into()));
        self
    }

    /// Skip `.env` discovery; used by tests.
    pub fn without_env_file(mut self) -> Self {
        self.skip_env_file = true;
        self
    }

    fn var(&self, key: &str) -> Option<String> {
        self.overrides
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .or_else(|| std::env::var(key).ok())
            .filter(|v| !v.is_empty())
    }

    pub fn load(self) -> Result<ConfigLoad, ConfigLoadError> {
        let mut config = Config::default();
        let mut warnings = ConfigWarnings::default();

        if !self.skip_env_file {
            config.metadata.env_file_loaded = dotenvy::dotenv().is_ok();
        }

        if let Some(host) = self.var("SERVER_HOST") {
            config.server.host = host;
        }
        if let Some(port) = self.var("SERVER_PORT") {
            match port.parse::<u16>() {
                Ok(port) => config.server.port = port,
                Err(_) => warnings.push_with_hint(
                    format!("SERVER_PORT {port:?} is not a valid port"),
                    format!("falling back to {}", config.server.port),
                ),
            }
        }

        config.database.url = self.var("DATABASE_URL");

        config.dev_mode = self
            .var("KOINONIA_DEV_MODE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        match self.var("JWT_SECRET") {
            Some(secret) => {
                if secret.len() < 16 {
                    warnings.push(
                        "JWT_SECRET is shorter than 16 bytes; tokens are easy to forge",
                    );
                }
                config.auth.jwt_secret = secret;
            }
            None if config.dev_mode => {
                // Dev mode keeps the out-of-box experience working.
                warnings.push_with_hint(
                    "JWT_SECRET not set",
                    "using an insecure dev-mode secret",
                );
                config.auth.jwt_secret = "koinonia-dev-secret".to_string();
            }
            None => return Err(ConfigLoadError::MissingJwtSecret),
        }

        if let Some(ttl) = self.var("ACCESS_TOKEN_TTL_SECS") {
            match ttl.parse::<i64>() {
                Ok(secs) if secs > 0 => {
                    config.auth.access_token_ttl_secs = secs;
                }
                _ => warnings.push(format!(
                    "ACCESS_TOKEN_TTL_SECS {ttl:?} ignored; keeping {}",
                    config.auth.access_token_ttl_secs
                )),
            }
        }
        if let Some(days) = self.var("REFRESH_TOKEN_TTL_DAYS") {
            match days.parse::<i64>() {
                Ok(days) if days > 0 => {
                    config.auth.refresh_token_ttl_days = days;
                }
                _ => warnings.push(format!(
                    "REFRESH_TOKEN_TTL_DAYS {days:?} ignored; keeping {}",
                    config.auth.refresh_token_ttl_days
                )),
            }
        }

        if let Some(dir) = self.var("UPLOAD_DIR") {
            config.media.upload_dir = PathBuf::from(dir);
        }
        if let Some(max) = self.var("MAX_UPLOAD_BYTES") {
            match max.parse::<usize>() {
                Ok(bytes) if bytes > 0 => {
                    config.media.max_upload_bytes = bytes;
                }
                _ => warnings.push(format!(
                    "MAX_UPLOAD_BYTES {max:?} ignored; keeping {}",
                    config.media.max_upload_bytes
                )),
            }
        }

        if let Some(path) = self.var("FFMPEG_PATH") {
            config.broadcast.ffmpeg_path = path;
        }
        if let Some(dir) = self.var("RECORDING_DIR") {
            config.broadcast.recording_dir = PathBuf::from(dir);
        }

        if let Some(origins) = self.var("CORS_ALLOWED_ORIGINS") {
            config.cors.allowed_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }

        Ok(ConfigLoad { config, warnings })
    }
}
