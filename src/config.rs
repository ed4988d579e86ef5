use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key} value '{value}': {reason}")]
    Invalid { key: &'static str, value: String, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub actor_buffer: usize,
    pub seed: u64,
    pub sample_products: usize,
    pub session_path: PathBuf,
    pub import_file: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `load` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let actor_buffer: usize = try_load(&lookup, "MARKETPLACE_ACTOR_BUFFER", "32")?;
        if actor_buffer == 0 {
            return Err(ConfigError::Invalid {
                key: "MARKETPLACE_ACTOR_BUFFER",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let import_file = lookup("MARKETPLACE_IMPORT_FILE")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            actor_buffer,
            seed: try_load(&lookup, "MARKETPLACE_SEED", "42")?,
            sample_products: try_load(&lookup, "MARKETPLACE_SAMPLE_PRODUCTS", "24")?,
            session_path: try_load(&lookup, "MARKETPLACE_SESSION_FILE", ".marketplace-session.json")?,
            import_file,
        })
    }
}

fn try_load<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid { key, value, reason: e.to_string() }
    })
}
