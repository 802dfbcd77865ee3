use std::time::Duration;

use crate::client::error::config::ConfigError;

const BACKEND_URL_VAR: &str = "ZDUNGEON_BACKEND_URL";
const ANON_KEY_VAR: &str = "ZDUNGEON_ANON_KEY";
const POLL_INTERVAL_VAR: &str = "ZDUNGEON_POLL_INTERVAL_SECS";
const PLAYER_ID_VAR: &str = "ZDUNGEON_PLAYER_ID";

/// Runtime configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the managed backend, e.g. `https://project.example.co`
    pub backend_url: String,
    /// Public API key sent with every backend request
    pub anon_key: String,
    /// Overrides the reset poller interval when set
    pub poll_interval: Option<Duration>,
    /// Player whose dungeon progress is summarised on startup
    pub player_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        let backend_url = required(BACKEND_URL_VAR)?;
        if !backend_url.starts_with("http://") && !backend_url.starts_with("https://") {
            return Err(ConfigError::InvalidEnvValue {
                var: BACKEND_URL_VAR.to_string(),
                reason: "must start with http:// or https://".to_string(),
            });
        }

        let anon_key = required(ANON_KEY_VAR)?;

        let poll_interval = match lookup(POLL_INTERVAL_VAR) {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| ConfigError::InvalidEnvValue {
                        var: POLL_INTERVAL_VAR.to_string(),
                        reason: e.to_string(),
                    })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidEnvValue {
                        var: POLL_INTERVAL_VAR.to_string(),
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let player_id = lookup(PLAYER_ID_VAR).filter(|value| !value.trim().is_empty());

        Ok(Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            anon_key,
            poll_interval,
            player_id,
        })
    }
}
