use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use stream_prober::ProbeConfig;
use tracing::debug;

use crate::{
    cli::TestArgs,
    error::{AppError, Result},
};

/// Contents of the optional TOML configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub probe: ProbeSettings,
}

/// `[probe]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    pub concurrency: usize,
    pub timeout_ms: u64,
    pub max_redirects: usize,
    pub fallback_to_get: bool,
    pub user_agent: String,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        let defaults = ProbeConfig::default();
        Self {
            concurrency: defaults.concurrency,
            timeout_ms: defaults.timeout.as_millis() as u64,
            max_redirects: defaults.max_redirects,
            fallback_to_get: defaults.fallback_to_get,
            user_agent: defaults.user_agent,
        }
    }
}

impl AppConfig {
    /// Load from `path`, or defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("cannot read {}: {e}", path.display())))?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| AppError::config(format!("invalid {}: {e}", path.display())))?;

        debug!(path = %path.display(), ?config, "Loaded configuration");
        Ok(config)
    }

    /// Prober settings with command-line overrides applied.
    pub fn probe_config(&self, args: &TestArgs) -> ProbeConfig {
        let settings = &self.probe;
        ProbeConfig::default()
            .with_concurrency(args.concurrency.unwrap_or(settings.concurrency))
            .with_timeout(Duration::from_millis(
                args.timeout_ms.unwrap_or(settings.timeout_ms),
            ))
            .with_max_redirects(args.max_redirects.unwrap_or(settings.max_redirects))
            .with_fallback_to_get(args.get_fallback || settings.fallback_to_get)
            .with_user_agent(settings.user_agent.clone())
    }
}
