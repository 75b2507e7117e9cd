//! User settings stored as settings.json in the app data directory

use crate::constants::*;
use crate::types::ResponseMode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Service
    pub endpoint: String,
    pub response_mode: ResponseMode,

    // Progress animation
    pub tick_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            response_mode: ResponseMode::default(),
            tick_interval_ms: DEFAULT_TICK_MS,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(SETTINGS_FILE);
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join(SETTINGS_FILE);
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        // A zero period would make tokio's interval panic
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

/// `ROAST_ENDPOINT` / `ROAST_MODE` values for this run. Never written to
/// settings.json.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub response_mode: Option<ResponseMode>,
}

impl Overrides {
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut overrides = Self::default();
        if let Some(endpoint) = var(ENV_ENDPOINT).filter(|e| !e.trim().is_empty()) {
            info!(endpoint = %endpoint.trim(), "Endpoint overridden from environment");
            overrides.endpoint = Some(endpoint.trim().to_string());
        }
        if let Some(raw) = var(ENV_MODE) {
            match ResponseMode::parse(&raw) {
                Some(mode) => {
                    info!(mode = mode.label(), "Response mode overridden from environment");
                    overrides.response_mode = Some(mode);
                }
                None => warn!(value = %raw, "Ignoring unknown response mode"),
            }
        }
        overrides
    }

    pub fn endpoint<'a>(&'a self, settings: &'a Settings) -> &'a str {
        self.endpoint.as_deref().unwrap_or(&settings.endpoint)
    }

    pub fn response_mode(&self, settings: &Settings) -> ResponseMode {
        self.response_mode.unwrap_or(settings.response_mode)
    }
}
