use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::config::TonNetwork;

const SETTINGS_FILE: &str = "jetton_burner_settings.json";

/// Directory for settings and the operation log.
pub(crate) fn app_data_dir() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        let app_dir = config_dir.join("jetton-burner");
        if !app_dir.exists() {
            let _ = fs::create_dir_all(&app_dir);
        }
        app_dir
    } else {
        PathBuf::from(".")
    }
}

fn default_toast_secs() -> u64 {
    5
}

fn default_notification_history() -> usize {
    50
}

/// User settings that persist between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Selected network; `None` keeps whatever the environment configured
    #[serde(default)]
    pub selected_network: Option<TonNetwork>,
    /// How long toasts without an explicit duration stay visible (seconds)
    #[serde(default = "default_toast_secs")]
    pub default_toast_secs: u64,
    /// Number of notifications kept in the history window
    #[serde(default = "default_notification_history")]
    pub notification_history: usize,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            selected_network: None,
            default_toast_secs: default_toast_secs(),
            notification_history: default_notification_history(),
        }
    }
}

impl UserSettings {
    fn settings_path() -> PathBuf {
        app_data_dir().join(SETTINGS_FILE)
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::settings_path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(settings) => {
                        tracing::info!("Loaded settings from {:?}", path);
                        return settings;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse settings file: {}", e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read settings file: {}", e);
                }
            }
        }
        tracing::info!("Using default settings");
        Self::default()
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        tracing::info!("Saved settings to {:?}", path);
        Ok(())
    }

    pub fn settings_path_display() -> String {
        Self::settings_path().display().to_string()
    }

    /// Network to use given the one configured from the environment.
    pub fn effective_network(&self, configured: TonNetwork) -> TonNetwork {
        self.selected_network.unwrap_or(configured)
    }
}
