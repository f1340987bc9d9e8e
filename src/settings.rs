use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::tree::SelectionMode;
use dirs_next::config_dir;

pub const APP_NAME: &str = "bot-workspace-ui";
const SETTINGS_FILE: &str = "settings.json";
const DEFAULT_EXPORT_TIMEOUT_SECS: u64 = 20 * 60;

const ENV_API_URL: &str = "BOT_WORKSPACE_API_URL";
const ENV_BOT_ID: &str = "BOT_WORKSPACE_BOT_ID";
const ENV_TOKEN: &str = "BOT_WORKSPACE_TOKEN";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub bot_id: String,
    /// Label of the bot-scoped section in the navigator.
    pub bot_name: String,
    pub auth_token: Option<String>,
    pub workspace_id: Option<String>,
    pub export_timeout_secs: u64,
    pub selection_mode: SelectionMode,
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000/api/v2".to_string(),
            bot_id: "welcome-bot".to_string(),
            bot_name: "welcome-bot".to_string(),
            auth_token: None,
            workspace_id: Some("default".to_string()),
            export_timeout_secs: DEFAULT_EXPORT_TIMEOUT_SECS,
            selection_mode: SelectionMode::default(),
            config_path: None,
        }
    }
}

impl Settings {
    pub fn new(config_path: PathBuf) -> Self {
        Self {
            config_path: Some(config_path),
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub async fn save(&self) -> std::io::Result<()> {
        if let Some(path) = &self.config_path {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            let json = serde_json::to_string_pretty(self)?;
            tokio::fs::write(path, json).await?;
        }
        Ok(())
    }

    pub async fn load(path: &PathBuf) -> std::io::Result<Self> {
        if path.exists() {
            let json = tokio::fs::read_to_string(path).await?;
            let mut settings: Self = serde_json::from_str(&json)?;
            settings.config_path = Some(path.clone());
            Ok(settings)
        } else {
            Ok(Self::new(path.clone()))
        }
    }

    /// Loads the settings file from the user config dir, then applies
    /// environment overrides.
    pub async fn load_default() -> std::io::Result<Self> {
        let mut settings = Self::load(&Self::config_path()).await?;
        settings.apply_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Some(bot_id) = lookup(ENV_BOT_ID) {
            self.bot_id = bot_id;
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            self.auth_token = Some(token);
        }
    }

    pub fn config_dir() -> PathBuf {
        config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join(SETTINGS_FILE)
    }
}
