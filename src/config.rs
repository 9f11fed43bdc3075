use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::utils;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the todo service
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default = "default_current_theme")]
    pub current_theme: String,
    #[serde(default)]
    pub themes: HashMap<String, Theme>,
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_quit")]
    pub quit: String,
    #[serde(default = "default_add")]
    pub add: String,
    #[serde(default = "default_edit")]
    pub edit: String,
    #[serde(default = "default_delete")]
    pub delete: String,
    #[serde(default = "default_toggle")]
    pub toggle: String,
    #[serde(default = "default_refresh")]
    pub refresh: String,
    #[serde(default = "default_copy")]
    pub copy: String,
    #[serde(default = "default_save")]
    pub save: String,
    #[serde(default = "default_select")]
    pub select: String,
    #[serde(default = "default_help")]
    pub help: String,
    #[serde(default = "default_list_up")]
    pub list_up: String,
    #[serde(default = "default_list_down")]
    pub list_down: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_fg")]
    pub fg: String,
    #[serde(default = "default_bg")]
    pub bg: String,
    #[serde(default = "default_highlight_bg")]
    pub highlight_bg: String,
    #[serde(default = "default_highlight_fg")]
    pub highlight_fg: String,
    #[serde(default = "default_success_fg")]
    pub success_fg: String,
    #[serde(default = "default_error_fg")]
    pub error_fg: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            key_bindings: KeyBindings::default(),
            current_theme: default_current_theme(),
            themes: HashMap::new(),
            config_version: Some(CURRENT_CONFIG_VERSION),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            add: default_add(),
            edit: default_edit(),
            delete: default_delete(),
            toggle: default_toggle(),
            refresh: default_refresh(),
            copy: default_copy(),
            save: default_save(),
            select: default_select(),
            help: default_help(),
            list_up: default_list_up(),
            list_down: default_list_down(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: default_fg(),
            bg: default_bg(),
            highlight_bg: default_highlight_bg(),
            highlight_fg: default_highlight_fg(),
            success_fg: default_success_fg(),
            error_fg: default_error_fg(),
        }
    }
}

impl Theme {
    /// Get preset themes that are always available
    pub fn get_preset_themes() -> HashMap<String, Theme> {
        let mut themes = HashMap::new();

        themes.insert("default".to_string(), Theme::default());

        themes.insert(
            "dark".to_string(),
            Theme {
                fg: "white".to_string(),
                bg: "black".to_string(),
                highlight_bg: "cyan".to_string(),
                highlight_fg: "black".to_string(),
                success_fg: "lightgreen".to_string(),
                error_fg: "lightred".to_string(),
            },
        );

        themes.insert(
            "light".to_string(),
            Theme {
                fg: "black".to_string(),
                bg: "white".to_string(),
                highlight_bg: "blue".to_string(),
                highlight_fg: "white".to_string(),
                success_fg: "green".to_string(),
                error_fg: "red".to_string(),
            },
        );

        themes.insert(
            "monochrome".to_string(),
            Theme {
                fg: "white".to_string(),
                bg: "black".to_string(),
                highlight_bg: "white".to_string(),
                highlight_fg: "black".to_string(),
                success_fg: "white".to_string(),
                error_fg: "gray".to_string(),
            },
        );

        themes
    }
}

// Default value functions
fn default_server_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_quit() -> String {
    "q".to_string()
}

fn default_add() -> String {
    "a".to_string()
}

fn default_edit() -> String {
    "e".to_string()
}

fn default_delete() -> String {
    "d".to_string()
}

fn default_toggle() -> String {
    "Space".to_string()
}

fn default_refresh() -> String {
    "r".to_string()
}

fn default_copy() -> String {
    "y".to_string()
}

fn default_save() -> String {
    "Ctrl+s".to_string()
}

fn default_select() -> String {
    "Enter".to_string()
}

fn default_help() -> String {
    "F1".to_string()
}

fn default_list_up() -> String {
    "k".to_string()
}

fn default_list_down() -> String {
    "j".to_string()
}

fn default_current_theme() -> String {
    "default".to_string()
}

fn default_fg() -> String {
    "white".to_string()
}

fn default_bg() -> String {
    "black".to_string()
}

fn default_highlight_bg() -> String {
    "blue".to_string()
}

fn default_highlight_fg() -> String {
    "white".to_string()
}

fn default_success_fg() -> String {
    "green".to_string()
}

fn default_error_fg() -> String {
    "red".to_string()
}

fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize TOML: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
}

impl Config {
    /// Load configuration from file, or create default if missing
    pub fn load_with_profile(profile: utils::Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::ReadError(e.to_string()))?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            let mut config = Config::default();
            config.save_with_profile(profile)?;
            Ok(config)
        }
    }

    /// Load configuration from file, using production profile
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_profile(utils::Profile::Prod)
    }

    /// Save configuration to file
    pub fn save_with_profile(&mut self, profile: utils::Profile) -> Result<(), ConfigError> {
        self.config_version = Some(CURRENT_CONFIG_VERSION);

        let config_path = Self::get_config_path(profile)?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        Ok(())
    }

    fn get_config_path(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile)
            .ok_or_else(|| ConfigError::ConfigDirError("No config directory found".to_string()))?;
        Ok(config_dir.join("config.toml"))
    }

    /// Resolve the active theme: user-defined themes shadow presets,
    /// unknown names fall back to the default theme.
    pub fn get_active_theme(&self) -> Theme {
        if let Some(theme) = self.themes.get(&self.current_theme) {
            return theme.clone();
        }
        Theme::get_preset_themes()
            .remove(&self.current_theme)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server_url, "http://localhost:8000");
        assert_eq!(config.key_bindings.quit, "q");
        assert_eq!(config.current_theme, "default");
    }

    #[test]
    fn partial_config_overrides_only_named_fields() {
        let config: Config = toml::from_str(
            r#"
            server_url = "http://10.0.0.5:8000"

            [key_bindings]
            quit = "x"
            "#,
        )
        .unwrap();
        assert_eq!(config.server_url, "http://10.0.0.5:8000");
        assert_eq!(config.key_bindings.quit, "x");
        assert_eq!(config.key_bindings.add, "a");
    }

    #[test]
    fn user_theme_shadows_preset() {
        let mut config = Config::default();
        config.themes.insert(
            "default".to_string(),
            Theme {
                fg: "cyan".to_string(),
                ..Theme::default()
            },
        );
        assert_eq!(config.get_active_theme().fg, "cyan");
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let mut config = Config::default();
        config.current_theme = "no-such-theme".to_string();
        assert_eq!(config.get_active_theme().fg, "white");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.server_url, config.server_url);
        assert_eq!(parsed.key_bindings.save, config.key_bindings.save);
    }
}
