use crate::constants::{DEFAULT_BASE_URL, DEFAULT_BOT_NAME, DEFAULT_USER_NAME};
use crate::errors::{MiloError, MiloResult};
use once_cell::sync::Lazy;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub user_name: String,
    pub bot_name: String,
    pub log_level: String,
    pub log_dir: PathBuf,
    /// Directory the file picker opens at. Current directory when unset.
    pub picker_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_name: DEFAULT_USER_NAME.to_string(),
            bot_name: DEFAULT_BOT_NAME.to_string(),
            log_level: "info".to_string(),
            log_dir: default_log_dir(),
            picker_root: None,
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

/// Loads (or creates) the config at `~/.config/milo-chat/config.json`.
pub fn initialize_config() -> MiloResult<()> {
    let config_path = get_config_path()?;
    initialize_config_from(&config_path)
}

pub fn initialize_config_from(config_path: &Path) -> MiloResult<()> {
    let mut config = if config_path.exists() {
        let config_str = fs::read_to_string(config_path)
            .map_err(|e| MiloError::config_error(format!("Failed to read config file: {}", e)))?;

        serde_json::from_str::<Config>(&config_str)
            .map_err(|e| MiloError::config_error(format!("Failed to parse config: {}", e)))?
    } else {
        let config = Config::default();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                MiloError::config_error(format!("Failed to create config directory: {}", e))
            })?;
        }

        let config_str = serde_json::to_string_pretty(&config)
            .map_err(|e| MiloError::config_error(format!("Failed to serialize config: {}", e)))?;

        fs::write(config_path, config_str)
            .map_err(|e| MiloError::config_error(format!("Failed to write config file: {}", e)))?;

        config
    };

    apply_env_overrides(&mut config);
    validate_config(&config)?;

    *CONFIG
        .write()
        .map_err(|_| MiloError::config_error("Config lock poisoned"))? = config;

    Ok(())
}

fn get_config_path() -> MiloResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| MiloError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("milo-chat").join("config.json"))
}

fn default_log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("milo-chat")
        .join("logs")
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(url) = env::var("MILO_BASE_URL") {
        config.base_url = url;
    }
    if let Ok(level) = env::var("MILO_LOG_LEVEL") {
        config.log_level = level;
    }
}

fn validate_config(config: &Config) -> MiloResult<()> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| MiloError::config_error(format!("Invalid base_url '{}': {}", config.base_url, e)))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(MiloError::config_error(format!(
            "base_url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.user_name.trim().is_empty() {
        return Err(MiloError::config_error("user_name is required"));
    }

    if config.bot_name.trim().is_empty() {
        return Err(MiloError::config_error("bot_name is required"));
    }

    if config.log_level.trim().is_empty() {
        return Err(MiloError::config_error("log_level is required"));
    }

    Ok(())
}

pub fn get_config() -> Config {
    match CONFIG.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}
