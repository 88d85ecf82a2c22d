use crate::constants::{DEFAULT_API_URL, DEFAULT_LANGUAGE, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::errors::{ChatError, ChatResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub default_language: String,
    pub request_timeout_secs: u64,
    pub csrf_token: Option<String>,
    pub csrf_cookie: Option<String>,
    /// Refuse a new message while a reply is still outstanding.
    pub single_flight: bool,
    pub data_dir: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            csrf_token: None,
            csrf_cookie: None,
            single_flight: false,
            data_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads the config from `CHATBOX_CONFIG` or the default location,
    /// writing a default file when none exists, then applies env overrides.
    pub fn load() -> ChatResult<Self> {
        let _ = dotenv::dotenv();
        let config_path = match env::var("CHATBOX_CONFIG") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_config_path()?,
        };
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides();
        validate_config(&config)?;
        Ok(config)
    }

    pub fn load_from(config_path: &Path) -> ChatResult<Self> {
        if config_path.exists() {
            let config_str = fs::read_to_string(config_path).map_err(|e| {
                ChatError::config_error(format!("Failed to read config file: {}", e))
            })?;
            let config: Config = serde_json::from_str(&config_str)
                .map_err(|e| ChatError::config_error(format!("Failed to parse config: {}", e)))?;
            validate_config(&config)?;
            Ok(config)
        } else {
            let config = Config::default();
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    ChatError::config_error(format!("Failed to create config directory: {}", e))
                })?;
            }
            let config_str = serde_json::to_string_pretty(&config).map_err(|e| {
                ChatError::config_error(format!("Failed to serialize config: {}", e))
            })?;
            fs::write(config_path, config_str).map_err(|e| {
                ChatError::config_error(format!("Failed to write config file: {}", e))
            })?;
            info!("Wrote default config to {}", config_path.display());
            Ok(config)
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var("CHATBOX_API_URL") {
            self.api_url = url;
        }
        if let Ok(token) = env::var("CHATBOX_CSRF_TOKEN") {
            self.csrf_token = Some(token);
        }
        if let Ok(level) = env::var("CHATBOX_LOG_LEVEL") {
            self.log_level = level;
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Where session, preference and log files live.
    pub fn resolve_data_dir(&self) -> ChatResult<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .map(|dir| dir.join("chatbox"))
            .ok_or_else(|| ChatError::config_error("Could not determine data directory"))
    }
}

fn default_config_path() -> ChatResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| ChatError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("chatbox").join("config.json"))
}

pub fn validate_config(config: &Config) -> ChatResult<()> {
    let url = config.api_url.trim();
    if url.is_empty() {
        return Err(ChatError::config_error("api_url is required"));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ChatError::config_error(
            "api_url must start with http:// or https://",
        ));
    }

    if config.default_language.trim().is_empty() {
        return Err(ChatError::config_error("default_language is required"));
    }

    if config.request_timeout_secs == 0 {
        return Err(ChatError::config_error(
            "request_timeout_secs must be greater than 0",
        ));
    }

    Ok(())
}
