use crate::constants::{
    DEFAULT_GOOGLE_PLACES_BASE_URL, DEFAULT_GROQ_BASE_URL, DEFAULT_GROQ_MODEL,
    DEFAULT_UPSTREAM_TIMEOUT_SECONDS,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8001
}

fn default_environment() -> String {
    "development".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GooglePlacesConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_places_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_places_base_url() -> String {
    DEFAULT_GOOGLE_PLACES_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_UPSTREAM_TIMEOUT_SECONDS
}

impl Default for GooglePlacesConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_places_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_groq_base_url")]
    pub base_url: String,
    #[serde(default = "default_groq_model")]
    pub model: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_groq_base_url() -> String {
    DEFAULT_GROQ_BASE_URL.to_string()
}

fn default_groq_model() -> String {
    DEFAULT_GROQ_MODEL.to_string()
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_groq_base_url(),
            model: default_groq_model(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins.
    #[serde(default = "default_origins")]
    pub origins: String,
}

fn default_origins() -> String {
    "http://localhost:3000,http://localhost:8001".to_string()
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: default_origins(),
        }
    }
}

impl CorsConfig {
    pub fn origins_list(&self) -> Vec<String> {
        self.origins
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub google_places: GooglePlacesConfig,
    #[serde(default)]
    pub groq: GroqConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_app_name() -> String {
    "VAMU AI Service".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            server: ServerConfig::default(),
            google_places: GooglePlacesConfig::default(),
            groq: GroqConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

pub fn load_config(config_path: &Path) -> Config {
    let mut config = load_config_file(config_path);
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config
}

fn load_config_file(config_path: &Path) -> Config {
    if !config_path.exists() {
        return Config::default();
    }

    match fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}

/// Environment values win over the file. Unparsable numbers are ignored.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup("PORT").and_then(|v| v.parse().ok()) {
        config.server.port = port;
    }
    if let Some(environment) = lookup("ENVIRONMENT") {
        config.server.environment = environment;
    }
    if let Some(key) = lookup("GOOGLE_PLACES_API_KEY") {
        config.google_places.api_key = key;
    }
    if let Some(url) = lookup("GOOGLE_PLACES_BASE_URL") {
        config.google_places.base_url = url;
    }
    if let Some(key) = lookup("GROQ_API_KEY") {
        config.groq.api_key = key;
    }
    if let Some(url) = lookup("GROQ_BASE_URL") {
        config.groq.base_url = url;
    }
    if let Some(model) = lookup("GROQ_MODEL") {
        config.groq.model = model;
    }
    if let Some(origins) = lookup("CORS_ORIGINS") {
        config.cors.origins = origins;
    }
    if let Some(level) = lookup("LOG_LEVEL") {
        config.logging.level = level.to_lowercase();
    }
}

pub fn save_default_config(config_path: &Path) -> std::io::Result<()> {
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let config = Config::default();
    let yaml = serde_yaml::to_string(&config).map_err(|e| std::io::Error::other(e.to_string()))?;
    fs::write(config_path, yaml)
}
