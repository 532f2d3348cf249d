use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Local checkpoint directory, or a Hugging Face repo id as fallback
    #[serde(default = "default_model_path")]
    pub path: String,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_model_path() -> String {
    "bert_clasificador_espanol".to_string()
}

fn default_max_length() -> usize {
    128
}

fn default_db_path() -> String {
    "data/reviews.db".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            max_length: default_max_length(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml (if present), then apply
    /// environment overrides. A .env file is honoured beforehand.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let mut config: AppConfig = if Path::new("config.toml").exists() {
            let contents = std::fs::read_to_string("config.toml")?;
            toml::from_str(&contents)?
        } else {
            toml::from_str("")?
        };

        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port.parse()?;
        }
        if let Ok(db_path) = std::env::var("DB_DATABASE") {
            config.database.path = db_path;
        }
        if let Ok(model_path) = std::env::var("MODEL_PATH") {
            config.model.path = model_path;
        }

        Ok(config)
    }
}
