//! Service configuration
//!
//! Every section has a working default; environment variables override
//! individual fields:
//! - `HOST`, `PORT`
//! - `OLLAMA_URL`, `OLLAMA_MODEL`, `OLLAMA_TEMPERATURE`
//! - `DATABASE_PATH`, `SEED_ON_STARTUP`
//! - `CASE_INSENSITIVE_COLUMNS` (comma-separated, order preserved)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Language model configuration
    pub llm: LlmConfig,

    /// SQLite configuration
    pub database: DatabaseConfig,

    /// Case-insensitive comparison rewrite
    pub rewrite: RewriteConfig,
}

/// Server configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,

    /// Port
    pub port: u16,
}

/// Language model configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama base URL
    pub base_url: String,

    /// Model name
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,
}

/// Database configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database file
    pub path: PathBuf,

    /// Create the schema and seed sample rows on startup
    pub seed_on_startup: bool,
}

/// Columns whose equality comparisons ignore letter case
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RewriteConfig {
    pub text_columns: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3".to_string(),
            temperature: 0.0,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data.db"),
            seed_on_startup: true,
        }
    }
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            text_columns: vec!["department".to_string(), "name".to_string()],
        }
    }
}

impl ServerConfig {
    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value '{}'", port))?;
        }
        if let Some(url) = lookup("OLLAMA_URL") {
            config.llm.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(model) = lookup("OLLAMA_MODEL") {
            config.llm.model = model;
        }
        if let Some(temperature) = lookup("OLLAMA_TEMPERATURE") {
            config.llm.temperature = temperature
                .trim()
                .parse()
                .with_context(|| format!("Invalid OLLAMA_TEMPERATURE value '{}'", temperature))?;
        }
        if let Some(path) = lookup("DATABASE_PATH") {
            config.database.path = PathBuf::from(path);
        }
        if let Some(seed) = lookup("SEED_ON_STARTUP") {
            config.database.seed_on_startup = matches!(
                seed.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            );
        }
        if let Some(columns) = lookup("CASE_INSENSITIVE_COLUMNS") {
            config.rewrite.text_columns = columns
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect();
        }

        Ok(config)
    }
}
