use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    /// Root of the static assets: experience.yaml, prompts.yaml, and the
    /// knowledge/ and templates/ directories all live under this path.
    pub assets_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            assets_dir: PathBuf::from(
                std::env::var("ASSETS_DIR").unwrap_or_else(|_| "assets".to_string()),
            ),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn experience_path(&self) -> PathBuf {
        self.assets_dir.join("experience.yaml")
    }

    pub fn prompts_path(&self) -> PathBuf {
        self.assets_dir.join("prompts.yaml")
    }

    pub fn knowledge_dir(&self) -> PathBuf {
        self.assets_dir.join("knowledge")
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.assets_dir.join("templates")
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
