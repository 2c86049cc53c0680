use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

const DEFAULT_PORT: &str = "8000";
const DEFAULT_STORAGE_DIR: &str = "saved_resumes";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// How a failed mirror write affects a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceMode {
    /// Memory is the source of truth; a failed file write is only logged.
    BestEffort,
    /// The file is written first; a failed write fails the save.
    Strict,
}

impl FromStr for PersistenceMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "best_effort" => Ok(PersistenceMode::BestEffort),
            "strict" => Ok(PersistenceMode::Strict),
            other => bail!("unknown persistence mode '{other}' (expected 'best_effort' or 'strict')"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every value has a default, so the service starts with an empty environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub storage_dir: PathBuf,
    pub persistence: PersistenceMode,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", DEFAULT_PORT)
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            storage_dir: PathBuf::from(env_or("RESUME_STORAGE_DIR", DEFAULT_STORAGE_DIR)),
            persistence: env_or("RESUME_PERSISTENCE", "best_effort")
                .parse()
                .context("RESUME_PERSISTENCE is invalid")?,
            cors_origins: parse_origins(&env_or("CORS_ALLOWED_ORIGINS", DEFAULT_CORS_ORIGINS)),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8000,
            rust_log: "info".to_string(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            persistence: PersistenceMode::BestEffort,
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
