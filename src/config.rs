// src/config.rs
//! Environment-driven configuration. A `.env` file is honored when present;
//! plain environment variables always win.

use std::env;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "DB_PATH";
pub const ENV_REPORT_DIR: &str = "REPORT_DIR";
pub const ENV_LEXICON_PATH: &str = "LEXICON_PATH";

pub const DEFAULT_DB_PATH: &str = "data/rapagem.db";
pub const DEFAULT_REPORT_DIR: &str = "data/reports";

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database produced by the collection pipeline.
    pub db_path: PathBuf,
    /// Directory the CSV reports are written into.
    pub report_dir: PathBuf,
    /// Optional TOML lexicon replacing the built-in Portuguese one.
    pub lexicon_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        // Missing .env is fine; variables may come from the shell.
        let _ = dotenvy::dotenv();

        let db_path = env_path(ENV_DB_PATH).unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));
        let report_dir =
            env_path(ENV_REPORT_DIR).unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_DIR));
        let lexicon_path = env_path(ENV_LEXICON_PATH);

        Self {
            db_path,
            report_dir,
            lexicon_path,
        }
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
