use anyhow::{Context, Result};
use std::path::PathBuf;

const DB_ENV: &str = "FINTRACK_DB";
const LOG_ENV: &str = "FINTRACK_LOG";
const DEFAULT_LOG_FILTER: &str = "fintrack=warn";

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    pub(crate) log_filter: String,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        let db_path = match non_empty_var(DB_ENV) {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };
        let log_filter = resolve_log_filter(non_empty_var(LOG_ENV), non_empty_var("RUST_LOG"));
        Ok(Self {
            db_path,
            log_filter,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn resolve_log_filter(own: Option<String>, rust_log: Option<String>) -> String {
    own.or(rust_log)
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "fintrack", "fintrack")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("fintrack.db"))
}
