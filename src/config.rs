use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const DATA_DIR_ENV: &str = "LEXICHAIN_DATA_DIR";
const PROGRESS_FILE: &str = "progress.json";

#[derive(Serialize, Deserialize, Default)]
struct Config {
    data_dir: Option<String>,
}

fn get_config_path() -> Result<PathBuf, AppError> {
    let config_dir = dirs::config_dir().ok_or(AppError::IoError(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "Config directory not found",
    )))?;
    let app_config_dir = config_dir.join("lexichain");
    fs::create_dir_all(&app_config_dir)?;
    Ok(app_config_dir.join("config.toml"))
}

pub fn save_data_dir(dir: &str) -> Result<(), AppError> {
    let config_path = get_config_path()?;
    let config = Config {
        data_dir: Some(dir.to_string()),
    };
    let toml_string = toml::to_string(&config)
        .map_err(|_| AppError::IoError(std::io::Error::other("Failed to serialize config")))?;
    fs::write(&config_path, toml_string)?;
    Ok(())
}

/// Resolve the directory the progress file lives in.
pub fn data_dir() -> Result<PathBuf, AppError> {
    // 1. Environment variable wins.
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        let dir = dir.trim();
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    // 2. Then the config file, if one exists and parses.
    if let Ok(config_path) = get_config_path()
        && config_path.exists()
        && let Ok(contents) = fs::read_to_string(&config_path)
        && let Ok(config) = toml::from_str::<Config>(&contents)
        && let Some(dir) = config.data_dir
    {
        return Ok(PathBuf::from(dir));
    }

    // 3. Platform default.
    let base = dirs::data_dir().ok_or(AppError::IoError(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "Data directory not found",
    )))?;
    Ok(base.join("lexichain"))
}

pub fn progress_file_path() -> Result<PathBuf, AppError> {
    Ok(data_dir()?.join(PROGRESS_FILE))
}
