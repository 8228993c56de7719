// src/config/token.rs

use crate::{
    config::ExternalConfig,
    constants,
    error::{AppError, AppResult},
};
use anyhow::{Context, anyhow};
use log::{debug, info};
use std::{fs, path::PathBuf};

pub(super) fn get_config_path() -> AppResult<PathBuf> {
    let path = dirs::home_dir()
        .ok_or_else(|| AppError::Other(anyhow!("Could not determine the home directory")))?
        .join(constants::CONFIG_DIR_NAME)
        .join(constants::CONFIG_FILE_NAME);
    Ok(path)
}

pub(crate) fn load_or_create_external_config() -> AppResult<ExternalConfig> {
    let config_path = get_config_path()?;
    if config_path.is_file() {
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file '{}'", config_path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", config_path.display()))
            .map_err(AppError::from)
    } else {
        info!("Config file {:?} not found, writing defaults.", config_path);
        let config = ExternalConfig::default_app_config();

        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir)?;
        }

        let json_content = serde_json::to_string_pretty(&config)?;
        fs::write(&config_path, json_content)?;

        Ok(config)
    }
}

pub fn load_token_from_config() -> Option<String> {
    load_or_create_external_config()
        .ok()
        .and_then(|config| config.accesstoken)
}

/// Resolves the API token without prompting.
/// Returns the token (if any) and a human-readable description of where it came from.
pub fn resolve_token(cli_token: Option<&str>) -> (Option<String>, String) {
    if let Some(token) = cli_token.map(str::trim)
        && !token.is_empty()
    {
        debug!("Using token from command line argument");
        return (Some(token.to_string()), "command line argument".to_string());
    }
    if let Ok(token) = std::env::var(constants::TOKEN_ENV_VAR)
        && !token.trim().is_empty()
    {
        debug!("Using token from environment variable {}", constants::TOKEN_ENV_VAR);
        return (
            Some(token.trim().to_string()),
            format!("environment variable ({})", constants::TOKEN_ENV_VAR),
        );
    }
    if let Some(token) = load_token_from_config()
        && !token.trim().is_empty()
    {
        debug!("Using token from local config file");
        return (Some(token.trim().to_string()), "local config file".to_string());
    }
    debug!("No token found in any location");
    (None, "not found".to_string())
}
