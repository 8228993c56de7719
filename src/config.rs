// src/config.rs

pub mod token;

use self::token::load_or_create_external_config;
use crate::{
    cli::Cli,
    constants::{self, network},
    error::AppResult,
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NetworkConfig {
    pub connect_timeout_secs: Option<u64>,
    pub api_timeout_secs: Option<u64>,
    pub download_timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub max_pages: Option<usize>,
}

/// On-disk settings stored in `~/.canvas-grabber/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExternalConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accesstoken: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default)]
    pub network: NetworkConfig,
}

impl ExternalConfig {
    pub(crate) fn default_app_config() -> Self {
        Self {
            accesstoken: None,
            domain: None,
            network: NetworkConfig {
                connect_timeout_secs: Some(network::CONNECT_TIMEOUT_SECS),
                api_timeout_secs: Some(network::API_TIMEOUT_SECS),
                download_timeout_secs: Some(network::DOWNLOAD_TIMEOUT_SECS),
                max_retries: Some(network::MAX_RETRIES),
                max_pages: Some(constants::DEFAULT_MAX_PAGES),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub user_agent: String,
    pub connect_timeout: Duration,
    /// Idle read timeout for listing and metadata calls.
    pub api_timeout: Duration,
    /// Idle read timeout while streaming file bodies.
    pub download_timeout: Duration,
    pub max_retries: u32,
    pub retry_min_backoff: Duration,
    pub retry_max_backoff: Duration,
    /// Upper bound on pages followed by one paginated listing.
    pub max_pages: usize,
    pub default_domain: Option<String>,
    pub output_root: PathBuf,
    pub numbered_dirs: bool,
}

impl AppConfig {
    pub fn new(args: &Cli) -> AppResult<Self> {
        let external_config = load_or_create_external_config()?;
        let net = external_config.network;

        Ok(Self {
            user_agent: constants::USER_AGENT.into(),
            connect_timeout: Duration::from_secs(
                net.connect_timeout_secs.unwrap_or(network::CONNECT_TIMEOUT_SECS),
            ),
            api_timeout: Duration::from_secs(net.api_timeout_secs.unwrap_or(network::API_TIMEOUT_SECS)),
            download_timeout: Duration::from_secs(
                net.download_timeout_secs.unwrap_or(network::DOWNLOAD_TIMEOUT_SECS),
            ),
            max_retries: net.max_retries.unwrap_or(network::MAX_RETRIES),
            retry_min_backoff: Duration::from_millis(network::RETRY_MIN_BACKOFF_MILLIS),
            retry_max_backoff: Duration::from_secs(network::RETRY_MAX_BACKOFF_SECS),
            max_pages: net.max_pages.unwrap_or(constants::DEFAULT_MAX_PAGES).max(1),
            default_domain: external_config.domain.filter(|d| !d.trim().is_empty()),
            output_root: args.output.clone().unwrap_or_else(default_output_root),
            numbered_dirs: args.numbered_dirs,
        })
    }
}

/// `~/Documents`, or `./Documents` when no home directory is known.
fn default_output_root() -> PathBuf {
    dirs::document_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(constants::DEFAULT_SAVE_DIR_NAME)))
        .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_SAVE_DIR_NAME))
}

#[cfg(feature = "testing")]
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: "test-agent/1.0".to_string(),
            connect_timeout: Duration::from_secs(5),
            api_timeout: Duration::from_secs(15),
            download_timeout: Duration::from_secs(15),
            max_retries: 0,
            retry_min_backoff: Duration::from_millis(10),
            retry_max_backoff: Duration::from_millis(50),
            max_pages: 10,
            default_domain: None,
            output_root: std::env::temp_dir(),
            numbered_dirs: false,
        }
    }
}
