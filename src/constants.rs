// src/constants.rs

pub const UI_WIDTH: usize = 88;
pub const CONFIG_DIR_NAME: &str = concat!(".", clap::crate_name!());
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = "app.log";
pub const LOG_FALLBACK_FILE_NAME: &str = "fallback.log";
pub const DEFAULT_DOMAIN: &str = "canvas.instructure.com";
pub const DEFAULT_SAVE_DIR_NAME: &str = "Documents";
pub const TOKEN_ENV_VAR: &str = "CANVAS_API_TOKEN";
pub const USER_AGENT: &str = concat!(clap::crate_name!(), "/", clap::crate_version!());

pub const PER_PAGE: &str = "100";
pub const DEFAULT_MAX_PAGES: usize = 1000;
pub const DEFAULT_LIMIT_MODULES: usize = 25;

/// Write buffer used while streaming a file body to disk (256 KiB).
pub const DOWNLOAD_CHUNK_SIZE: usize = 256 * 1024;
/// Wait used for a 429 download response without a usable `Retry-After`.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 3;

pub mod network {
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    pub const API_TIMEOUT_SECS: u64 = 30;
    pub const DOWNLOAD_TIMEOUT_SECS: u64 = 60;
    pub const MAX_RETRIES: u32 = 5;
    pub const RETRY_MIN_BACKOFF_MILLIS: u64 = 1200;
    pub const RETRY_MAX_BACKOFF_SECS: u64 = 30;
}

pub mod item_types {
    pub const FILE: &str = "File";
    pub const PAGE: &str = "Page";
    pub const ASSIGNMENT: &str = "Assignment";
}

pub const BANNER: &str = r#"
  ____                                ____           _     _
 / ___|__ _ _ ____   ____ _ ___     / ___|_ __ __ _| |__ | |__   ___ _ __
| |   / _` | '_ \ \ / / _` / __|   | |  _| '__/ _` | '_ \| '_ \ / _ \ '__|
| |__| (_| | | | \ V / (_| \__ \   | |_| | | | (_| | |_) | |_) |  __/ |
 \____\__,_|_| |_|\_/ \__,_|___/    \____|_|  \__,_|_.__/|_.__/ \___|_|
"#;
