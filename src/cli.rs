// src/cli.rs

use crate::constants;
use clap::{ArgAction, Parser, ValueEnum, crate_version};
use std::path::PathBuf;

/// Log file verbosity
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Parser, Debug, Clone)]
#[command(
    version = crate_version!(),
    about,
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true,
)]
#[command(group(
    clap::ArgGroup::new("mode")
        .required(false)
        .args(&["check", "list"]),
))]
pub struct Cli {
    // --- Mode ---
    /// Verify token/domain access for one course and print its details
    #[arg(long, action = ArgAction::SetTrue, requires = "course_id", help_heading = "Mode")]
    pub check: bool,
    /// List modules, module items and files of one course without downloading
    #[arg(long, action = ArgAction::SetTrue, requires = "course_id", help_heading = "Mode")]
    pub list: bool,

    // --- Target ---
    /// Canvas domain, e.g. canvas.odu.edu (a full URL is accepted too)
    #[arg(long, value_name = "DOMAIN", help_heading = "Target")]
    pub domain: Option<String>,
    /// Canvas course ID (prompted from your active courses when omitted)
    #[arg(long, value_name = "ID", help_heading = "Target")]
    pub course_id: Option<u64>,
    /// Canvas API token (falls back to CANVAS_API_TOKEN, the config file, then a hidden prompt)
    #[arg(long, help_heading = "Target")]
    pub token: Option<String>,

    // --- Options ---
    /// Module numbers to download, e.g. "8,9,6" or "5-7"
    #[arg(long, value_name = "SELECTION", help_heading = "Options")]
    pub choices: Option<String>,
    /// Root directory; files land in <OUTPUT>/<Course Name>/<Module Title>/ [default: ~/Documents]
    #[arg(short, long, value_name = "DIR", help_heading = "Options")]
    pub output: Option<PathBuf>,
    /// Name module folders by their number instead of their title
    #[arg(long, action = ArgAction::SetTrue, help_heading = "Options")]
    pub numbered_dirs: bool,
    /// [--list] Maximum number of modules to print
    #[arg(long, default_value_t = constants::DEFAULT_LIMIT_MODULES, value_name = "N", help_heading = "Options")]
    pub limit_modules: usize,

    // --- General ---
    /// Print help and exit
    #[arg(short = 'h', long, action = ArgAction::Help, global = true, help_heading = "General")]
    _help: Option<bool>,
    /// Print version and exit
    #[arg(short = 'V', long, action = ArgAction::Version, global = true, help_heading = "General")]
    _version: Option<bool>,
    /// (hidden) Log file verbosity, for debugging
    #[arg(long, value_enum, default_value_t = LogLevel::Off, global = true, hide = true)]
    pub log_level: LogLevel,
}
