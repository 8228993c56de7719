// src/lib.rs

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod downloader;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod models;
pub mod symbols;
pub mod ui;
pub mod utils;
mod workflows;

use crate::{
    api::CanvasApi,
    cli::Cli,
    client::RobustClient,
    config::AppConfig,
    error::{AppError, AppResult},
};
use colored::*;
use log::{debug, info};
use std::sync::Arc;

/// Everything a workflow needs: settings, the authenticated API and the parsed arguments.
#[derive(Clone)]
pub struct RunContext {
    pub config: Arc<AppConfig>,
    pub api: CanvasApi,
    pub args: Arc<Cli>,
}

/// Library entry point called by `main.rs`.
pub async fn run_from_cli(args: Arc<Cli>) -> AppResult<()> {
    // `Cli` carries the token, so only the non-secret parts are logged
    debug!(
        "Mode: check={}, list={}, course_id={:?}, choices={:?}",
        args.check, args.list, args.course_id, args.choices
    );
    let interactive_download = !args.check && !args.list;
    if interactive_download {
        ui::print_banner();
    }

    let config = Arc::new(AppConfig::new(&args)?);
    debug!("Loaded configuration: {:?}", config);

    let domain = resolve_domain(&args, &config)?;
    let base = utils::api_base_url(&domain)?;
    info!("Using Canvas API at {}", base);

    let token = resolve_token_or_prompt(&args)?;
    let http_client = Arc::new(RobustClient::new(config.clone(), &token)?);

    let context = RunContext {
        config,
        api: CanvasApi::new(http_client, base),
        args: args.clone(),
    };

    if args.check {
        workflows::run_check(&context).await
    } else if args.list {
        workflows::run_listing(&context).await
    } else {
        workflows::run_download(&context).await
    }
}

fn resolve_domain(args: &Cli, config: &AppConfig) -> AppResult<String> {
    if let Some(domain) = args.domain.as_deref().filter(|d| !d.trim().is_empty()) {
        return Ok(domain.to_string());
    }
    if let Some(domain) = &config.default_domain {
        debug!("Using domain from config file");
        return Ok(domain.clone());
    }
    let answer = ui::prompt(
        "Canvas domain (e.g., canvas.odu.edu)",
        Some(constants::DEFAULT_DOMAIN),
    )
    .map_err(|e| AppError::UserInputError(format!("No Canvas domain provided ({})", e)))?;
    Ok(answer)
}

fn resolve_token_or_prompt(args: &Cli) -> AppResult<String> {
    let (token, source) = config::token::resolve_token(args.token.as_deref());
    if let Some(token) = token {
        info!("API token loaded from {}", source);
        println!("{} API token loaded from {}.", *symbols::INFO, source);
        return Ok(token);
    }

    info!("No stored API token, asking the user");
    match ui::prompt_hidden("Canvas API token (input hidden)")? {
        Some(token) if !token.is_empty() => Ok(token),
        _ => {
            println!("{}", "No token provided.".red());
            Err(AppError::TokenMissing)
        }
    }
}
