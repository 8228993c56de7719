// src/main.rs

use canvas_grabber::{cli::Cli, logging, run_from_cli, symbols};
use clap::{CommandFactory, FromArgMatches};
use colored::*;
use std::{env, sync::Arc, time::Duration};

#[tokio::main]
async fn main() {
    // Enable ANSI colors on Windows terminals
    #[cfg(windows)]
    {
        colored::control::set_virtual_terminal(true).ok();
    }
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\n{} Interrupted by user.", *symbols::WARN);
            tokio::time::sleep(Duration::from_millis(100)).await;
            std::process::exit(130);
        }
    });

    let bin_name = env::var("CARGO_BIN_NAME").unwrap_or_else(|_| "canvas-grabber".to_string());

    let after_help = format!(
        "Examples:\n  # Fully interactive: prompts for domain, token, course and modules\n  {bin}\n\n  # Download modules 8, 9 and 6 of one course\n  {bin} --domain canvas.odu.edu --course-id 188076 --choices \"8,9,6\"\n\n  # Check access / list content without downloading\n  {bin} --domain canvas.odu.edu --course-id 188076 --check\n  {bin} --domain canvas.odu.edu --course-id 188076 --list",
        bin = bin_name
    );

    let cmd = Cli::command().after_help(after_help);
    let args = match Cli::from_arg_matches(&cmd.get_matches()) {
        Ok(args) => Arc::new(args),
        Err(e) => e.exit(),
    };

    logging::setup_logging(args.log_level);

    if let Err(e) = run_from_cli(args).await {
        log::error!("Run failed: {}", e);
        eprintln!("\n{} {}", *symbols::ERROR, e.to_string().red());
        std::process::exit(e.exit_code());
    }
}
