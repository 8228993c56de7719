// src/ui.rs

use crate::{constants, symbols};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, IsTerminal, Write};

pub fn print_banner() {
    println!("{}", constants::BANNER.cyan());
    println!(
        "{}\n",
        "Welcome to Canvas Grabber - download course content fast.".dimmed()
    );
}

pub fn print_header(title: &str) {
    println!("\n{}", "═".repeat(constants::UI_WIDTH));
    println!(" {}", title.cyan().bold());
    println!("{}", "═".repeat(constants::UI_WIDTH));
}

pub fn print_sub_header(title: &str) {
    println!("\n--- {} ---", title.bold());
}

pub fn prompt(message: &str, default: Option<&str>) -> io::Result<String> {
    let default_str = default.map_or("".to_string(), |d| format!(" (default: {})", d));
    print!("\n>>> {}{}: ", message, default_str);
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
    }
    let input = input.trim().to_string();
    if input.is_empty() {
        Ok(default.unwrap_or("").to_string())
    } else {
        Ok(input)
    }
}

/// Reads a secret without echo. Returns `None` when stdin is not a terminal.
pub fn prompt_hidden(message: &str) -> io::Result<Option<String>> {
    if !io::stdin().is_terminal() {
        return Ok(None);
    }
    print!("\n>>> {}: ", message);
    io::stdout().flush()?;
    rpassword::read_password().map(|s| Some(s.trim().to_string()))
}

/// Prints a numbered list, one line per option.
pub fn numbered_list(title: &str, options: &[String]) {
    println!("\n{}", title.cyan().bold());
    let pad = options.len().to_string().len().max(2);
    for (i, option) in options.iter().enumerate() {
        println!("  {}. {}", format!("{:>pad$}", i + 1, pad = pad).yellow(), option);
    }
}

/// Asks for one number in `1..=max` until the answer is valid.
pub fn select_one(message: &str, max: usize) -> io::Result<usize> {
    loop {
        let raw = prompt(&format!("{} (press {} to cancel)", message, *symbols::CTRL_C), None)?;
        match raw.parse::<usize>() {
            Ok(n) if (1..=max).contains(&n) => return Ok(n),
            Ok(_) => println!("{}", "Please enter a valid number from the list.".red()),
            Err(_) => println!("{}", "Please enter a valid number.".red()),
        }
    }
}

/// Byte progress bar for one file; a spinner when the size is unknown.
pub fn new_bytes_progress_bar(total: Option<u64>, label: &str) -> ProgressBar {
    let (pbar, template) = match total {
        Some(len) if len > 0 => (
            ProgressBar::new(len),
            "  {msg} [{bar:30.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})",
        ),
        _ => (
            ProgressBar::new_spinner(),
            "  {spinner} {msg} {bytes} ({bytes_per_sec})",
        ),
    };
    if let Ok(style) = ProgressStyle::with_template(template) {
        pbar.set_style(style.progress_chars("=> "));
    }
    pbar.set_message(label.to_string());
    pbar
}
