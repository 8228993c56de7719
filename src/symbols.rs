// src/symbols.rs

use colored::{ColoredString, Colorize};
use std::sync::LazyLock;

// --- status prefixes ---
pub static OK: LazyLock<ColoredString> = LazyLock::new(|| "[OK]".green());
pub static ERROR: LazyLock<ColoredString> = LazyLock::new(|| "[X]".red());
pub static INFO: LazyLock<ColoredString> = LazyLock::new(|| "[i]".cyan());
pub static WARN: LazyLock<ColoredString> = LazyLock::new(|| "[!]".yellow());
pub static CTRL_C: LazyLock<ColoredString> = LazyLock::new(|| "Ctrl+C".yellow());

// --- per-file outcomes ---
pub static DOWNLOADED: LazyLock<ColoredString> = LazyLock::new(|| "[+]".green());
pub static SKIPPED: LazyLock<ColoredString> = LazyLock::new(|| "[=]".cyan());
pub static UNAVAILABLE: LazyLock<ColoredString> = LazyLock::new(|| "[-]".dimmed());
pub static FAILED: LazyLock<ColoredString> = LazyLock::new(|| "[X]".red());

// --- listing bullets ---
pub static COURSE: LazyLock<ColoredString> = LazyLock::new(|| "[Course]".cyan().bold());
pub static MODULES: LazyLock<ColoredString> = LazyLock::new(|| "[Modules]".cyan().bold());
pub static FILES: LazyLock<ColoredString> = LazyLock::new(|| "[Files]".cyan().bold());
