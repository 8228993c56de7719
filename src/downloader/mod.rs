// src/downloader/mod.rs

mod job;
mod task_processor;

pub use job::ModuleJob;
pub use task_processor::{DownloadResult, FileDownloader, is_already_synced};

use crate::{models::DownloadOutcome, symbols, ui};
use colored::*;
use itertools::Itertools;
use log::info;
use std::ops::AddAssign;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DownloadStats {
    pub downloaded: usize,
    pub skipped: usize,
    pub unavailable: usize,
    pub failed: usize,
}

impl DownloadStats {
    pub fn record(&mut self, outcome: &DownloadOutcome) {
        match outcome {
            DownloadOutcome::Downloaded => self.downloaded += 1,
            DownloadOutcome::Skipped => self.skipped += 1,
            DownloadOutcome::Unavailable => self.unavailable += 1,
            DownloadOutcome::Failed(_) => self.failed += 1,
        }
    }
}

impl AddAssign for DownloadStats {
    fn add_assign(&mut self, rhs: Self) {
        self.downloaded += rhs.downloaded;
        self.skipped += rhs.skipped;
        self.unavailable += rhs.unavailable;
        self.failed += rhs.failed;
    }
}

/// Grand totals and failure details for one run.
#[derive(Debug, Default)]
pub struct DownloadManager {
    totals: DownloadStats,
    modules_done: usize,
    failed_downloads: Vec<(String, String)>,
    failed_modules: Vec<(String, String)>,
}

impl DownloadManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_failure(&mut self, filename: &str, reason: &str) {
        log::error!("File '{}' failed: {}", filename, reason);
        self.failed_downloads
            .push((filename.to_string(), reason.to_string()));
    }

    pub fn record_module_failure(&mut self, module: &str, reason: &str) {
        log::error!("Module '{}' failed: {}", module, reason);
        self.failed_modules
            .push((module.to_string(), reason.to_string()));
    }

    pub fn finish_module(&mut self, module: &str, stats: DownloadStats) {
        info!("Module '{}' finished: {:?}", module, stats);
        self.modules_done += 1;
        self.totals += stats;
    }

    pub fn get_stats(&self) -> DownloadStats {
        self.totals
    }

    pub fn did_all_succeed(&self) -> bool {
        self.totals.failed == 0 && self.failed_modules.is_empty()
    }

    pub fn print_report(&self) {
        let stats = self.get_stats();
        info!(
            "Run report: modules={}, downloaded={}, skipped={}, unavailable={}, failed={}, failed modules={}",
            self.modules_done,
            stats.downloaded,
            stats.skipped,
            stats.unavailable,
            stats.failed,
            self.failed_modules.len()
        );

        if !self.failed_downloads.is_empty() || !self.failed_modules.is_empty() {
            ui::print_sub_header("Failure details");
            if !self.failed_modules.is_empty() {
                println!(
                    "\n{} Modules that could not be scanned ({}):",
                    *symbols::ERROR,
                    self.failed_modules.len()
                );
                print_grouped_report(&self.failed_modules, |s| s.red());
            }
            if !self.failed_downloads.is_empty() {
                println!("\n{} Failed files ({}):", *symbols::ERROR, stats.failed);
                print_grouped_report(&self.failed_downloads, |s| s.red());
            }
        }

        ui::print_sub_header("Summary");
        let mut summary = format!(
            "{} | {}",
            format!("Downloaded: {}", stats.downloaded).green(),
            format!("skipped: {}", stats.skipped).yellow(),
        );
        if stats.failed > 0 {
            summary.push_str(&format!(" | {}", format!("failed: {}", stats.failed).red()));
        }
        if stats.unavailable > 0 {
            summary.push_str(&format!(" | {}", format!("locked/unavailable: {}", stats.unavailable).dimmed()));
        }
        println!("{} All done. {}", *symbols::OK, summary);
    }
}

fn print_grouped_report(
    items: &[(String, String)],
    color_fn: fn(ColoredString) -> ColoredString,
) {
    let grouped = items
        .iter()
        .map(|(name, reason)| (reason, name))
        .into_group_map();
    for reason in grouped.keys().sorted() {
        println!("  - {}", color_fn(format!("Reason: {}", reason).into()));
        for name in grouped[reason].iter().sorted() {
            println!("    - {}", name);
        }
    }
}
