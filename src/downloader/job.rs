// src/downloader/job.rs

use super::{DownloadManager, DownloadStats, FileDownloader};
use crate::{
    api::CanvasApi,
    error::*,
    extractor,
    models::{DownloadOutcome, FileIdSet, api::Module},
    symbols, utils,
};
use colored::*;
use log::{error, info};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Mirrors the files of one selected module into `<course_dir>/<module dir>`.
pub struct ModuleJob<'a> {
    api: &'a CanvasApi,
    course_id: u64,
    course_dir: &'a Path,
    numbered_dirs: bool,
}

impl<'a> ModuleJob<'a> {
    pub fn new(api: &'a CanvasApi, course_id: u64, course_dir: &'a Path, numbered_dirs: bool) -> Self {
        Self {
            api,
            course_id,
            course_dir,
            numbered_dirs,
        }
    }

    pub fn module_title(module: &Module, ordinal: usize) -> String {
        module
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("Module {}", ordinal))
    }

    pub fn module_dir(&self, module: &Module, ordinal: usize) -> PathBuf {
        let dir_name = if self.numbered_dirs {
            ordinal.to_string()
        } else {
            utils::sanitize_filename(&Self::module_title(module, ordinal))
        };
        self.course_dir.join(dir_name)
    }

    /// Runs the module: list items, harvest file ids, download each in ascending order.
    ///
    /// Only item-listing and directory errors are returned. Harvest failures are
    /// recorded on `manager` and per-file failures are counted; both let the
    /// run continue.
    pub async fn run(
        &self,
        module: &Module,
        ordinal: usize,
        manager: &mut DownloadManager,
    ) -> AppResult<DownloadStats> {
        let title = Self::module_title(module, ordinal);
        let module_dir = self.module_dir(module, ordinal);
        fs::create_dir_all(&module_dir)?;

        println!(
            "\n{} {}: {}  {}",
            "->".cyan(),
            "Module".cyan(),
            title,
            format!("(#{})", ordinal).dimmed()
        );
        println!("{} Saving to: {}", *symbols::INFO, module_dir.display());
        info!("Processing module '{}' (id={}) into {:?}", title, module.id, module_dir);

        let mut stats = DownloadStats::default();
        let items = self.api.list_module_items(self.course_id, module.id).await?;
        if items.is_empty() {
            println!("  (This module has no items.)");
            manager.finish_module(&title, stats);
            return Ok(stats);
        }

        let file_ids: FileIdSet = match extractor::harvest_file_ids(&items, self.course_id, self.api).await {
            Ok(ids) => ids,
            Err(e) => {
                error!("Harvesting module '{}' failed: {}", title, e);
                eprintln!("  {} Could not scan module items: {}", *symbols::ERROR, e);
                manager.record_module_failure(&title, &e.to_string());
                return Ok(stats);
            }
        };
        if file_ids.is_empty() {
            println!("  (No downloadable Canvas files found in this module.)");
            manager.finish_module(&title, stats);
            return Ok(stats);
        }
        info!("Module '{}': {} file id(s) to resolve", title, file_ids.len());

        let downloader = FileDownloader::new(self.api);
        for file_id in file_ids {
            let result = downloader.process(file_id, &module_dir).await;
            stats.record(&result.outcome);
            match &result.outcome {
                DownloadOutcome::Downloaded => {
                    println!("  {} {}", result.outcome.symbol(), result.filename)
                }
                DownloadOutcome::Skipped => println!(
                    "  {} {} {}",
                    result.outcome.symbol(),
                    result.filename,
                    "(already synced)".dimmed()
                ),
                DownloadOutcome::Unavailable => {}
                DownloadOutcome::Failed(reason) => {
                    eprintln!(
                        "  {} Failed: {} ({})",
                        result.outcome.symbol(),
                        result.filename,
                        reason.red()
                    );
                    manager.record_failure(&result.filename, reason);
                }
            }
        }

        println!(
            "  {} Module done. Downloaded: {}, skipped: {}",
            *symbols::OK,
            stats.downloaded,
            stats.skipped
        );
        manager.finish_module(&title, stats);
        Ok(stats)
    }
}
