// src/downloader/task_processor.rs

use crate::{
    api::CanvasApi,
    constants,
    error::*,
    models::{DownloadOutcome, FileId, FileMetadata},
    ui, utils,
};
use futures::StreamExt;
use log::{debug, info, warn};
use reqwest::{Response, StatusCode, header};
use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    time::Duration,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    pub filename: String,
    pub outcome: DownloadOutcome,
}

/// True when `target` exists with exactly `expected_size` bytes.
///
/// An unknown remote size (0) never counts as synced.
pub fn is_already_synced(target: &Path, expected_size: u64) -> bool {
    expected_size > 0
        && fs::metadata(target).is_ok_and(|m| m.is_file() && m.len() == expected_size)
}

/// Resolves and downloads single files into a directory.
pub struct FileDownloader<'a> {
    api: &'a CanvasApi,
}

impl<'a> FileDownloader<'a> {
    pub fn new(api: &'a CanvasApi) -> Self {
        Self { api }
    }

    /// Resolves metadata for `file_id` and mirrors it into `dir`.
    ///
    /// Never fails: errors become [`DownloadOutcome::Failed`] so the caller
    /// can move on to the next file.
    pub async fn process(&self, file_id: FileId, dir: &Path) -> DownloadResult {
        let mut filename = format!("file_{}", file_id);
        let outcome = self
            .resolve_and_download(file_id, dir, &mut filename)
            .await
            .unwrap_or_else(|e| {
                warn!("Download of file {} failed: {}", file_id, e);
                DownloadOutcome::Failed(e.to_string())
            });
        DownloadResult { filename, outcome }
    }

    async fn resolve_and_download(
        &self,
        file_id: FileId,
        dir: &Path,
        filename: &mut String,
    ) -> AppResult<DownloadOutcome> {
        let Some(meta) = self.api.get_file_metadata(file_id).await? else {
            info!("File {} is locked (403), skipping", file_id);
            return Ok(DownloadOutcome::Unavailable);
        };
        filename.clone_from(&meta.display_name);
        self.download(&meta, dir).await
    }

    /// Applies the skip rule, then streams the file to `dir/<sanitized name>`.
    pub async fn download(&self, meta: &FileMetadata, dir: &Path) -> AppResult<DownloadOutcome> {
        let Some(url) = meta.url.as_deref() else {
            info!("File {} ('{}') has no download URL", meta.id, meta.display_name);
            return Ok(DownloadOutcome::Unavailable);
        };

        let target = dir.join(utils::sanitize_filename(&meta.display_name));
        if is_already_synced(&target, meta.size) {
            debug!("'{}' already present with {} bytes", target.display(), meta.size);
            return Ok(DownloadOutcome::Skipped);
        }

        self.stream_to_file(url, &target).await?;
        Ok(DownloadOutcome::Downloaded)
    }

    /// GETs `url` and writes the body to `target`.
    ///
    /// A 429 response gets exactly one more attempt after the `Retry-After`
    /// delay. The body goes to a temporary file next to `target` that replaces
    /// it only once the stream completes.
    async fn stream_to_file(&self, url: &str, target: &Path) -> AppResult<PathBuf> {
        let client = self.api.client();
        let mut res = client.download_request(url).send().await?;
        if res.status() == StatusCode::TOO_MANY_REQUESTS {
            let wait = retry_after(&res);
            warn!("429 for '{}', retrying once in {:?}", target.display(), wait);
            drop(res);
            tokio::time::sleep(wait).await;
            res = client.download_request(url).send().await?;
        }
        let res = res.error_for_status()?;

        let dir = target.parent().unwrap_or_else(|| Path::new("."));
        let mut builder = tempfile::Builder::new();
        builder.prefix(".canvas-grabber-").suffix(".part");
        // plain-create mode; the process umask still applies
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let temp = builder.tempfile_in(dir)?;

        let label = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let pbar = ui::new_bytes_progress_bar(res.content_length(), &label);

        let mut writer = BufWriter::with_capacity(constants::DOWNLOAD_CHUNK_SIZE, temp);
        let mut stream = res.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            writer.write_all(&chunk)?;
            pbar.inc(chunk.len() as u64);
        }
        let temp = writer.into_inner().map_err(|e| e.into_error())?;
        temp.persist(target)?;
        pbar.finish_and_clear();

        debug!("Saved '{}'", target.display());
        Ok(target.to_path_buf())
    }
}

fn retry_after(res: &Response) -> Duration {
    let secs = res
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(constants::DEFAULT_RETRY_AFTER_SECS);
    Duration::from_secs(secs)
}
