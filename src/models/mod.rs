// src/models/mod.rs

pub mod api;

use self::api::FileMetadataResponse;
use crate::symbols;
use colored::ColoredString;
use std::collections::BTreeSet;

pub type FileId = u64;
pub type FileIdSet = BTreeSet<FileId>;

/// Metadata resolved for one file right before it is downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub id: FileId,
    pub display_name: String,
    /// Expected byte size; 0 when the API did not report one.
    pub size: u64,
    pub url: Option<String>,
}

impl FileMetadata {
    pub fn from_response(id: FileId, raw: FileMetadataResponse) -> Self {
        let display_name = raw
            .display_name
            .filter(|s| !s.is_empty())
            .or(raw.filename.filter(|s| !s.is_empty()))
            .unwrap_or_else(|| format!("file_{}", id));
        let url = raw
            .url
            .filter(|s| !s.is_empty())
            .or(raw.download_url.filter(|s| !s.is_empty()));
        Self {
            id,
            display_name,
            size: raw.size.unwrap_or(0),
            url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded,
    /// Already present locally with the expected size.
    Skipped,
    /// Locked for this token (403) or no download URL; not an error.
    Unavailable,
    Failed(String),
}

impl DownloadOutcome {
    pub fn symbol(&self) -> &'static ColoredString {
        match self {
            DownloadOutcome::Downloaded => &*symbols::DOWNLOADED,
            DownloadOutcome::Skipped => &*symbols::SKIPPED,
            DownloadOutcome::Unavailable => &*symbols::UNAVAILABLE,
            DownloadOutcome::Failed(_) => &*symbols::FAILED,
        }
    }
}
