// src/extractor/file.rs

use super::FileIdExtractor;
use crate::{
    api::CanvasApi,
    error::AppResult,
    models::{FileIdSet, api::ModuleItem},
};
use async_trait::async_trait;

/// File items reference their file directly through `content_id`.
pub struct FileItemExtractor;

#[async_trait]
impl FileIdExtractor for FileItemExtractor {
    async fn extract_file_ids(
        &self,
        item: &ModuleItem,
        _course_id: u64,
        _api: &CanvasApi,
    ) -> AppResult<FileIdSet> {
        Ok(item.content_id.into_iter().collect())
    }
}
