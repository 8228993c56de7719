// src/extractor/assignment.rs

use super::FileIdExtractor;
use crate::{
    api::CanvasApi,
    error::AppResult,
    models::{FileIdSet, api::ModuleItem},
};
use async_trait::async_trait;
use log::info;

/// Assignment items contribute the ids of their attachments.
pub struct AssignmentExtractor;

#[async_trait]
impl FileIdExtractor for AssignmentExtractor {
    async fn extract_file_ids(
        &self,
        item: &ModuleItem,
        course_id: u64,
        api: &CanvasApi,
    ) -> AppResult<FileIdSet> {
        let Some(assignment_id) = item.content_id else {
            return Ok(FileIdSet::new());
        };
        let Some(assignment) = api.get_assignment(course_id, assignment_id).await? else {
            info!("Assignment {} is locked (403), skipping", assignment_id);
            return Ok(FileIdSet::new());
        };
        Ok(assignment
            .attachments
            .unwrap_or_default()
            .into_iter()
            .filter_map(|att| att.id)
            .collect())
    }
}
