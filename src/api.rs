// src/api.rs

use crate::{
    client::{RobustClient, parse_body},
    constants,
    error::*,
    models::{
        FileId, FileMetadata,
        api::{Assignment, CanvasFile, Course, FileMetadataResponse, Folder, Module, ModuleItem, Page},
    },
};
use log::debug;
use std::sync::Arc;
use url::Url;

/// Typed access to the Canvas REST endpoints used by this tool.
#[derive(Clone)]
pub struct CanvasApi {
    client: Arc<RobustClient>,
    base: Url,
}

impl CanvasApi {
    /// `base` must end with `/api/v1/` (see [`crate::utils::api_base_url`]).
    pub fn new(client: Arc<RobustClient>, base: Url) -> Self {
        Self { client, base }
    }

    pub fn client(&self) -> &Arc<RobustClient> {
        &self.client
    }

    fn endpoint(&self, path: &str) -> AppResult<String> {
        Ok(self.base.join(path)?.to_string())
    }

    // --- Courses ---

    pub async fn list_active_courses(&self) -> AppResult<Vec<Course>> {
        let url = self.endpoint("courses")?;
        self.client
            .fetch_all(
                &url,
                &[("per_page", constants::PER_PAGE), ("enrollment_state", "active")],
            )
            .await
    }

    /// 401 and 404 surface as `Unauthorized` / `NotFound`.
    pub async fn get_course(&self, course_id: u64) -> AppResult<Course> {
        let url = self.endpoint(&format!("courses/{}", course_id))?;
        let res = self.client.get_checked(&url).await?;
        parse_body(&url, res).await
    }

    // --- Modules ---

    pub async fn list_modules(&self, course_id: u64) -> AppResult<Vec<Module>> {
        let url = self.endpoint(&format!("courses/{}/modules", course_id))?;
        self.client
            .fetch_all(&url, &[("per_page", constants::PER_PAGE)])
            .await
    }

    pub async fn list_module_items(&self, course_id: u64, module_id: u64) -> AppResult<Vec<ModuleItem>> {
        let url = self.endpoint(&format!("courses/{}/modules/{}/items", course_id, module_id))?;
        self.client
            .fetch_all(&url, &[("per_page", constants::PER_PAGE)])
            .await
    }

    // --- Item payloads (403 => None) ---

    pub async fn get_page(&self, course_id: u64, slug: &str) -> AppResult<Option<Page>> {
        let mut url = self.base.join(&format!("courses/{}/pages/", course_id))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(slug);
        debug!("Fetching page '{}'", slug);
        self.client.fetch_json_unless_forbidden(url.as_str()).await
    }

    pub async fn get_assignment(&self, course_id: u64, assignment_id: u64) -> AppResult<Option<Assignment>> {
        let url = self.endpoint(&format!("courses/{}/assignments/{}", course_id, assignment_id))?;
        self.client.fetch_json_unless_forbidden(&url).await
    }

    pub async fn get_file_metadata(&self, file_id: FileId) -> AppResult<Option<FileMetadata>> {
        let url = self.endpoint(&format!("files/{}", file_id))?;
        let raw: Option<FileMetadataResponse> = self.client.fetch_json_unless_forbidden(&url).await?;
        Ok(raw.map(|raw| FileMetadata::from_response(file_id, raw)))
    }

    // --- Course files (listing mode; usually forbidden for students) ---

    pub async fn list_folders(&self, course_id: u64) -> AppResult<Vec<Folder>> {
        let url = self.endpoint(&format!("courses/{}/folders", course_id))?;
        self.client
            .fetch_all_checked(&url, &[("per_page", constants::PER_PAGE)])
            .await
    }

    pub async fn list_course_files(&self, course_id: u64) -> AppResult<Vec<CanvasFile>> {
        let url = self.endpoint(&format!("courses/{}/files", course_id))?;
        self.client
            .fetch_all_checked(
                &url,
                &[("per_page", constants::PER_PAGE), ("sort", "updated_at"), ("order", "desc")],
            )
            .await
    }
}
