// src/extractor/page.rs

use super::FileIdExtractor;
use crate::{
    api::CanvasApi,
    error::AppResult,
    models::{FileIdSet, api::ModuleItem},
};
use async_trait::async_trait;
use log::info;
use regex::Regex;
use std::sync::LazyLock;

// `/files/<id>` also covers `/files/<id>/download` and `/courses/<c>/files/<id>`.
static FILE_LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/files/(\d+)").unwrap());
static API_FILE_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/api/v1/files/(\d+)").unwrap());

/// Finds Canvas file ids linked from page HTML.
///
/// Pattern based, no HTML parsing. Preview and download links are both kept;
/// ids that overflow `u64` are dropped.
pub fn find_file_ids_in_html(html: &str) -> FileIdSet {
    [&*FILE_LINK_RE, &*API_FILE_LINK_RE]
        .into_iter()
        .flat_map(|re| re.captures_iter(html))
        .filter_map(|caps| caps.get(1)?.as_str().parse().ok())
        .collect()
}

/// Page items are fetched by slug and their body scraped for file links.
pub struct PageExtractor;

#[async_trait]
impl FileIdExtractor for PageExtractor {
    async fn extract_file_ids(
        &self,
        item: &ModuleItem,
        course_id: u64,
        api: &CanvasApi,
    ) -> AppResult<FileIdSet> {
        let Some(slug) = item.page_url.as_deref().filter(|s| !s.is_empty()) else {
            return Ok(FileIdSet::new());
        };
        match api.get_page(course_id, slug).await? {
            Some(page) => Ok(find_file_ids_in_html(page.body.as_deref().unwrap_or_default())),
            None => {
                info!("Page '{}' is locked (403), skipping", slug);
                Ok(FileIdSet::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_both_link_shapes_and_collapses_duplicates() {
        let html = r#"
            <p><a href="/courses/188076/files/502?wrap=1">Slides</a></p>
            <p><a href="/courses/188076/files/502/download?download_frd=1">Slides (download)</a></p>
            <img data-api-endpoint="https://canvas.odu.edu/api/v1/courses/188076/files/503"
                 src="https://canvas.odu.edu/api/v1/files/503/preview">
            <a href="https://canvas.odu.edu/api/v1/files/505">Api link</a>
        "#;
        assert_eq!(find_file_ids_in_html(html), FileIdSet::from([502, 503, 505]));
    }

    #[test]
    fn test_ignores_non_matching_paths() {
        let html = r#"<a href="/filestore/123">x</a> <a href="/files/">y</a> <a href="/file/7">z</a>"#;
        assert!(find_file_ids_in_html(html).is_empty());
        assert!(find_file_ids_in_html("").is_empty());
    }

    #[test]
    fn test_drops_overflowing_ids() {
        let html = "/files/99999999999999999999999 /files/12";
        assert_eq!(find_file_ids_in_html(html), FileIdSet::from([12]));
    }
}
