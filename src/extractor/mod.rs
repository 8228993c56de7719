// src/extractor/mod.rs

pub mod assignment;
pub mod file;
pub mod page;

pub use page::find_file_ids_in_html;

use self::{assignment::AssignmentExtractor, file::FileItemExtractor, page::PageExtractor};
use crate::{
    api::CanvasApi,
    constants::item_types,
    error::*,
    models::{FileIdSet, api::ModuleItem},
};
use async_trait::async_trait;
use log::debug;

/// A strategy that finds the file ids reachable from one kind of module item.
#[async_trait]
pub trait FileIdExtractor: Send + Sync {
    async fn extract_file_ids(
        &self,
        item: &ModuleItem,
        course_id: u64,
        api: &CanvasApi,
    ) -> AppResult<FileIdSet>;
}

fn extractor_for(item: &ModuleItem) -> Option<&'static dyn FileIdExtractor> {
    match item.item_type.as_deref()? {
        item_types::FILE => Some(&FileItemExtractor),
        item_types::PAGE => Some(&PageExtractor),
        item_types::ASSIGNMENT => Some(&AssignmentExtractor),
        _ => None,
    }
}

/// Collects the deduplicated set of file ids reachable from a module's items.
///
/// Locked pages/assignments (403) contribute nothing; any other request error
/// is returned.
pub async fn harvest_file_ids(
    items: &[ModuleItem],
    course_id: u64,
    api: &CanvasApi,
) -> AppResult<FileIdSet> {
    let mut file_ids = FileIdSet::new();
    for item in items {
        let Some(extractor) = extractor_for(item) else {
            continue;
        };
        let found = extractor.extract_file_ids(item, course_id, api).await?;
        debug!(
            "Item '{}' ({:?}) -> {} file id(s)",
            item.title.as_deref().unwrap_or("(untitled)"),
            item.item_type,
            found.len()
        );
        file_ids.extend(found);
    }
    Ok(file_ids)
}
