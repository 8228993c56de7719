// src/models/api.rs

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// --- Courses & modules ---

#[derive(Deserialize, Debug, Clone)]
pub struct Course {
    pub id: u64,
    pub name: Option<String>,
    pub course_code: Option<String>,
    pub workflow_state: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub start_at: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub end_at: Option<DateTime<FixedOffset>>,
}

impl Course {
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("course_{}", self.id))
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Module {
    pub id: u64,
    pub name: Option<String>,
    pub items_count: Option<u64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ModuleItem {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    /// Accepted as a JSON number or a numeric string; anything else counts as absent.
    #[serde(default, deserialize_with = "lenient_id")]
    pub content_id: Option<u64>,
    pub page_url: Option<String>,
    pub html_url: Option<String>,
    pub url: Option<String>,
}

// --- Item payloads ---

#[derive(Deserialize, Debug, Clone)]
pub struct Page {
    pub body: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Assignment {
    #[serde(default)]
    pub attachments: Option<Vec<Attachment>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Attachment {
    /// Only integer ids count; strings and floats are ignored.
    #[serde(default, deserialize_with = "strict_integer_id")]
    pub id: Option<u64>,
}

// --- Files ---

#[derive(Deserialize, Debug, Clone)]
pub struct FileMetadataResponse {
    pub display_name: Option<String>,
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub size: Option<u64>,
    pub url: Option<String>,
    pub download_url: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Folder {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<u64>,
    pub full_name: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CanvasFile {
    pub id: Option<u64>,
    pub display_name: Option<String>,
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub size: Option<u64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub folder_id: Option<u64>,
    pub updated_at: Option<String>,
}

// --- serde helpers ---

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn strict_integer_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64(),
        _ => None,
    })
}

fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|s| DateTime::parse_from_rfc3339(&s).ok()))
}
