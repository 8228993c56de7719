// tests/common/mod.rs

#![allow(dead_code)]

use canvas_grabber::{api::CanvasApi, client::RobustClient, config::AppConfig, utils};
use mockito::Matcher;
use std::sync::Arc;

/// A `CanvasApi` pointed at a mock server, with retries disabled.
pub fn api_for(server_url: &str) -> CanvasApi {
    api_with_config(server_url, AppConfig::default())
}

pub fn api_with_config(server_url: &str, config: AppConfig) -> CanvasApi {
    let config = Arc::new(config);
    let client = Arc::new(RobustClient::new(config, "test-token").expect("client should build"));
    CanvasApi::new(client, utils::api_base_url(server_url).expect("mock url is valid"))
}

/// Matches `path` with or without a query string.
pub fn path_any_query(path: &str) -> Matcher {
    Matcher::Regex(format!(r"^{}(\?.*)?$", regex_escape(path)))
}

fn regex_escape(s: &str) -> String {
    s.chars()
        .flat_map(|c| match c {
            '.' | '?' | '*' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '^' | '$' | '\\' => {
                vec!['\\', c]
            }
            _ => vec![c],
        })
        .collect()
}
