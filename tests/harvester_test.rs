// tests/harvester_test.rs

mod common;

use canvas_grabber::{
    extractor::harvest_file_ids,
    models::{FileIdSet, api::ModuleItem},
};
use serde_json::json;

fn items(value: serde_json::Value) -> Vec<ModuleItem> {
    serde_json::from_value(value).expect("fixture items should deserialize")
}

#[tokio::test]
async fn test_harvests_file_page_and_assignment_items() {
    // --- Arrange ---
    let mut server = mockito::Server::new_async().await;

    let page = server
        .mock("GET", "/api/v1/courses/77/pages/week-1-overview")
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "title": "Week 1 overview",
                "body": "<p><a href=\"/courses/77/files/502/download?wrap=1\">Slides</a></p>\
                         <p><a data-api-endpoint=\"https://canvas.example.edu/api/v1/files/503\">Reading</a></p>"
            })
            .to_string(),
        )
        .create_async()
        .await;
    let assignment = server
        .mock("GET", "/api/v1/courses/77/assignments/900")
        .with_body(json!({ "id": 900, "attachments": [{ "id": 504 }] }).to_string())
        .create_async()
        .await;

    let module_items = items(json!([
        { "id": 1, "type": "File", "content_id": 501, "title": "Syllabus.pdf" },
        { "id": 2, "type": "Page", "page_url": "week-1-overview", "title": "Week 1 overview" },
        { "id": 3, "type": "Assignment", "content_id": 900, "title": "Homework 1" },
        { "id": 4, "type": "ExternalUrl", "title": "Publisher site", "external_url": "https://example.com" }
    ]));

    let api = common::api_for(&server.url());

    // --- Act ---
    let ids = harvest_file_ids(&module_items, 77, &api).await.expect("harvest should succeed");

    // --- Assert ---
    assert_eq!(ids, FileIdSet::from([501, 502, 503, 504]));
    page.assert_async().await;
    assignment.assert_async().await;
}

#[tokio::test]
async fn test_locked_page_and_assignment_contribute_nothing() {
    let mut server = mockito::Server::new_async().await;
    let _page = server
        .mock("GET", "/api/v1/courses/77/pages/locked-page")
        .with_status(403)
        .create_async()
        .await;
    let _assignment = server
        .mock("GET", "/api/v1/courses/77/assignments/901")
        .with_status(403)
        .create_async()
        .await;

    let module_items = items(json!([
        { "type": "Page", "page_url": "locked-page" },
        { "type": "Assignment", "content_id": "901" },
        { "type": "File", "content_id": 10 }
    ]));

    let api = common::api_for(&server.url());
    let ids = harvest_file_ids(&module_items, 77, &api).await.unwrap();

    assert_eq!(ids, FileIdSet::from([10]));
}

#[tokio::test]
async fn test_items_without_references_make_no_requests() {
    let mut server = mockito::Server::new_async().await;
    let any_request = server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let module_items = items(json!([
        { "type": "Page" },
        { "type": "Page", "page_url": "" },
        { "type": "Assignment" },
        { "type": "File", "content_id": "not-a-number" },
        { "type": "Quiz", "content_id": 5 }
    ]));

    let api = common::api_for(&server.url());
    let ids = harvest_file_ids(&module_items, 77, &api).await.unwrap();

    assert!(ids.is_empty());
    any_request.assert_async().await;
}

#[tokio::test]
async fn test_page_server_error_propagates() {
    let mut server = mockito::Server::new_async().await;
    let _page = server
        .mock("GET", "/api/v1/courses/77/pages/broken")
        .with_status(500)
        .create_async()
        .await;

    let module_items = items(json!([{ "type": "Page", "page_url": "broken" }]));

    let api = common::api_for(&server.url());
    let err = harvest_file_ids(&module_items, 77, &api).await.unwrap_err();

    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
}

#[tokio::test]
async fn test_duplicate_ids_across_items_collapse() {
    let mut server = mockito::Server::new_async().await;
    let _page = server
        .mock("GET", "/api/v1/courses/77/pages/recap")
        .with_body(json!({ "body": "/files/501 /api/v1/files/501 /files/600" }).to_string())
        .create_async()
        .await;

    let module_items = items(json!([
        { "type": "File", "content_id": 501 },
        { "type": "File", "content_id": "501" },
        { "type": "Page", "page_url": "recap" }
    ]));

    let api = common::api_for(&server.url());
    let ids = harvest_file_ids(&module_items, 77, &api).await.unwrap();

    assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![501, 600]);
}
