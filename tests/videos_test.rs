//! Integration tests for the `/api/videos` listing and `/health`.

mod common;

use common::TestHarness;
use serde_json::{json, Value};

#[tokio::test]
async fn lists_only_videos_in_name_order() {
    let (h, addr) = TestHarness::with_server().await;
    h.add_media("zebra.mkv", b"z");
    h.add_media("alpha.MP4", b"a");
    h.add_media("notes.txt", b"n");
    h.add_media("middle.webm", b"m");
    std::fs::create_dir(h.media_dir().join("folder.mp4")).unwrap();

    let body: Value = reqwest::get(format!("http://{addr}/api/videos"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        body,
        json!({
            "videos": [
                {"name": "alpha.MP4", "path": "/videos/0"},
                {"name": "middle.webm", "path": "/videos/1"},
                {"name": "zebra.mkv", "path": "/videos/2"},
            ]
        })
    );
}

#[tokio::test]
async fn listing_reflects_directory_changes() {
    let (h, addr) = TestHarness::with_server().await;
    let url = format!("http://{addr}/api/videos");

    let body: Value = reqwest::get(&url).await.unwrap().json().await.unwrap();
    assert_eq!(body["videos"].as_array().unwrap().len(), 0);

    h.add_media("new.mov", b"x");
    let body: Value = reqwest::get(&url).await.unwrap().json().await.unwrap();
    assert_eq!(body["videos"][0]["name"], "new.mov");
}

#[tokio::test]
async fn absent_media_dir_lists_empty() {
    let (h, addr) = TestHarness::with_server().await;
    std::fs::remove_dir(h.media_dir()).unwrap();

    let resp = reqwest::get(format!("http://{addr}/api/videos")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"videos": []}));
}

#[tokio::test]
async fn health_reports_media_path() {
    let (h, addr) = TestHarness::with_server().await;

    let resp = reqwest::get(format!("http://{addr}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers().contains_key("x-request-id"));
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    let expected = h.media_dir().canonicalize().unwrap();
    assert_eq!(body["media_path"], expected.display().to_string());
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let (_h, addr) = TestHarness::with_server().await;

    let resp = reqwest::Client::new()
        .get(format!("http://{addr}/api/videos"))
        .header("Origin", "http://phone.local")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
}
