//! Integration tests for web UI and receiver UI static hosting.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use common::{TestHarness, RECEIVER_INDEX, WEB_INDEX};

async fn get(h: &TestHarness, uri: &str) -> (StatusCode, String) {
    let resp = h
        .app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&body).into_owned())
}

#[tokio::test]
async fn web_root_and_index_serve_index_html() {
    let h = TestHarness::new();
    for uri in ["/", "/index.html"] {
        let (status, body) = get(&h, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, WEB_INDEX);
    }
}

#[tokio::test]
async fn receiver_root_variants_serve_receiver_index() {
    let h = TestHarness::new();
    for uri in ["/receiver", "/receiver/"] {
        let (status, body) = get(&h, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, RECEIVER_INDEX);
    }
}

#[tokio::test]
async fn nested_assets_have_content_types() {
    let (_h, addr) = TestHarness::with_server().await;

    let resp = reqwest::get(format!("http://{addr}/css/app.css")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/css"));

    let resp = reqwest::get(format!("http://{addr}/receiver/receiver.js"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers()["content-type"]
        .to_str()
        .unwrap()
        .contains("javascript"));
    assert_eq!(resp.text().await.unwrap(), "// receiver");
}

#[tokio::test]
async fn missing_assets_are_404() {
    let h = TestHarness::new();
    for uri in ["/nope.js", "/receiver/nope.js", "/css"] {
        let (status, body) = get(&h, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["code"], "not_found");
    }
}

#[tokio::test]
async fn traversal_is_404_and_does_not_leak() {
    let h = TestHarness::new();
    for uri in [
        "/receiver/..%2Fsecret.txt",
        "/receiver/..%2F..%2F..%2Fetc%2Fpasswd",
        "/..%2Fsecret.txt",
        "/css/..%2F..%2Fsecret.txt",
    ] {
        let (status, body) = get(&h, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(!body.contains("top secret"), "{uri}");
        assert!(
            !body.contains(&*h.root().to_string_lossy()),
            "{uri} leaked a filesystem path: {body}"
        );
    }
}

#[tokio::test]
async fn missing_receiver_dir_is_404() {
    let h = TestHarness::new();
    std::fs::remove_dir_all(h.ctx.receiver_dir()).unwrap();
    let (status, _) = get(&h, "/receiver/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
