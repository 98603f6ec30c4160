//! Liveness check.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::context::AppContext;

/// GET /health
///
/// `media_path` is the canonical media directory, or the configured value
/// when it cannot be resolved (for example because it does not exist yet).
pub async fn health_check(State(ctx): State<AppContext>) -> Json<Value> {
    let media_path = tokio::fs::canonicalize(ctx.media_root())
        .await
        .unwrap_or_else(|_| ctx.media_root().to_path_buf());

    Json(json!({
        "status": "ok",
        "media_path": media_path.display().to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dc_core::config::Config;
    use std::path::PathBuf;

    fn context(media: PathBuf) -> AppContext {
        let mut config = Config::default();
        config.media.path = media;
        AppContext::new(config)
    }

    #[tokio::test]
    async fn relative_media_dir_is_reported_absolute() {
        let ctx = context(PathBuf::from("src"));
        let body = health_check(State(ctx)).await.0;

        let expected = std::fs::canonicalize("src").unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["media_path"], expected.display().to_string());
        assert!(PathBuf::from(body["media_path"].as_str().unwrap()).is_absolute());
    }

    #[tokio::test]
    async fn missing_media_dir_falls_back_to_configured_path() {
        let ctx = context(PathBuf::from("no/such/media-dir"));
        let body = health_check(State(ctx)).await.0;
        assert_eq!(body["media_path"], "no/such/media-dir");
    }
}
