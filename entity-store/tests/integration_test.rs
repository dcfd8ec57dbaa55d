//! End-to-end request flows against a file-backed router.

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use entity_store::api;
use entity_store_core::{DocumentService, FileStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

struct TestHarness {
    dir: TempDir,
    app: Router,
}

impl TestHarness {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(FileStore::new(dir.path()).unwrap());
        let app = api::router(DocumentService::new(store));
        Self { dir, app }
    }

    async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        };
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        let resp = self.app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn stored(&self, id: &str) -> Option<Value> {
        let bytes = std::fs::read(self.dir.path().join(format!("{id}.json"))).ok()?;
        Some(serde_json::from_slice(&bytes).unwrap())
    }
}

#[tokio::test]
async fn unknown_entity_is_not_found() {
    let h = TestHarness::new();
    let (status, body) = h.request("GET", "/undefined", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Sorry can't find that!" }));
    assert!(h.stored("undefined").is_none());
}

#[tokio::test]
async fn put_creates_nested_path_on_fresh_entity() {
    let h = TestHarness::new();
    let (status, body) = h
        .request(
            "PUT",
            "/studentA/courses/calculus/quizzes/q1",
            Some(json!({ "score": 98 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["courses"]["calculus"]["quizzes"]["q1"]["score"], json!(98));
    assert_eq!(h.stored("studentA"), Some(body));

    let (status, body) = h
        .request("GET", "/studentA/courses/calculus/quizzes/q1", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "score": 98 }));

    let (status, body) = h
        .request("GET", "/studentA/courses/calculus/quizzes/q1/score", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(98));
}

#[tokio::test]
async fn delete_removes_value_and_returns_document() {
    let h = TestHarness::new();
    h.request(
        "PUT",
        "/studentA/courses/calculus/quizzes/q1",
        Some(json!({ "score": 98 })),
    )
    .await;
    h.request(
        "PUT",
        "/studentA/courses/calculus/quizzes/q2",
        Some(json!({ "score": 75 })),
    )
    .await;

    let (status, body) = h
        .request("DELETE", "/studentA/courses/calculus/quizzes/q1", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "courses": { "calculus": { "quizzes": { "q2": { "score": 75 } } } } })
    );
    assert_eq!(h.stored("studentA"), Some(body));

    let (status, _) = h
        .request("GET", "/studentA/courses/calculus/quizzes/q1", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = h
        .request("DELETE", "/studentA/courses/calculus/quizzes/q1", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_on_unknown_entity_does_not_create_it() {
    let h = TestHarness::new();
    let (status, body) = h.request("DELETE", "/ghost/a/b", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Sorry can't find that!" }));
    assert!(h.stored("ghost").is_none());
}

#[tokio::test]
async fn falsy_leaf_is_stored_but_reads_as_missing() {
    let h = TestHarness::new();
    let (status, body) = h.request("PUT", "/s/attempts", Some(json!(0))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "attempts": 0 }));

    let (status, _) = h.request("GET", "/s/attempts", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // a nested write replaces the falsy intermediate
    let (_, body) = h.request("PUT", "/s/attempts/first", Some(json!(true))).await;
    assert_eq!(body, json!({ "attempts": { "first": true } }));
}

#[tokio::test]
async fn whole_document_via_trailing_slash() {
    let h = TestHarness::new();
    h.request("PUT", "/s/name", Some(json!("Ada"))).await;
    let (status, body) = h.request("GET", "/s/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "name": "Ada" }));
}

#[tokio::test]
async fn health_is_independent_of_documents() {
    let h = TestHarness::new();
    let (status, body) = h.request("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
}
