//! Router-level tests for the analysis API
//!
//! Exercises the full middleware stack, in particular the raised body
//! limit that large base64-encoded reports depend on.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use crate::build_router;

fn analyze_request(json: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze-report")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json))
        .unwrap()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let response = build_router()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn multi_megabyte_upload_reaches_the_handler() {
    // 3 MB of valid base64: well past axum's 2 MB default body limit,
    // far below the configured cap. The decoded bytes are not a PDF,
    // so the analysis degrades, but the request must not be cut off
    // with 413 before the handler runs.
    let payload = "A".repeat(3 * 1024 * 1024);
    let json = format!(r#"{{"filename":"report.pdf","pdf_base64":"{payload}"}}"#);

    let response = build_router().oneshot(analyze_request(json)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["degraded"], true);
    assert_eq!(value["project_status"], "тревожный");
}

#[tokio::test]
async fn non_pdf_filename_is_rejected() {
    let json = r#"{"filename":"report.docx","pdf_base64":"QUFBQQ=="}"#.to_string();
    let response = build_router().oneshot(analyze_request(json)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
