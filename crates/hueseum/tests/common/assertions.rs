//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert the structured error body and return its detail message
pub fn assert_error(response: &TestResponse, expected: StatusCode) -> String {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(json["status"], expected.as_u16());
    json["detail"]
        .as_str()
        .expect("error body should carry a detail message")
        .to_string()
}

/// Assert a downloadable artifact with its content type and file name
pub fn assert_attachment(response: &TestResponse, content_type: &str, filename: &str) {
    assert_ok(response);
    assert_eq!(response.header("content-type"), Some(content_type));
    let disposition = format!("attachment; filename={filename}");
    assert_eq!(response.header("content-disposition"), Some(disposition.as_str()));
}
