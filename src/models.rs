// src/models.rs

use crate::constants::{ERROR_PREFIX, PDF_UPLOADED_PREFIX};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a `/get_response` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetResponseRequest {
    pub message: String,
}

/// Reads the `response` field of a `/get_response` reply.
///
/// The field is not validated: missing or `null` yields an empty reply and
/// non-string values are shown as JSON. A body that is not a JSON object has
/// no fields to read and is reported as an error description.
pub fn response_text(body: &Value) -> Result<String, String> {
    match body {
        Value::Object(fields) => Ok(fields.get("response").map(value_text).unwrap_or_default()),
        other => Err(format!("Cannot read 'response' from non-object reply: {}", other)),
    }
}

/// What an `/upload_pdf` reply asks the log to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Summary(String),
    Failure(String),
    /// Neither `summary` nor `error` was present.
    Silent,
}

impl UploadOutcome {
    pub fn from_body(body: &Value) -> Self {
        if is_truthy(&body["summary"]) {
            UploadOutcome::Summary(value_text(&body["summary"]))
        } else if is_truthy(&body["error"]) {
            UploadOutcome::Failure(value_text(&body["error"]))
        } else {
            UploadOutcome::Silent
        }
    }

    /// The remote message content, if anything should be rendered.
    pub fn message(&self) -> Option<String> {
        match self {
            UploadOutcome::Summary(summary) => Some(format!("{}{}", PDF_UPLOADED_PREFIX, summary)),
            UploadOutcome::Failure(error) => Some(format!("{}{}", ERROR_PREFIX, error)),
            UploadOutcome::Silent => None,
        }
    }
}

pub fn error_message(description: impl std::fmt::Display) -> String {
    format!("{}{}", ERROR_PREFIX, description)
}

// JavaScript truthiness: empty strings, null, false and 0 count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_message_field() {
        let body = serde_json::to_value(GetResponseRequest {
            message: "hi".to_string(),
        })
        .unwrap();
        assert_eq!(body, json!({ "message": "hi" }));
    }

    #[test]
    fn test_response_text_reads_field() {
        assert_eq!(
            response_text(&json!({ "response": "hello", "history": [] })).as_deref(),
            Ok("hello")
        );
    }

    #[test]
    fn test_response_text_missing_field_is_empty() {
        assert_eq!(response_text(&json!({})).as_deref(), Ok(""));
        assert_eq!(response_text(&json!({ "response": null })).as_deref(), Ok(""));
    }

    #[test]
    fn test_response_text_non_string_is_json() {
        assert_eq!(response_text(&json!({ "response": 42 })).as_deref(), Ok("42"));
    }

    #[test]
    fn test_response_text_non_object_body_is_error() {
        for body in [json!(null), json!("hello"), json!([1, 2]), json!(7)] {
            let err = response_text(&body).unwrap_err();
            assert!(err.starts_with("Cannot read 'response'"), "{}", err);
        }
    }

    #[test]
    fn test_upload_summary() {
        let outcome = UploadOutcome::from_body(&json!({ "summary": "3 pages" }));
        assert_eq!(outcome, UploadOutcome::Summary("3 pages".to_string()));
        assert_eq!(outcome.message().as_deref(), Some("PDF Uploaded: 3 pages"));
    }

    #[test]
    fn test_upload_error() {
        let outcome = UploadOutcome::from_body(&json!({ "error": "too large" }));
        assert_eq!(outcome.message().as_deref(), Some("Error: too large"));
    }

    #[test]
    fn test_upload_summary_wins_over_error() {
        let outcome = UploadOutcome::from_body(&json!({ "summary": "ok", "error": "ignored" }));
        assert_eq!(outcome, UploadOutcome::Summary("ok".to_string()));
    }

    #[test]
    fn test_upload_empty_summary_falls_through_to_error() {
        let outcome = UploadOutcome::from_body(&json!({ "summary": "", "error": "No file uploaded" }));
        assert_eq!(outcome, UploadOutcome::Failure("No file uploaded".to_string()));
    }

    #[test]
    fn test_upload_neither_field_is_silent() {
        let outcome = UploadOutcome::from_body(&json!({ "status": "done" }));
        assert_eq!(outcome, UploadOutcome::Silent);
        assert_eq!(outcome.message(), None);
    }

    #[test]
    fn test_error_message_prefix() {
        assert_eq!(error_message("network down"), "Error: network down");
    }
}
