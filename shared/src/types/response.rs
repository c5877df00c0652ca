//! API response envelopes
//!
//! Every endpoint answers with one of two shapes:
//!
//! ```json
//! { "statusCode": 200, "data": { ... }, "message": "...", "success": true }
//! { "statusCode": 401, "message": "...", "success": false, "errors": [] }
//! ```

use serde::{Deserialize, Serialize};

/// Success envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// HTTP status code mirrored into the body
    pub status_code: u16,

    /// Response payload
    pub data: T,

    /// Human-readable summary
    pub message: String,

    /// Derived from the status code (< 400)
    pub success: bool,
}

impl<T> ApiResponse<T> {
    /// Create a response; `success` follows the status code
    pub fn new(status_code: u16, data: T, message: impl Into<String>) -> Self {
        Self {
            status_code,
            data,
            message: message.into(),
            success: status_code < 400,
        }
    }

    /// 200 OK response
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::new(200, data, message)
    }

    /// 201 Created response
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::new(201, data, message)
    }
}

/// Failure envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub status_code: u16,
    pub message: String,
    pub success: bool,
    /// Field level details; empty when the failure has none
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ApiErrorBody {
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            success: false,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }
}

/// Empty JSON object payload, `{}`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let response = ApiResponse::created(json!({"username": "alice"}), "User registered successfully");
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(
            value,
            json!({
                "statusCode": 201,
                "data": {"username": "alice"},
                "message": "User registered successfully",
                "success": true
            })
        );
    }

    #[test]
    fn test_success_flag_follows_status() {
        assert!(ApiResponse::ok(Empty {}, "done").success);
        assert!(!ApiResponse::new(404, Empty {}, "missing").success);
    }

    #[test]
    fn test_error_envelope_shape() {
        let body = ApiErrorBody::new(400, "All fields are required")
            .with_errors(vec!["email is required".to_string()]);
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(
            value,
            json!({
                "statusCode": 400,
                "message": "All fields are required",
                "success": false,
                "errors": ["email is required"]
            })
        );
    }

    #[test]
    fn test_empty_serializes_as_object() {
        assert_eq!(serde_json::to_string(&Empty {}).unwrap(), "{}");
    }
}
