//! Consistent response envelope for every API endpoint.

use serde::{Deserialize, Serialize};

/// Envelope wrapping every payload: `{status, message, data}`.
///
/// `status` is `"success"` or `"error"`; `data` is null on errors and on
/// operations with no payload (delete).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying a payload.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }

    /// Successful response without a payload.
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data: None,
        }
    }

    /// Error response; never carries data.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let resp = ApiResponse::success("Note found", json!({"id": 1}));
        let value = serde_json::to_value(&resp).unwrap();

        assert_eq!(value["status"], "success");
        assert_eq!(value["message"], "Note found");
        assert_eq!(value["data"]["id"], 1);
    }

    #[test]
    fn test_error_envelope_has_null_data() {
        let resp = ApiResponse::<serde_json::Value>::error("Note not found");
        let value = serde_json::to_value(&resp).unwrap();

        assert_eq!(value["status"], "error");
        assert_eq!(value["message"], "Note not found");
        assert!(value["data"].is_null());
    }

    #[test]
    fn test_success_empty_has_null_data() {
        let resp = ApiResponse::<serde_json::Value>::success_empty("Note deleted successfully");
        let value = serde_json::to_value(&resp).unwrap();

        assert_eq!(value["status"], "success");
        assert!(value["data"].is_null());
    }
}
