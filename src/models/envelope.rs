use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

/// Normalized outcome handed to every caller of the domain adapters.
/// Callers branch on `status` only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    pub data: Option<Value>,
    pub message: String,
    pub status: bool,
}

impl Envelope {
    pub fn success(data: Value, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            message: message.into(),
            status: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            data: None,
            message: message.into(),
            status: false,
        }
    }

    /// Collapse an adapter result into an envelope.
    ///
    /// Validation and empty-result messages pass through as-is; everything
    /// else is prefixed with `context` so the caller sees which tool failed.
    pub fn from_result(
        result: Result<Value, AppError>,
        success_message: &str,
        context: &str,
    ) -> Self {
        match result {
            Ok(data) => Envelope::success(data, success_message),
            Err(e @ (AppError::InvalidArgument(_) | AppError::EmptyResult(_))) => {
                Envelope::failure(e.to_string())
            }
            Err(e) => Envelope::failure(format!("{}: {}", context, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_serializes_null_data() {
        let env = Envelope::failure("nope");
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json, json!({"data": null, "message": "nope", "status": false}));
    }

    #[test]
    fn test_from_result_prefixes_upstream_errors() {
        let env = Envelope::from_result(
            Err(AppError::UpstreamUnavailable {
                status: 500,
                body: "down".into(),
            }),
            "ok",
            "Error fetching employee profile",
        );
        assert!(!env.status);
        assert_eq!(
            env.message,
            "Error fetching employee profile: API call failed: 500 - down"
        );
    }

    #[test]
    fn test_from_result_keeps_empty_result_message() {
        let env = Envelope::from_result(
            Err(AppError::EmptyResult("No team data found.".into())),
            "ok",
            "Error fetching team details",
        );
        assert_eq!(env.message, "No team data found.");
        assert!(env.data.is_none());
    }
}
