//! HR policy / FAQ search against the knowledge-base service.
//! Unauthenticated; no token involved.

use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::envelope::Envelope;
use crate::proxy::upstream::read_response;

pub const SUCCESS_MESSAGE: &str = "Policy search completed successfully.";

#[derive(Clone)]
pub struct PolicySearch {
    http: reqwest::Client,
    endpoint: String,
}

impl PolicySearch {
    pub fn new(endpoint: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub async fn search(&self, query: &str, comp_code: &str) -> Result<Value, AppError> {
        let query = query.trim();
        let comp_code = comp_code.trim();
        if query.is_empty() || comp_code.is_empty() {
            return Err(AppError::invalid_argument(
                "Search query and company code are required",
            ));
        }

        tracing::info!(comp_code = %comp_code, "Searching HR policies");

        let resp = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "comp_code": comp_code, "query": query }))
            .send()
            .await?;
        let (status, body) = read_response(resp).await?;

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "Policy search failed: {}", body);
            return Err(AppError::UpstreamUnavailable {
                status: status.as_u16(),
                body,
            });
        }

        // Non-JSON bodies pass through as a string.
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }

    pub async fn execute_policy_search(&self, query: &str, comp_code: &str) -> Envelope {
        let result = self.search(query, comp_code).await;
        Envelope::from_result(result, SUCCESS_MESSAGE, "Error searching policies")
    }
}
