//! Authenticated GraphQL calls against the HRIS API.
//!
//! Flow for one logical request:
//! 1. token from the [`TokenSource`] (cached when possible)
//! 2. `POST {base}/graphql` with `Authorization: Bearer` + `contextempcode`
//! 3. 200 → parse JSON
//! 4. token rejected (see [`retry::is_stale_token_signal`]) → force a new
//!    token and send once more; whatever comes back is final
//! 5. anything else → fail with status and body
//!
//! At most two GraphQL calls are made per `execute`.

use std::sync::Arc;

use serde_json::{json, Value};

use super::retry::{self, Verdict};
use super::upstream::read_response;
use crate::auth::TokenSource;
use crate::errors::AppError;

const GRAPHQL_PATH: &str = "/graphql";

/// One GraphQL call, scoped to a subject and token domain.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub query_document: String,
    pub variables: Value,
    pub domain_url: String,
    pub subject: String,
}

impl QueryRequest {
    pub fn new(
        query_document: impl Into<String>,
        variables: Value,
        subject: impl Into<String>,
        domain_url: impl Into<String>,
    ) -> Self {
        Self {
            query_document: query_document.into(),
            variables,
            subject: subject.into(),
            domain_url: domain_url.into(),
        }
    }
}

pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
    tokens: Arc<dyn TokenSource>,
}

impl GraphqlClient {
    pub fn new(base_api_url: &str, http: reqwest::Client, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            http,
            endpoint: format!("{}{}", base_api_url.trim_end_matches('/'), GRAPHQL_PATH),
            tokens,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run `req`, returning the full GraphQL payload (`{"data": ...}`) on success.
    pub async fn execute(&self, req: &QueryRequest) -> Result<Value, AppError> {
        let token = self.tokens.get_token(&req.subject, &req.domain_url).await?;
        let (status, body) = self.send(req, &token).await?;

        match retry::classify(status, &body) {
            Verdict::Accept => parse_payload(&body),
            Verdict::Fail => {
                tracing::error!(
                    emp_code = %req.subject,
                    status = status.as_u16(),
                    "GraphQL call failed: {}",
                    body
                );
                Err(AppError::UpstreamUnavailable {
                    status: status.as_u16(),
                    body,
                })
            }
            Verdict::StaleToken => {
                tracing::warn!(
                    emp_code = %req.subject,
                    status = status.as_u16(),
                    "Token rejected by upstream, generating a new one"
                );
                let token = self.tokens.generate_token(&req.subject, &req.domain_url).await?;
                let (status, body) = self.send(req, &token).await?;

                if status == reqwest::StatusCode::OK {
                    tracing::info!(emp_code = %req.subject, "GraphQL call succeeded after token refresh");
                    parse_payload(&body)
                } else {
                    tracing::error!(
                        emp_code = %req.subject,
                        status = status.as_u16(),
                        "GraphQL call failed after token refresh: {}",
                        body
                    );
                    Err(AppError::RefreshRejected {
                        status: status.as_u16(),
                        body,
                    })
                }
            }
        }
    }

    async fn send(
        &self,
        req: &QueryRequest,
        token: &str,
    ) -> Result<(reqwest::StatusCode, String), AppError> {
        let payload = json!({
            "query": req.query_document,
            "variables": req.variables,
        });

        tracing::debug!(emp_code = %req.subject, endpoint = %self.endpoint, "Sending GraphQL request");

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(token)
            .header("contextempcode", req.subject.as_str())
            .json(&payload)
            .send()
            .await?;

        Ok(read_response(resp).await?)
    }
}

fn parse_payload(body: &str) -> Result<Value, AppError> {
    serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        tracing::error!("GraphQL response is not JSON: {} (body: {})", e, preview);
        AppError::MalformedResponse(e.to_string())
    })
}

/// Pull `data.<field>` out of a GraphQL payload.
///
/// `None` when the field is missing, null, or an empty object/array/string.
pub fn extract_operation_field(payload: &Value, field: &str) -> Option<Value> {
    let value = payload.get("data")?.get(field)?;
    let empty = match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    };
    if empty {
        None
    } else {
        Some(value.clone())
    }
}
