//! Bearer token lifecycle for the HRIS API.
//!
//! Holds at most one credential at a time. A cached token is reused while it
//! is younger than the expiry threshold and was issued for the requested
//! subject; otherwise a new one is fetched from
//! `POST {base}/auth/generatetokenforuser`.
//!
//! Issuance is single-flight: callers that find the cache unusable queue on
//! `refresh_lock` and re-check the cache once they hold it, so a burst of
//! requests against a cold or expired cache produces one upstream call.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::Deserialize;
use tokio::sync::{Mutex, RwLock};

use super::TokenSource;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::credential::{Credential, TokenInfo};
use crate::proxy::upstream::read_response;

const ISSUE_PATH: &str = "/auth/generatetokenforuser";

#[derive(Debug, Deserialize)]
struct IssueResponse {
    data: Option<String>,
}

pub struct TokenManager {
    http: reqwest::Client,
    issue_url: String,
    client_id: Option<String>,
    client_secret: Option<String>,
    expiry_hours: f64,
    threshold: Duration,
    current: RwLock<Option<Credential>>,
    refresh_lock: Mutex<()>,
}

impl TokenManager {
    pub fn new(cfg: &Config, http: reqwest::Client) -> anyhow::Result<Self> {
        Ok(Self {
            http,
            issue_url: format!("{}{}", cfg.base_api_url.trim_end_matches('/'), ISSUE_PATH),
            client_id: cfg.client_id.clone(),
            client_secret: cfg.client_secret.clone(),
            expiry_hours: cfg.token_expiry_hours,
            threshold: cfg.expiry_threshold()?,
            current: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        })
    }

    pub async fn get_token(&self, subject: &str, domain_url: &str) -> Result<String, AppError> {
        let subject = require_subject(subject)?;

        if let Some(token) = self.cached_for(subject).await {
            return Ok(token);
        }

        let _guard = self.refresh_lock.lock().await;
        // Someone else may have issued while we were queued.
        if let Some(token) = self.cached_for(subject).await {
            return Ok(token);
        }

        self.issue(subject, domain_url).await
    }

    pub async fn generate_token(&self, subject: &str, domain_url: &str) -> Result<String, AppError> {
        let subject = require_subject(subject)?;
        let _guard = self.refresh_lock.lock().await;
        self.issue(subject, domain_url).await
    }

    pub async fn get_token_info(&self) -> TokenInfo {
        match self.current.read().await.as_ref() {
            Some(cred) => TokenInfo::describe(cred, Utc::now(), self.expiry_hours, self.threshold),
            None => TokenInfo::NoToken,
        }
    }

    pub async fn is_token_expired(&self) -> bool {
        match self.current.read().await.as_ref() {
            Some(cred) => cred.is_expired_at(Utc::now(), self.threshold),
            None => true,
        }
    }

    async fn cached_for(&self, subject: &str) -> Option<String> {
        let guard = self.current.read().await;
        let cred = guard.as_ref()?;
        let now = Utc::now();

        if !cred.is_valid_for(subject, now, self.threshold) {
            if cred.subject != subject {
                tracing::info!(
                    cached = %cred.subject,
                    requested = %subject,
                    "Cached token belongs to another employee"
                );
            } else {
                tracing::info!(emp_code = %subject, "Cached token expired");
            }
            return None;
        }

        let elapsed_hours = cred.elapsed_at(now).num_seconds() as f64 / 3600.0;
        tracing::debug!(
            emp_code = %subject,
            "Using existing token (generated {:.1} hours ago)",
            elapsed_hours
        );
        Some(cred.token.clone())
    }

    /// Call the issuance endpoint and replace the cached credential.
    /// Callers must hold `refresh_lock`.
    async fn issue(&self, subject: &str, domain_url: &str) -> Result<String, AppError> {
        tracing::info!(emp_code = %subject, domain = %domain_url, "Generating new token");

        let mut req = self
            .http
            .post(&self.issue_url)
            .header("domainurl", domain_url)
            .header("granttype", "client_credentials")
            .header("contextempcode", subject);
        if let Some(id) = &self.client_id {
            req = req.header("clientid", id);
        }
        if let Some(secret) = &self.client_secret {
            req = req.header("clientsecret", secret);
        }

        let resp = req.send().await.map_err(|e| {
            tracing::error!(emp_code = %subject, "Token generation request failed: {}", e);
            AppError::Transport(e)
        })?;

        let (status, body) = read_response(resp).await?;

        if !status.is_success() {
            tracing::error!(
                emp_code = %subject,
                status = status.as_u16(),
                "Token generation failed: {}",
                body
            );
            return Err(AppError::UpstreamAuth {
                status: status.as_u16(),
                body,
            });
        }

        let token = serde_json::from_str::<IssueResponse>(&body)
            .ok()
            .and_then(|r| r.data)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                tracing::error!(emp_code = %subject, "Token endpoint returned no token");
                AppError::UpstreamAuth {
                    status: status.as_u16(),
                    body: body.clone(),
                }
            })?;

        *self.current.write().await = Some(Credential::new(subject, token.clone()));
        tracing::info!(emp_code = %subject, "Token generated successfully");

        Ok(token)
    }

    #[cfg(test)]
    pub(crate) async fn install(&self, cred: Credential) {
        *self.current.write().await = Some(cred);
    }
}

#[async_trait]
impl TokenSource for TokenManager {
    async fn get_token(&self, subject: &str, domain_url: &str) -> Result<String, AppError> {
        TokenManager::get_token(self, subject, domain_url).await
    }

    async fn generate_token(&self, subject: &str, domain_url: &str) -> Result<String, AppError> {
        TokenManager::generate_token(self, subject, domain_url).await
    }
}

fn require_subject(subject: &str) -> Result<&str, AppError> {
    let subject = subject.trim();
    if subject.is_empty() {
        return Err(AppError::invalid_argument(
            "Employee code is required to generate token",
        ));
    }
    Ok(subject)
}
