use std::sync::Arc;

use axum::{extract::FromRequest, extract::State, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::mcp::catalog;
use crate::mcp::types::ListToolsResult;
use crate::models::credential::TokenInfo;
use crate::state::AppState;
use crate::tools::team::DEFAULT_STATUS_CODE;

// ── Request DTOs ─────────────────────────────────────────────

/// `Json` whose rejections come back as [`AppError`] bodies.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

#[derive(Deserialize)]
pub struct ProfileRequest {
    #[serde(default)]
    pub emp_code: String,
    pub domain_url: Option<String>,
}

#[derive(Deserialize)]
pub struct TeamRequest {
    #[serde(default)]
    pub emp_code: String,
    /// Defaults to today.
    pub start_date: Option<String>,
    /// Defaults to today.
    pub end_date: Option<String>,
    pub status_code: Option<String>,
    pub domain_url: Option<String>,
}

#[derive(Deserialize)]
pub struct PolicySearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub comp_code: String,
}

// ── Handlers ─────────────────────────────────────────────────

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "HRIS gateway is running",
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "endpoints": {
            "/health": "Service status and token state",
            "/api/profile": "Get employee profile (POST)",
            "/api/team": "Get team details (POST)",
            "/api/policy/search": "Search HR policies (POST)",
            "/api/token": "Current token state",
            "/api/tools": "Tool catalog",
            "/mcp": "MCP JSON-RPC tool endpoint (POST)"
        }
    }))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "token": state.tokens.get_token_info().await,
    }))
}

/// GET /api/token: cached credential state (never the token itself).
pub async fn token_info(State(state): State<Arc<AppState>>) -> Json<TokenInfo> {
    Json(state.tokens.get_token_info().await)
}

/// GET /api/tools: tool catalog as served over MCP.
pub async fn list_tools(State(state): State<Arc<AppState>>) -> Json<ListToolsResult> {
    Json(ListToolsResult {
        tools: catalog::list_tools(&state.config.default_domain),
    })
}

/// POST /api/profile
pub async fn get_employee_profile(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ProfileRequest>,
) -> Result<Json<Value>, AppError> {
    let domain = state.domain_or_default(req.domain_url.as_deref());
    let data = state.hris.fetch_profile(&req.emp_code, domain).await?;

    Ok(Json(json!({
        "success": true,
        "employee_code": req.emp_code.trim(),
        "data": data,
        "message": crate::tools::profile::SUCCESS_MESSAGE,
        "timestamp": Utc::now().to_rfc3339(),
    })))
}

/// POST /api/team
pub async fn get_team_details(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<TeamRequest>,
) -> Result<Json<Value>, AppError> {
    let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let start_date = req.start_date.unwrap_or_else(|| today.clone());
    let end_date = req.end_date.unwrap_or(today);
    let status_code = req.status_code.as_deref().unwrap_or(DEFAULT_STATUS_CODE);
    let domain = state.domain_or_default(req.domain_url.as_deref());

    let data = state
        .hris
        .fetch_team(&req.emp_code, &start_date, &end_date, status_code, domain)
        .await?;

    Ok(Json(json!({
        "success": true,
        "manager_code": req.emp_code.trim(),
        "period": format!("{} to {}", start_date.trim(), end_date.trim()),
        "data": data,
        "message": crate::tools::team::SUCCESS_MESSAGE,
        "timestamp": Utc::now().to_rfc3339(),
    })))
}

/// POST /api/policy/search
pub async fn search_policies(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<PolicySearchRequest>,
) -> Result<Json<Value>, AppError> {
    let data = state.policy.search(&req.query, &req.comp_code).await?;

    Ok(Json(json!({
        "success": true,
        "query": req.query.trim(),
        "data": data,
        "message": crate::tools::policy::SUCCESS_MESSAGE,
        "source": "HR Policy Knowledge Base",
        "timestamp": Utc::now().to_rfc3339(),
    })))
}
