//! MCP endpoint: JSON-RPC 2.0 over HTTP POST.
//!
//! Supports `initialize`, `ping`, `tools/list` and `tools/call`.
//! Notifications (no `id`) are acknowledged with 202 and no body.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::mcp::catalog;
use crate::mcp::types::*;
use crate::state::AppState;

/// POST /mcp
pub async fn handle_rpc(
    State(state): State<Arc<AppState>>,
    Json(req): Json<JsonRpcRequest>,
) -> Response {
    let Some(id) = req.id.clone() else {
        tracing::debug!(method = %req.method, "MCP notification received");
        return StatusCode::ACCEPTED.into_response();
    };

    let resp = match req.method.as_str() {
        "initialize" => initialize(id, req.params.as_ref()),
        "ping" => JsonRpcResponse::result(id, json!({})),
        "tools/list" => {
            let result = ListToolsResult {
                tools: catalog::list_tools(&state.config.default_domain),
            };
            to_response(id, &result)
        }
        "tools/call" => {
            let params = req
                .params
                .clone()
                .map(serde_json::from_value::<CallToolParams>);
            match params {
                Some(Ok(p)) => {
                    tracing::info!(tool = %p.name, "MCP tool call");
                    let result = catalog::call_tool(&state, &p.name, p.arguments).await;
                    to_response(id, &result)
                }
                Some(Err(e)) => {
                    JsonRpcResponse::error(id, INVALID_PARAMS, format!("Invalid params: {}", e))
                }
                None => JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params"),
            }
        }
        other => {
            tracing::warn!(method = %other, "Unsupported MCP method");
            JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {}", other))
        }
    };

    Json(resp).into_response()
}

fn initialize(id: Value, params: Option<&Value>) -> JsonRpcResponse {
    let protocol_version = params
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str)
        .unwrap_or(PROTOCOL_VERSION)
        .to_string();

    let result = InitializeResult {
        protocol_version,
        capabilities: ServerCapabilities {
            tools: ToolsCapability {
                list_changed: false,
            },
        },
        server_info: Implementation {
            name: "hris-gateway".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };
    to_response(id, &result)
}

fn to_response<T: serde::Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(v) => JsonRpcResponse::result(id, v),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, format!("Internal error: {}", e)),
    }
}
