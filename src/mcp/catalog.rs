//! HRIS tool catalog and dispatch.
//!
//! This is the narrow interface an agent orchestrator uses: list the tools,
//! then call one by name with JSON arguments. Every call returns the
//! `{data, message, status}` envelope as text content, with `isError` set
//! whenever `status` is false.

use serde::Deserialize;
use serde_json::{json, Value};

use super::types::{CallToolResult, McpToolDef};
use crate::models::envelope::Envelope;
use crate::state::AppState;
use crate::tools::team::DEFAULT_STATUS_CODE;

pub const PROFILE_TOOL: &str = "get_employee_profile";
pub const TEAM_TOOL: &str = "get_team_details";
pub const POLICY_TOOL: &str = "search_policies";

#[derive(Debug, Deserialize)]
struct ProfileArgs {
    #[serde(default)]
    emp_code: String,
    domain_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TeamArgs {
    #[serde(default)]
    emp_code: String,
    #[serde(default)]
    start_date: String,
    #[serde(default)]
    end_date: String,
    status_code: Option<String>,
    domain_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PolicyArgs {
    #[serde(default)]
    query: String,
    #[serde(default)]
    comp_code: String,
}

pub fn list_tools(default_domain: &str) -> Vec<McpToolDef> {
    vec![
        McpToolDef {
            name: PROFILE_TOOL.to_string(),
            description: Some(
                "Get comprehensive employee profile details including personal information, \
                 contact details, employment information and reporting structure"
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "emp_code": { "type": "string", "description": "Employee code to fetch profile for" },
                    "domain_url": {
                        "type": "string",
                        "description": "Domain URL for authentication",
                        "default": default_domain
                    }
                },
                "required": ["emp_code"]
            }),
        },
        McpToolDef {
            name: TEAM_TOOL.to_string(),
            description: Some(
                "Get team details including attendance, leave status and shift information \
                 for a manager and date range"
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "emp_code": { "type": "string", "description": "Manager's employee code" },
                    "start_date": { "type": "string", "description": "Start date in YYYY-MM-DD format" },
                    "end_date": { "type": "string", "description": "End date in YYYY-MM-DD format" },
                    "status_code": {
                        "type": "string",
                        "description": "Status code",
                        "default": DEFAULT_STATUS_CODE
                    },
                    "domain_url": {
                        "type": "string",
                        "description": "Domain URL for authentication",
                        "default": default_domain
                    }
                },
                "required": ["emp_code", "start_date", "end_date"]
            }),
        },
        McpToolDef {
            name: POLICY_TOOL.to_string(),
            description: Some(
                "Search HR policies, FAQs and documentation using natural language queries"
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Question about HR policies, FAQs or documentation" },
                    "comp_code": { "type": "string", "description": "Company code" }
                },
                "required": ["query", "comp_code"]
            }),
        },
    ]
}

/// Run the named tool. Never fails: every problem comes back as an error result.
pub async fn call_tool(state: &AppState, name: &str, arguments: Option<Value>) -> CallToolResult {
    let args = arguments.unwrap_or_else(|| json!({}));

    let envelope = match name {
        PROFILE_TOOL => match serde_json::from_value::<ProfileArgs>(args) {
            Ok(a) => {
                let domain = state.domain_or_default(a.domain_url.as_deref());
                state.hris.execute_profile_query(&a.emp_code, domain).await
            }
            Err(e) => invalid_arguments(name, e),
        },
        TEAM_TOOL => match serde_json::from_value::<TeamArgs>(args) {
            Ok(a) => {
                let domain = state.domain_or_default(a.domain_url.as_deref());
                let status_code = a.status_code.as_deref().unwrap_or(DEFAULT_STATUS_CODE);
                state
                    .hris
                    .execute_team_query(&a.emp_code, &a.start_date, &a.end_date, status_code, domain)
                    .await
            }
            Err(e) => invalid_arguments(name, e),
        },
        POLICY_TOOL => match serde_json::from_value::<PolicyArgs>(args) {
            Ok(a) => state.policy.execute_policy_search(&a.query, &a.comp_code).await,
            Err(e) => invalid_arguments(name, e),
        },
        other => {
            tracing::warn!(tool = %other, "Unknown tool requested");
            return CallToolResult::text(format!("Unknown tool: {}", other), true);
        }
    };

    envelope_result(&envelope)
}

fn invalid_arguments(tool: &str, e: serde_json::Error) -> Envelope {
    Envelope::failure(format!("Invalid arguments for {}: {}", tool, e))
}

fn envelope_result(envelope: &Envelope) -> CallToolResult {
    let text = serde_json::to_string_pretty(envelope)
        .unwrap_or_else(|_| envelope.message.clone());
    CallToolResult::text(text, !envelope.status)
}
