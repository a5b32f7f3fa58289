//! Interactive tools exposed via Model Context Protocol
//!
//! Provides `get_latest_launch` on top of the artifact cache, plus
//! `get_upcoming_launches` and `get_company_info` by delegating to the
//! launch API collaborator.

use rust_mcp_sdk::{
    macros,
    schema::{CallToolRequestParams, CallToolResult, ContentBlock, TextContent, Tool},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::mcp::rpc::{app_error_to_json_rpc, json_rpc_error, json_rpc_result};
use crate::AppState;

pub const DEFAULT_UPCOMING_LIMIT: u32 = 5;

#[macros::mcp_tool(
    name = "get_latest_launch",
    description = "Return the most recent launch record from the local data artifact"
)]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct GetLatestLaunchTool {}

#[macros::mcp_tool(
    name = "get_upcoming_launches",
    description = "Fetch upcoming launches from the launch API"
)]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct GetUpcomingLaunchesTool {
    pub limit: Option<u32>,
}

#[macros::mcp_tool(
    name = "get_company_info",
    description = "Fetch company information from the launch API"
)]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct GetCompanyInfoTool {}

pub fn build_tools_list() -> Vec<Tool> {
    vec![
        GetLatestLaunchTool::tool(),
        GetUpcomingLaunchesTool::tool(),
        GetCompanyInfoTool::tool(),
    ]
}

pub async fn handle_tools_call(
    state: &AppState,
    id: Option<Value>,
    params: Option<Value>,
) -> Value {
    let Some(raw_params) = params else {
        return json_rpc_error(id, -32603, "Invalid tool call parameters");
    };

    let tool_call: CallToolRequestParams = match serde_json::from_value(raw_params) {
        Ok(value) => value,
        Err(_) => return json_rpc_error(id, -32603, "Invalid tool call parameters"),
    };

    match tool_call.name.as_str() {
        "get_latest_launch" => match state.cache.load().await {
            Ok(document) => launch_document_result(id, &document),
            Err(err) => app_error_to_json_rpc(id, AppError::data_unavailable(err.to_string())),
        },
        "get_upcoming_launches" => {
            let arguments: GetUpcomingLaunchesTool = match serde_json::from_value(Value::Object(
                tool_call.arguments.unwrap_or_default(),
            )) {
                Ok(value) => value,
                Err(_) => return json_rpc_error(id, -32603, "Invalid tool call parameters"),
            };

            let limit = match validate_limit(arguments.limit) {
                Ok(limit) => limit,
                Err(err) => return app_error_to_json_rpc(id, err),
            };

            match state.launch_provider.upcoming_launches(limit).await {
                Ok(document) => launch_document_result(id, &document),
                Err(err) => app_error_to_json_rpc(id, err),
            }
        }
        "get_company_info" => match state.launch_provider.company_info().await {
            Ok(document) => launch_document_result(id, &document),
            Err(err) => app_error_to_json_rpc(id, err),
        },
        _ => json_rpc_error(id, -32601, &format!("Unknown tool: {}", tool_call.name)),
    }
}

fn validate_limit(limit: Option<u32>) -> Result<u32, AppError> {
    match limit {
        None => Ok(DEFAULT_UPCOMING_LIMIT),
        Some(0) => Err(AppError::invalid_arguments(
            "limit must be a positive integer",
        )),
        Some(value) => Ok(value),
    }
}

/// Wraps a launch document as an indented-JSON text content block, the
/// result shape shared by every tool.
fn launch_document_result(id: Option<Value>, document: &Value) -> Value {
    let text = serde_json::to_string_pretty(document).expect("launch document serialization");

    json_rpc_result(
        id,
        serde_json::to_value(CallToolResult {
            content: vec![ContentBlock::from(TextContent::new(text, None, None))],
            is_error: None,
            meta: None,
            structured_content: None,
        })
        .expect("tool result serialization"),
    )
}
