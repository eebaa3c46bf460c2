//! Tool dispatch API handlers.
//!
//! The assistant's tool calls arrive here as JSON payloads. Decoding into
//! `ToolRequest` is the argument validation step: a payload that names an
//! unknown tool or is missing a required argument is rejected by axum with
//! 422 before it can reach the engine.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use shopsight_core::{descriptors, dispatch, ToolDescriptor, ToolRequest, ToolResponse};

use crate::metrics::TOOL_INVOCATIONS_TOTAL;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ToolCatalogResponse {
    pub tools: &'static [ToolDescriptor],
    pub total: usize,
}

/// GET /api/v1/tools
///
/// Descriptors for every dispatchable tool.
pub async fn list_tools() -> Json<ToolCatalogResponse> {
    let tools = descriptors();
    Json(ToolCatalogResponse {
        tools,
        total: tools.len(),
    })
}

/// POST /api/v1/tools/invoke
///
/// Dispatch one tool call. Every decoded request gets a 200 with a
/// `ToolResponse` body; a missing product comes back as a `not_found`
/// payload rather than an HTTP error, so the assistant can phrase it.
pub async fn invoke_tool(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ToolRequest>,
) -> Json<ToolResponse> {
    let tool = request.name();
    let response = dispatch(state.engine(), request);

    TOOL_INVOCATIONS_TOTAL
        .with_label_values(&[tool, response.outcome()])
        .inc();

    Json(response)
}
