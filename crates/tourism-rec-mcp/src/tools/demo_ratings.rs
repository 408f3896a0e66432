//! `demo_ratings` tool: Fill the session with random ratings for a quick demo.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::session::TourismSessionManager;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::session_ratings::session_ratings_json;

#[derive(Debug, Deserialize)]
struct DemoParams {
    #[serde(default)]
    seed: Option<u64>,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "demo_ratings".to_string(),
        description: Some(
            "Replace the session's ratings with random 1-5 ratings for 10 random places"
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "seed": { "type": "integer", "description": "Random seed (default 42)" }
            }
        }),
    }
}

pub async fn execute(
    args: Value,
    session: &Arc<Mutex<TourismSessionManager>>,
) -> McpResult<ToolCallResult> {
    let params: DemoParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let mut session = session.lock().await;
    let count = session.demo_ratings(params.seed)?;

    Ok(ToolCallResult::json(&json!({
        "count": count,
        "ratings": session_ratings_json(&session),
    })))
}
