//! `session_ratings` tool: List or clear the current session's ratings.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::session::TourismSessionManager;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
struct SessionRatingsParams {
    #[serde(default)]
    clear: bool,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "session_ratings".to_string(),
        description: Some("List the places rated in the current session".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "clear": {
                    "type": "boolean",
                    "default": false,
                    "description": "Discard all session ratings after listing them"
                }
            }
        }),
    }
}

pub async fn execute(
    args: Value,
    session: &Arc<Mutex<TourismSessionManager>>,
) -> McpResult<ToolCallResult> {
    let params: SessionRatingsParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let mut session = session.lock().await;
    let ratings = session_ratings_json(&session);

    if params.clear {
        session.clear_session_ratings();
    }

    Ok(ToolCallResult::json(&json!({
        "session_id": session.current_session_id(),
        "cleared": params.clear,
        "ratings": ratings,
    })))
}

/// The session's ratings with place names, ascending by place id.
pub fn session_ratings_json(session: &TourismSessionManager) -> Vec<Value> {
    let catalog = &session.dataset().catalog;
    session
        .session_ratings()
        .iter()
        .map(|(place_id, rating)| {
            json!({
                "place_id": place_id,
                "name": catalog.get(place_id).map(|p| p.name.as_str()),
                "rating": rating,
            })
        })
        .collect()
}
