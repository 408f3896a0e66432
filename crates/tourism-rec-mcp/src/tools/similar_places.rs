//! `similar_places` tool: Content-similar places by category, description, and city.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde::Deserialize;
use serde_json::{json, Value};

use tourism_rec::PlaceRef;

use crate::session::TourismSessionManager;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::render::matches_json;

#[derive(Debug, Deserialize)]
struct SimilarParams {
    place: PlaceRef,
    #[serde(default)]
    top_k: Option<usize>,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "similar_places".to_string(),
        description: Some("Find places with similar category, description, and city".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "place": {
                    "type": ["integer", "string"],
                    "description": "Place id or exact place name"
                },
                "top_k": { "type": "integer", "default": 5 }
            },
            "required": ["place"]
        }),
    }
}

pub async fn execute(
    args: Value,
    session: &Arc<Mutex<TourismSessionManager>>,
) -> McpResult<ToolCallResult> {
    let params: SimilarParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let session = session.lock().await;
    let k = params.top_k.unwrap_or(session.defaults().content_top_k);
    let (query, matches) = session.similar_places(&params.place, k)?;

    Ok(ToolCallResult::json(&matches_json(
        query,
        &matches,
        &session.dataset().catalog,
    )))
}
