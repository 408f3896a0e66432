//! `recommend_for_session` tool: Recommendations for the session's ad-hoc ratings.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::session::TourismSessionManager;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::render::recommendation_json;

#[derive(Debug, Deserialize)]
struct SessionRecommendParams {
    #[serde(default)]
    threshold: Option<f64>,
    #[serde(default)]
    top_n: Option<usize>,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "recommend_for_session".to_string(),
        description: Some(
            "Recommend places from the ratings given in this session (rate_place first)"
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "threshold": {
                    "type": "number",
                    "description": "Minimum user similarity, exclusive, in [0, 1)"
                },
                "top_n": { "type": "integer", "minimum": 1 }
            }
        }),
    }
}

pub async fn execute(
    args: Value,
    session: &Arc<Mutex<TourismSessionManager>>,
) -> McpResult<ToolCallResult> {
    let params: SessionRecommendParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let session = session.lock().await;
    if session.session_ratings().is_empty() {
        return Ok(ToolCallResult::error(
            "No places rated in this session yet. Use rate_place or demo_ratings first."
                .to_string(),
        ));
    }

    let config = session.recommend_config(params.threshold, params.top_n)?;
    let rec = session.recommend_for_session(&config)?;

    Ok(ToolCallResult::json(&recommendation_json(
        &rec,
        &session.dataset().catalog,
    )))
}
