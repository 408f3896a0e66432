//! `recommend_for_user` tool: Collaborative-filtering recommendations for a registered user.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde::Deserialize;
use serde_json::{json, Value};

use tourism_rec::UserId;

use crate::session::TourismSessionManager;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::render::recommendation_json;

#[derive(Debug, Deserialize)]
struct RecommendParams {
    user_id: UserId,
    #[serde(default)]
    threshold: Option<f64>,
    #[serde(default)]
    top_n: Option<usize>,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "recommend_for_user".to_string(),
        description: Some(
            "Recommend unrated places for a registered user from similar users' ratings"
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "user_id": { "type": "integer", "description": "Registered user id" },
                "threshold": {
                    "type": "number",
                    "description": "Minimum user similarity, exclusive, in [0, 1)"
                },
                "top_n": { "type": "integer", "minimum": 1 }
            },
            "required": ["user_id"]
        }),
    }
}

pub async fn execute(
    args: Value,
    session: &Arc<Mutex<TourismSessionManager>>,
) -> McpResult<ToolCallResult> {
    let params: RecommendParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let session = session.lock().await;
    let config = session.recommend_config(params.threshold, params.top_n)?;
    let rec = session.recommend_for_user(params.user_id, &config)?;

    Ok(ToolCallResult::json(&recommendation_json(
        &rec,
        &session.dataset().catalog,
    )))
}
