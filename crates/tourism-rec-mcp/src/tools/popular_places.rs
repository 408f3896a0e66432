//! `popular_places` tool: Highest rated places, optionally in one city.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::session::TourismSessionManager;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::render::place_json;

#[derive(Debug, Deserialize)]
struct PopularParams {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "popular_places".to_string(),
        description: Some("List the highest rated places, optionally in one city".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "city": { "type": "string", "description": "Only places in this city" },
                "limit": { "type": "integer", "default": 5 }
            }
        }),
    }
}

pub async fn execute(
    args: Value,
    session: &Arc<Mutex<TourismSessionManager>>,
) -> McpResult<ToolCallResult> {
    let params: PopularParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let session = session.lock().await;
    let catalog = &session.dataset().catalog;
    let limit = params.limit.unwrap_or(session.defaults().popular_n);
    let places: Vec<Value> = catalog
        .popular(params.city.as_deref(), limit)
        .into_iter()
        .map(place_json)
        .collect();

    Ok(ToolCallResult::json(&json!({
        "city": params.city,
        "total": places.len(),
        "places": places,
        "cities": catalog.cities(),
    })))
}
