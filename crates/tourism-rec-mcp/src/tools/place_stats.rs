//! `place_stats` tool: Rating statistics for one place or the whole dataset.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde::Deserialize;
use serde_json::{json, Value};

use tourism_rec::{stats, PlaceRef};

use crate::session::TourismSessionManager;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::render::place_json;

#[derive(Debug, Deserialize)]
struct StatsParams {
    #[serde(default)]
    place: Option<PlaceRef>,
    #[serde(default)]
    limit: Option<usize>,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "place_stats".to_string(),
        description: Some(
            "Rating statistics for a place, or dataset totals and top places".to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "place": {
                    "type": ["integer", "string"],
                    "description": "Place id or exact name; omit for dataset-wide stats"
                },
                "limit": { "type": "integer", "default": 5 }
            }
        }),
    }
}

pub async fn execute(
    args: Value,
    session: &Arc<Mutex<TourismSessionManager>>,
) -> McpResult<ToolCallResult> {
    let params: StatsParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let session = session.lock().await;
    let dataset = session.dataset();
    let all = stats::place_stats(&dataset.ratings);

    if let Some(place) = params.place {
        let place = dataset.catalog.resolve(&place)?;
        let entry = all.iter().find(|s| s.place_id == place.id);
        return Ok(ToolCallResult::json(&json!({
            "place": place_json(place),
            "mean_rating": entry.map(|s| s.mean_rating),
            "rating_count": entry.map_or(0, |s| s.rating_count),
            "distinct_raters": entry.map_or(0, |s| s.distinct_raters),
        })));
    }

    let defaults = session.defaults();
    let limit = params.limit.unwrap_or(defaults.popular_n);
    Ok(ToolCallResult::json(&json!({
        "overview": stats::overview(&dataset.ratings, &dataset.catalog),
        "rating_distribution": stats::rating_distribution(&dataset.ratings),
        "top_rated": stats::top_by_rating(&all, defaults.min_ratings, limit),
        "most_rated": stats::top_by_raters(&all, limit),
    })))
}
