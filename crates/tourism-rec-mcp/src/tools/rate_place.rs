//! `rate_place` tool: Rate places for the current session's ad-hoc user.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde::Deserialize;
use serde_json::{json, Value};

use tourism_rec::PlaceRef;

use crate::session::TourismSessionManager;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
struct RateEntry {
    place: PlaceRef,
    rating: i64,
}

#[derive(Debug, Deserialize)]
struct RateParams {
    #[serde(default)]
    place: Option<PlaceRef>,
    #[serde(default)]
    rating: Option<i64>,
    #[serde(default)]
    ratings: Option<Vec<RateEntry>>,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "rate_place".to_string(),
        description: Some(
            "Rate a place 1-5 in the current session, by id or exact name".to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "place": {
                    "type": ["integer", "string"],
                    "description": "Place id or exact place name"
                },
                "rating": { "type": "integer", "minimum": 1, "maximum": 5 },
                "ratings": {
                    "type": "array",
                    "description": "Batch form; unknown places are skipped",
                    "items": {
                        "type": "object",
                        "properties": {
                            "place": { "type": ["integer", "string"] },
                            "rating": { "type": "integer", "minimum": 1, "maximum": 5 }
                        },
                        "required": ["place", "rating"]
                    }
                }
            }
        }),
    }
}

pub async fn execute(
    args: Value,
    session: &Arc<Mutex<TourismSessionManager>>,
) -> McpResult<ToolCallResult> {
    let params: RateParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let mut session = session.lock().await;

    if let Some(entries) = params.ratings {
        let entries: Vec<(PlaceRef, i64)> =
            entries.into_iter().map(|e| (e.place, e.rating)).collect();
        let batch = session.rate_places(&entries)?;
        return Ok(ToolCallResult::json(&json!({
            "rated": batch.rated,
            "skipped": batch.skipped,
            "session_rating_count": session.session_ratings().len(),
        })));
    }

    let (place, rating) = match (params.place, params.rating) {
        (Some(place), Some(rating)) => (place, rating),
        _ => {
            return Err(McpError::InvalidParams(
                "Either 'place' with 'rating', or 'ratings' is required".to_string(),
            ))
        }
    };

    let (place, previous) = session.rate_place(&place, rating)?;
    let (place_id, name) = (place.id, place.name.clone());

    Ok(ToolCallResult::json(&json!({
        "place_id": place_id,
        "name": name,
        "rating": rating,
        "previous_rating": previous,
        "session_rating_count": session.session_ratings().len(),
    })))
}
