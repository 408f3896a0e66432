//! Resource: tourism://place/{id} and tourism://user/{id}

use std::sync::Arc;
use tokio::sync::Mutex;

use serde_json::json;

use tourism_rec::{stats, PlaceId, UserId};

use crate::session::TourismSessionManager;
use crate::tools::render::place_json;
use crate::types::{McpError, McpResult, ReadResourceResult};

use super::json_resource;

/// Places listed in a user history.
const HISTORY_LIMIT: usize = 20;

pub async fn read_place(
    place_id: PlaceId,
    session: &Arc<Mutex<TourismSessionManager>>,
) -> McpResult<ReadResourceResult> {
    let session = session.lock().await;
    let dataset = session.dataset();
    let place = dataset
        .catalog
        .get(place_id)
        .ok_or_else(|| McpError::PlaceNotFound(place_id.to_string()))?;
    let entry = stats::place_stats(&dataset.ratings)
        .into_iter()
        .find(|s| s.place_id == place_id);

    let content = json!({
        "place": place_json(place),
        "stats": entry,
    });

    Ok(json_resource(format!("tourism://place/{place_id}"), &content))
}

pub async fn read_user(
    user_id: UserId,
    session: &Arc<Mutex<TourismSessionManager>>,
) -> McpResult<ReadResourceResult> {
    let session = session.lock().await;
    let dataset = session.dataset();
    if !dataset.user_ids().contains(&user_id) {
        return Err(McpError::UserNotFound(format!("user {user_id}")));
    }

    let history: Vec<_> = stats::user_history(&dataset.ratings, &dataset.catalog, user_id, HISTORY_LIMIT)
        .into_iter()
        .map(|(place, rating)| {
            json!({
                "place_id": place.id,
                "name": place.name,
                "city": place.city,
                "category": place.category,
                "rating": rating,
            })
        })
        .collect();

    let content = json!({
        "user_id": user_id,
        "rating_count": dataset.ratings.ratings_for_user(user_id).len(),
        "history": history,
    });

    Ok(json_resource(format!("tourism://user/{user_id}"), &content))
}
