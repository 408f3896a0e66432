//! Resource: tourism://stats and tourism://top

use std::sync::Arc;
use tokio::sync::Mutex;

use serde_json::json;

use tourism_rec::stats;

use crate::session::TourismSessionManager;
use crate::types::{McpResult, ReadResourceResult};

use super::json_resource;

pub async fn read_stats(
    session: &Arc<Mutex<TourismSessionManager>>,
) -> McpResult<ReadResourceResult> {
    let session = session.lock().await;
    let dataset = session.dataset();

    let content = json!({
        "overview": stats::overview(&dataset.ratings, &dataset.catalog),
        "rating_distribution": stats::rating_distribution(&dataset.ratings),
        "registered_users": dataset.user_ids().len(),
        "cities": dataset.catalog.cities(),
        "created_at": dataset.created_at,
        "updated_at": dataset.updated_at,
        "file_path": session.file_path().display().to_string(),
    });

    Ok(json_resource("tourism://stats".to_string(), &content))
}

pub async fn read_top(
    session: &Arc<Mutex<TourismSessionManager>>,
) -> McpResult<ReadResourceResult> {
    let session = session.lock().await;
    let dataset = session.dataset();
    let defaults = session.defaults();
    let all = stats::place_stats(&dataset.ratings);

    let named = |list: Vec<stats::PlaceStats>| -> Vec<serde_json::Value> {
        list.into_iter()
            .map(|s| {
                json!({
                    "place_id": s.place_id,
                    "name": dataset.catalog.get(s.place_id).map(|p| p.name.as_str()),
                    "mean_rating": s.mean_rating,
                    "rating_count": s.rating_count,
                    "distinct_raters": s.distinct_raters,
                })
            })
            .collect()
    };

    let content = json!({
        "min_ratings": defaults.min_ratings,
        "top_rated": named(stats::top_by_rating(&all, defaults.min_ratings, defaults.top_n)),
        "most_rated": named(stats::top_by_raters(&all, defaults.top_n)),
    });

    Ok(json_resource("tourism://top".to_string(), &content))
}
