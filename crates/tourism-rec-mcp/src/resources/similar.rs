//! Resource: tourism://similar/{id}

use std::sync::Arc;
use tokio::sync::Mutex;

use tourism_rec::{PlaceId, PlaceRef};

use crate::session::TourismSessionManager;
use crate::tools::render::matches_json;
use crate::types::{McpResult, ReadResourceResult};

use super::json_resource;

pub async fn read_similar(
    place_id: PlaceId,
    session: &Arc<Mutex<TourismSessionManager>>,
) -> McpResult<ReadResourceResult> {
    let session = session.lock().await;
    let k = session.defaults().content_top_k;
    let (query, matches) = session.similar_places(&PlaceRef::Id(place_id), k)?;
    let content = matches_json(query, &matches, &session.dataset().catalog);

    Ok(json_resource(format!("tourism://similar/{place_id}"), &content))
}
