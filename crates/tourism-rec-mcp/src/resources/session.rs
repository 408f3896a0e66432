//! Resource: tourism://session

use std::sync::Arc;
use tokio::sync::Mutex;

use serde_json::json;

use crate::session::TourismSessionManager;
use crate::tools::session_ratings::session_ratings_json;
use crate::types::{McpResult, ReadResourceResult};

use super::json_resource;

pub async fn read_session(
    session: &Arc<Mutex<TourismSessionManager>>,
) -> McpResult<ReadResourceResult> {
    let session = session.lock().await;

    let content = json!({
        "session_id": session.current_session_id(),
        "token": session.session_token().to_string(),
        "started_at": session.started_at().to_rfc3339(),
        "rating_count": session.session_ratings().len(),
        "ratings": session_ratings_json(&session),
    });

    Ok(json_resource("tourism://session".to_string(), &content))
}
