//! Tool registration and dispatch.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde_json::Value;

use crate::session::TourismSessionManager;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::{
    demo_ratings, place_stats, popular_places, rate_place, recommend_for_session,
    recommend_for_user, session_end, session_ratings, session_start, similar_places,
};

pub struct ToolRegistry;

impl ToolRegistry {
    pub fn list_tools() -> Vec<ToolDefinition> {
        vec![
            rate_place::definition(),
            session_ratings::definition(),
            recommend_for_user::definition(),
            recommend_for_session::definition(),
            similar_places::definition(),
            popular_places::definition(),
            place_stats::definition(),
            demo_ratings::definition(),
            session_start::definition(),
            session_end::definition(),
        ]
    }

    pub async fn call(
        name: &str,
        arguments: Option<Value>,
        session: &Arc<Mutex<TourismSessionManager>>,
    ) -> McpResult<ToolCallResult> {
        let args = arguments.unwrap_or(Value::Object(serde_json::Map::new()));
        tracing::debug!("Tool call: {name}");

        match name {
            "rate_place" => rate_place::execute(args, session).await,
            "session_ratings" => session_ratings::execute(args, session).await,
            "recommend_for_user" => recommend_for_user::execute(args, session).await,
            "recommend_for_session" => recommend_for_session::execute(args, session).await,
            "similar_places" => similar_places::execute(args, session).await,
            "popular_places" => popular_places::execute(args, session).await,
            "place_stats" => place_stats::execute(args, session).await,
            "demo_ratings" => demo_ratings::execute(args, session).await,
            "session_start" => session_start::execute(args, session).await,
            "session_end" => session_end::execute(args, session).await,
            _ => Err(McpError::ToolNotFound(name.to_string())),
        }
    }
}
