//! `session_end` tool: End the current session.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde_json::{json, Value};

use crate::session::TourismSessionManager;
use crate::types::{McpResult, ToolCallResult, ToolDefinition};

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "session_end".to_string(),
        description: Some("End the current session and discard its ad-hoc ratings".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {}
        }),
    }
}

pub async fn execute(
    _args: Value,
    session: &Arc<Mutex<TourismSessionManager>>,
) -> McpResult<ToolCallResult> {
    let mut session = session.lock().await;
    let started_at = session.started_at();
    let (session_id, rated) = session.end_session()?;
    let duration = chrono::Utc::now() - started_at;

    Ok(ToolCallResult::json(&json!({
        "session_id": session_id,
        "ratings_discarded": rated,
        "duration_secs": duration.num_seconds(),
        "status": "ended"
    })))
}
