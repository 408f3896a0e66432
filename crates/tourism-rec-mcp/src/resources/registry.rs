//! Resource registration and dispatch.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::session::TourismSessionManager;
use crate::types::{
    McpError, McpResult, ReadResourceResult, ResourceDefinition, ResourceTemplateDefinition,
};

use super::{place, session, similar, stats, templates};

pub struct ResourceRegistry;

impl ResourceRegistry {
    pub fn list_templates() -> Vec<ResourceTemplateDefinition> {
        templates::list_templates()
    }

    pub fn list_resources() -> Vec<ResourceDefinition> {
        templates::list_resources()
    }

    pub async fn read(
        uri: &str,
        session: &Arc<Mutex<TourismSessionManager>>,
    ) -> McpResult<ReadResourceResult> {
        if let Some(id_str) = uri.strip_prefix("tourism://place/") {
            place::read_place(parse_id(id_str, "place")?, session).await
        } else if let Some(id_str) = uri.strip_prefix("tourism://user/") {
            place::read_user(parse_id(id_str, "user")?, session).await
        } else if let Some(id_str) = uri.strip_prefix("tourism://similar/") {
            similar::read_similar(parse_id(id_str, "place")?, session).await
        } else if uri == "tourism://stats" {
            stats::read_stats(session).await
        } else if uri == "tourism://top" {
            stats::read_top(session).await
        } else if uri == "tourism://session" {
            session::read_session(session).await
        } else {
            Err(McpError::ResourceNotFound(uri.to_string()))
        }
    }
}

fn parse_id(raw: &str, kind: &str) -> McpResult<u32> {
    raw.parse()
        .map_err(|_| McpError::InvalidParams(format!("Invalid {kind} ID: {raw}")))
}
