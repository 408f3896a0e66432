//! MCP resource implementations.

pub mod place;
pub mod registry;
pub mod session;
pub mod similar;
pub mod stats;
pub mod templates;

pub use registry::ResourceRegistry;

use crate::types::{ReadResourceResult, ResourceContent};

/// Wrap a JSON document as a single-content resource result.
pub(crate) fn json_resource(uri: String, content: &serde_json::Value) -> ReadResourceResult {
    ReadResourceResult {
        contents: vec![ResourceContent {
            uri,
            mime_type: Some("application/json".to_string()),
            text: Some(serde_json::to_string_pretty(content).unwrap_or_default()),
            blob: None,
        }],
    }
}
