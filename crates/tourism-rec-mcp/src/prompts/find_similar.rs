//! `find_similar` prompt: Guide for exploring places like one the user enjoyed.

use serde_json::Value;

use crate::types::{McpError, McpResult, PromptGetResult, PromptMessage, ToolContent};

pub fn expand(args: Value) -> McpResult<PromptGetResult> {
    let place = match args.get("place") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => {
            return Err(McpError::InvalidParams(
                "Argument 'place' is required".to_string(),
            ))
        }
    };

    let text = format!(
        "I really enjoyed {place} and want to find places like it.\n\n\
         Please:\n\
         1. Use similar_places with place \"{place}\" to find places with similar character\n\
         2. Read tourism://place/{{id}} for the best matches to check their ratings\n\
         3. Group the suggestions by city and explain what they have in common with {place}"
    );

    Ok(PromptGetResult {
        description: Some("Guide for finding places similar to a favorite".to_string()),
        messages: vec![PromptMessage {
            role: "user".to_string(),
            content: ToolContent::Text { text },
        }],
    })
}
