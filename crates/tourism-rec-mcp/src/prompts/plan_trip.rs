//! `plan_trip` prompt: Guide for rating places and building a trip from recommendations.

use serde_json::Value;

use crate::types::{McpResult, PromptGetResult, PromptMessage, ToolContent};

pub fn expand(args: Value) -> McpResult<PromptGetResult> {
    let city = args.get("city").and_then(|v| v.as_str()).unwrap_or("");
    let interests = args
        .get("interests")
        .and_then(|v| v.as_str())
        .unwrap_or("");

    let mut context = String::new();
    if !city.is_empty() {
        context.push_str(&format!("\nDestination city: {city}"));
    }
    if !interests.is_empty() {
        context.push_str(&format!("\nInterests: {interests}"));
    }

    let popular_step = if city.is_empty() {
        "Use popular_places to show well-known destinations".to_string()
    } else {
        format!("Use popular_places with city \"{city}\" to show local highlights")
    };

    let text = format!(
        "I want to plan a trip in Indonesia.\n\
         {context}\n\n\
         Please:\n\
         1. {popular_step}\n\
         2. Ask which of those places I have visited and how I liked them (1-5)\n\
         3. Record each answer with rate_place\n\
         4. Call recommend_for_session and explain the top suggestions and their tiers\n\
         5. If no neighbors are found, lower the threshold or ask me to rate more places"
    );

    Ok(PromptGetResult {
        description: Some("Guide for planning a trip from personal ratings".to_string()),
        messages: vec![PromptMessage {
            role: "user".to_string(),
            content: ToolContent::Text { text },
        }],
    })
}
