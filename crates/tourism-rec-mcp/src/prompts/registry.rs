//! Prompt registration and dispatch.

use serde_json::Value;

use crate::types::{McpError, McpResult, PromptArgument, PromptDefinition, PromptGetResult};

use super::{find_similar, plan_trip};

pub struct PromptRegistry;

impl PromptRegistry {
    pub fn list_prompts() -> Vec<PromptDefinition> {
        vec![
            PromptDefinition {
                name: "plan_trip".to_string(),
                description: Some(
                    "Guide for rating visited places and getting recommendations".to_string(),
                ),
                arguments: Some(vec![
                    PromptArgument {
                        name: "city".to_string(),
                        description: Some("Optional city to focus on".to_string()),
                        required: false,
                    },
                    PromptArgument {
                        name: "interests".to_string(),
                        description: Some("Optional interests, e.g. beaches, temples".to_string()),
                        required: false,
                    },
                ]),
            },
            PromptDefinition {
                name: "find_similar".to_string(),
                description: Some("Guide for finding places similar to a favorite".to_string()),
                arguments: Some(vec![PromptArgument {
                    name: "place".to_string(),
                    description: Some("Place id or exact name".to_string()),
                    required: true,
                }]),
            },
        ]
    }

    pub async fn get(name: &str, arguments: Option<Value>) -> McpResult<PromptGetResult> {
        let args = arguments.unwrap_or(Value::Object(serde_json::Map::new()));

        match name {
            "plan_trip" => plan_trip::expand(args),
            "find_similar" => find_similar::expand(args),
            _ => Err(McpError::PromptNotFound(name.to_string())),
        }
    }
}
