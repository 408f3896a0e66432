//! Resource URI templates and static resource definitions.

use crate::types::{ResourceDefinition, ResourceTemplateDefinition};

pub fn list_templates() -> Vec<ResourceTemplateDefinition> {
    vec![
        ResourceTemplateDefinition {
            uri_template: "tourism://place/{id}".to_string(),
            name: "Place".to_string(),
            description: Some("A place with catalog data and rating statistics".to_string()),
            mime_type: Some("application/json".to_string()),
        },
        ResourceTemplateDefinition {
            uri_template: "tourism://user/{id}".to_string(),
            name: "User History".to_string(),
            description: Some("Places a registered user rated, highest first".to_string()),
            mime_type: Some("application/json".to_string()),
        },
        ResourceTemplateDefinition {
            uri_template: "tourism://similar/{id}".to_string(),
            name: "Similar Places".to_string(),
            description: Some("Top content-similar places".to_string()),
            mime_type: Some("application/json".to_string()),
        },
    ]
}

pub fn list_resources() -> Vec<ResourceDefinition> {
    vec![
        ResourceDefinition {
            uri: "tourism://stats".to_string(),
            name: "Dataset Statistics".to_string(),
            description: Some("Totals and rating distribution".to_string()),
            mime_type: Some("application/json".to_string()),
        },
        ResourceDefinition {
            uri: "tourism://top".to_string(),
            name: "Top Places".to_string(),
            description: Some("Best rated and most rated places".to_string()),
            mime_type: Some("application/json".to_string()),
        },
        ResourceDefinition {
            uri: "tourism://session".to_string(),
            name: "Current Session".to_string(),
            description: Some("Session id and ad-hoc ratings".to_string()),
            mime_type: Some("application/json".to_string()),
        },
    ]
}
