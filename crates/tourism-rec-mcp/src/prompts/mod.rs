//! MCP prompt implementations.

pub mod find_similar;
pub mod plan_trip;
pub mod registry;

pub use registry::PromptRegistry;
