//! TourismRec MCP Server: destination recommendations for LLM agents.

pub mod config;
pub mod prompts;
pub mod protocol;
pub mod repl;
pub mod resources;
pub mod session;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::{resolve_dataset_path, EngineDefaults};
pub use protocol::ProtocolHandler;
pub use session::TourismSessionManager;
pub use transport::StdioTransport;
