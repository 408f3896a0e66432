//! MCP tool implementations.

pub mod demo_ratings;
pub mod place_stats;
pub mod popular_places;
pub mod rate_place;
pub mod recommend_for_session;
pub mod recommend_for_user;
pub mod registry;
pub mod render;
pub mod session_end;
pub mod session_ratings;
pub mod session_start;
pub mod similar_places;

pub use registry::ToolRegistry;
