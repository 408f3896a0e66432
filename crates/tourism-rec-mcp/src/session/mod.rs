//! Session management for the loaded dataset.

pub mod manager;

pub use manager::{BatchRating, TourismSessionManager};
