//! Core data types for ratings, places, and recommendation results.

use serde::{Deserialize, Serialize};

/// Identifier of a registered user.
pub type UserId = u32;

/// Identifier of a place in the catalog.
pub type PlaceId = u32;

/// Lowest valid rating.
pub const MIN_RATING: u8 = 1;

/// Highest valid rating.
pub const MAX_RATING: u8 = 5;

/// Check that a raw rating value lies in 1..=5.
pub fn validate_rating(value: i64) -> RecResult<u8> {
    if (MIN_RATING as i64..=MAX_RATING as i64).contains(&value) {
        Ok(value as u8)
    } else {
        Err(RecError::InvalidRating(value))
    }
}

/// A single (user, place, rating) record from the bulk dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub user_id: UserId,
    pub place_id: PlaceId,
    pub rating: u8,
}

/// A tourism destination. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    pub category: String,
    pub city: String,
    pub price: f64,
    /// Static aggregate rating shipped with the catalog.
    pub rating: f64,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub description: String,
}

/// A registered user. Demographic fields are carried but never read by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

/// Row key of the user-item matrix.
///
/// The ad-hoc session user gets its own variant, so it can never collide
/// with a registered identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum UserKey {
    Registered(UserId),
    Ephemeral,
}

impl std::fmt::Display for UserKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserKey::Registered(id) => write!(f, "user {id}"),
            UserKey::Ephemeral => write!(f, "session user"),
        }
    }
}

/// A user similar enough to the target to inform predictions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub user: UserKey,
    pub similarity: f64,
}

/// A predicted rating for a place the target user has not rated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub place_id: PlaceId,
    pub predicted_rating: f64,
    /// Size of the whole neighborhood used for the request.
    pub neighborhood_size: usize,
    /// Neighbors that actually rated this place.
    pub contributors: usize,
}

/// A content-similarity match between two places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentMatch {
    pub place_id: PlaceId,
    pub similarity: f64,
}

/// Errors that can occur in the recommendation engine.
#[derive(thiserror::Error, Debug)]
pub enum RecError {
    #[error("No ratings found for {0}")]
    UserNotFound(UserKey),

    #[error("Place not found: {0}")]
    PlaceNotFound(PlaceId),

    #[error("Place not found: {0:?}")]
    PlaceNameNotFound(String),

    #[error("Invalid rating {0}: ratings must be between 1 and 5")]
    InvalidRating(i64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type RecResult<T> = Result<T, RecError>;
