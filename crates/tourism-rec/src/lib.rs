//! TourismRec: collaborative and content-based recommendation of tourism destinations.

pub mod catalog;
pub mod content;
pub mod dataset;
pub mod engine;
pub mod matrix;
pub mod neighborhood;
pub mod predict;
pub mod similarity;
pub mod stats;
pub mod storage;
pub mod store;
pub mod synthetic;
pub mod text;
pub mod types;

pub use catalog::{PlaceCatalog, PlaceRef};
pub use content::{ContentIndex, TfIdfVectorizer, DEFAULT_TOP_K};
pub use dataset::Dataset;
pub use engine::{
    Outcome, RecommendConfig, Recommendation, Recommender, DEFAULT_THRESHOLD, DEFAULT_TOP_N,
};
pub use matrix::{ColumnUniverse, UserItemMatrix};
pub use neighborhood::{select_neighbors, Neighborhood};
pub use predict::{candidate_places, predict_ratings};
pub use similarity::{cosine_similarity, similarity_row, SimilarityMatrix};
pub use stats::{Overview, PlaceStats};
pub use storage::{TrecReader, TrecWriter};
pub use store::{RatingStore, SessionRatings, UserRef};
pub use types::*;
