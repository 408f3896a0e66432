//! Recommendation pipeline: matrix, similarity, neighborhood, prediction.
//!
//! Everything is rebuilt from the rating snapshot on every call. Session
//! ratings are merged into a private entry list for that call only and never
//! touch the shared store.

use serde::{Deserialize, Serialize};

use crate::catalog::PlaceCatalog;
use crate::matrix::{ColumnUniverse, UserItemMatrix};
use crate::neighborhood::select_neighbors;
use crate::predict::{candidate_places, predict_ratings};
use crate::similarity::similarity_row;
use crate::store::{RatingStore, UserRef};
use crate::types::{Neighbor, PlaceId, Prediction, RecError, RecResult, UserKey};

/// Default similarity threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Default number of predictions returned.
pub const DEFAULT_TOP_N: usize = 10;

/// Per-request tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendConfig {
    /// Neighbors need similarity strictly greater than this.
    pub threshold: f64,
    pub top_n: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl RecommendConfig {
    pub fn validate(&self) -> RecResult<()> {
        if !(self.threshold.is_finite() && (0.0..1.0).contains(&self.threshold)) {
            return Err(RecError::InvalidConfig(format!(
                "threshold {} must be in [0, 1)",
                self.threshold
            )));
        }
        if self.top_n == 0 {
            return Err(RecError::InvalidConfig(
                "result count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Terminal state of one recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "predictions", rename_all = "snake_case")]
pub enum Outcome {
    /// Ranked predictions. Empty when the user has rated every place.
    Ranked(Vec<Prediction>),
    /// Nobody cleared the similarity threshold.
    EmptyNeighborhood,
    /// Unrated places exist but no neighbor rated any of them.
    NoPredictableCandidates,
}

/// Result of a recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub target: UserKey,
    pub neighbors: Vec<Neighbor>,
    pub candidate_count: usize,
    pub outcome: Outcome,
}

impl Recommendation {
    /// Predictions, empty for non-ranked outcomes.
    pub fn predictions(&self) -> &[Prediction] {
        match &self.outcome {
            Outcome::Ranked(p) => p,
            _ => &[],
        }
    }
}

/// Runs the collaborative-filtering pipeline over a rating snapshot.
pub struct Recommender<'a> {
    store: &'a RatingStore,
    catalog: Option<&'a PlaceCatalog>,
}

impl<'a> Recommender<'a> {
    pub fn new(store: &'a RatingStore) -> Self {
        Self {
            store,
            catalog: None,
        }
    }

    /// Use the full catalog as the column universe instead of rated places only.
    pub fn with_catalog(mut self, catalog: &'a PlaceCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Build the matrix for one request, merging session ratings if given.
    pub fn build_matrix(&self, user: UserRef<'_>) -> UserItemMatrix {
        let registered = self
            .store
            .records()
            .map(|r| (UserKey::Registered(r.user_id), r.place_id, r.rating));
        let session: Vec<(UserKey, PlaceId, u8)> = match user {
            UserRef::Ephemeral(ratings) => ratings
                .iter()
                .map(|(p, r)| (UserKey::Ephemeral, p, r))
                .collect(),
            UserRef::Registered(_) => Vec::new(),
        };

        let catalog_ids = self.catalog.map(|c| c.ids());
        let columns = match &catalog_ids {
            Some(ids) => ColumnUniverse::Catalog(ids),
            None => ColumnUniverse::Observed,
        };
        UserItemMatrix::build(registered.chain(session), columns)
    }

    /// Recommend unrated places for `user`.
    ///
    /// Returns [`RecError::UserNotFound`] when the user has no ratings at all.
    pub fn recommend(
        &self,
        user: UserRef<'_>,
        config: &RecommendConfig,
    ) -> RecResult<Recommendation> {
        config.validate()?;

        let target = user.key();
        let matrix = self.build_matrix(user);
        let row = similarity_row(&matrix, target).ok_or(RecError::UserNotFound(target))?;
        let neighborhood = select_neighbors(row, target, config.threshold);
        let candidates = candidate_places(matrix.places(), &matrix.rated_places(target));

        let outcome = if neighborhood.is_empty() {
            Outcome::EmptyNeighborhood
        } else {
            let predictions = predict_ratings(&neighborhood, &matrix, &candidates, config.top_n);
            if predictions.is_empty() && !candidates.is_empty() {
                Outcome::NoPredictableCandidates
            } else {
                Outcome::Ranked(predictions)
            }
        };

        tracing::debug!(
            "Recommendation for {target}: {} neighbors, {} candidates, {} predictions",
            neighborhood.len(),
            candidates.len(),
            match &outcome {
                Outcome::Ranked(p) => p.len(),
                _ => 0,
            }
        );

        Ok(Recommendation {
            target,
            neighbors: neighborhood.into_neighbors(),
            candidate_count: candidates.len(),
            outcome,
        })
    }
}
