//! Similarity-weighted rating prediction for unrated places.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::matrix::UserItemMatrix;
use crate::neighborhood::Neighborhood;
use crate::types::{PlaceId, Prediction, MAX_RATING, MIN_RATING};

/// Places in `universe` the target has not rated, ascending and deduplicated.
pub fn candidate_places(universe: &[PlaceId], rated: &BTreeSet<PlaceId>) -> Vec<PlaceId> {
    universe
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .filter(|p| !rated.contains(p))
        .collect()
}

/// Predict ratings for every candidate place and return the best `n`.
///
/// A place receives a prediction only when at least one neighbor rated it;
/// the prediction is the similarity-weighted mean of those ratings. Results
/// sort by predicted rating descending, ties by place id ascending.
pub fn predict_ratings(
    neighborhood: &Neighborhood,
    matrix: &UserItemMatrix,
    candidates: &[PlaceId],
    n: usize,
) -> Vec<Prediction> {
    let neighborhood_size = neighborhood.len();
    let mut predictions: Vec<Prediction> = Vec::new();

    for &place_id in candidates {
        let mut weighted_sum = 0.0f64;
        let mut weight_sum = 0.0f64;
        let mut contributors = 0usize;

        for neighbor in neighborhood.iter() {
            let rating = matrix.get(neighbor.user, place_id);
            if rating > 0.0 {
                weighted_sum += neighbor.similarity * rating;
                weight_sum += neighbor.similarity;
                contributors += 1;
            }
        }

        if weight_sum > 0.0 {
            let predicted = weighted_sum / weight_sum;
            debug_assert!(
                predicted >= MIN_RATING as f64 - 1e-9 && predicted <= MAX_RATING as f64 + 1e-9,
                "prediction {predicted} for place {place_id} outside 1..=5"
            );
            predictions.push(Prediction {
                place_id,
                predicted_rating: predicted.clamp(MIN_RATING as f64, MAX_RATING as f64),
                neighborhood_size,
                contributors,
            });
        }
    }

    predictions.sort_by(|a, b| match b.predicted_rating.total_cmp(&a.predicted_rating) {
        Ordering::Equal => a.place_id.cmp(&b.place_id),
        other => other,
    });
    predictions.truncate(n);
    predictions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::ColumnUniverse;
    use crate::neighborhood::select_neighbors;
    use crate::similarity::similarity_row;
    use crate::types::UserKey;

    const A: UserKey = UserKey::Registered(1);
    const B: UserKey = UserKey::Registered(2);
    const C: UserKey = UserKey::Registered(3);
    const D: UserKey = UserKey::Registered(4);

    fn matrix() -> UserItemMatrix {
        UserItemMatrix::build(
            vec![
                (A, 1, 5),
                (A, 2, 4),
                (B, 1, 4),
                (B, 2, 5),
                (B, 3, 3),
                (C, 1, 5),
                (C, 3, 5),
                (C, 4, 1),
                (D, 5, 2),
            ],
            ColumnUniverse::Catalog(&[1, 2, 3, 4, 5, 6]),
        )
    }

    fn predict_for(target: UserKey, threshold: f64, n: usize) -> Vec<Prediction> {
        let m = matrix();
        let row = similarity_row(&m, target).unwrap();
        let hood = select_neighbors(row, target, threshold);
        let candidates = candidate_places(m.places(), &m.rated_places(target));
        predict_ratings(&hood, &m, &candidates, n)
    }

    #[test]
    fn test_weighted_average() {
        let m = matrix();
        let row = similarity_row(&m, A).unwrap();
        let hood = select_neighbors(row, A, 0.0);
        let sim_b = hood.iter().find(|n| n.user == B).unwrap().similarity;
        let sim_c = hood.iter().find(|n| n.user == C).unwrap().similarity;

        let preds = predict_for(A, 0.0, 10);
        let p3 = preds.iter().find(|p| p.place_id == 3).unwrap();
        let expected = (sim_b * 3.0 + sim_c * 5.0) / (sim_b + sim_c);
        assert!((p3.predicted_rating - expected).abs() < 1e-12);
        assert_eq!(p3.contributors, 2);
        assert_eq!(p3.neighborhood_size, hood.len());
    }

    #[test]
    fn test_unrated_by_neighbors_excluded() {
        let preds = predict_for(A, 0.0, 10);
        // D shares nothing with A, so place 5 has no signal; place 6 is rated by nobody.
        assert!(preds.iter().all(|p| p.place_id != 5 && p.place_id != 6));
    }

    #[test]
    fn test_no_self_recommendation() {
        for target in [A, B, C, D] {
            let rated = matrix().rated_places(target);
            for p in predict_for(target, 0.0, 10) {
                assert!(!rated.contains(&p.place_id));
            }
        }
    }

    #[test]
    fn test_prediction_bounds() {
        for target in [A, B, C, D] {
            for p in predict_for(target, 0.0, 10) {
                assert!((1.0..=5.0).contains(&p.predicted_rating));
            }
        }
    }

    #[test]
    fn test_sorted_and_truncated() {
        let preds = predict_for(A, 0.0, 10);
        assert!(preds
            .windows(2)
            .all(|w| w[0].predicted_rating >= w[1].predicted_rating));
        assert_eq!(predict_for(A, 0.0, 1).len(), 1);
        assert_eq!(predict_for(A, 0.0, 1)[0], preds[0]);
    }

    #[test]
    fn test_empty_candidates() {
        let m = matrix();
        let hood = select_neighbors(similarity_row(&m, A).unwrap(), A, 0.0);
        assert!(predict_ratings(&hood, &m, &[], 10).is_empty());
    }

    #[test]
    fn test_empty_neighborhood() {
        let m = matrix();
        let hood = select_neighbors(similarity_row(&m, D).unwrap(), D, 0.0);
        assert!(hood.is_empty());
        let candidates = candidate_places(m.places(), &m.rated_places(D));
        assert!(predict_ratings(&hood, &m, &candidates, 10).is_empty());
    }

    #[test]
    fn test_candidate_places() {
        let rated: BTreeSet<PlaceId> = [2, 4].into_iter().collect();
        assert_eq!(candidate_places(&[4, 1, 2, 3, 1], &rated), vec![1, 3]);
    }
}
