//! Aggregate statistics over the rating store.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::catalog::PlaceCatalog;
use crate::store::RatingStore;
use crate::types::{Place, PlaceId, UserId, MAX_RATING, MIN_RATING};

/// Per-place rating aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceStats {
    pub place_id: PlaceId,
    pub mean_rating: f64,
    pub rating_count: usize,
    pub distinct_raters: usize,
}

/// Dataset-wide totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub total_users: usize,
    pub total_places: usize,
    pub total_ratings: usize,
    pub mean_rating: Option<f64>,
}

/// Aggregate every rated place, ascending by place id.
pub fn place_stats(store: &RatingStore) -> Vec<PlaceStats> {
    let mut groups: BTreeMap<PlaceId, (u64, usize, BTreeSet<UserId>)> = BTreeMap::new();
    for record in store.records() {
        let entry = groups.entry(record.place_id).or_default();
        entry.0 += record.rating as u64;
        entry.1 += 1;
        entry.2.insert(record.user_id);
    }

    groups
        .into_iter()
        .map(|(place_id, (sum, count, raters))| PlaceStats {
            place_id,
            mean_rating: sum as f64 / count as f64,
            rating_count: count,
            distinct_raters: raters.len(),
        })
        .collect()
}

/// Totals for the dashboard header.
pub fn overview(store: &RatingStore, catalog: &PlaceCatalog) -> Overview {
    let total_ratings = store.len();
    let sum: u64 = store.records().map(|r| r.rating as u64).sum();
    Overview {
        total_users: store.users().len(),
        total_places: catalog.len(),
        total_ratings,
        mean_rating: (total_ratings > 0).then(|| sum as f64 / total_ratings as f64),
    }
}

/// Places with at least `min_ratings` ratings, best mean first.
pub fn top_by_rating(stats: &[PlaceStats], min_ratings: usize, n: usize) -> Vec<PlaceStats> {
    let mut top: Vec<PlaceStats> = stats
        .iter()
        .filter(|s| s.rating_count >= min_ratings)
        .cloned()
        .collect();
    top.sort_by(|a, b| match b.mean_rating.total_cmp(&a.mean_rating) {
        Ordering::Equal => a.place_id.cmp(&b.place_id),
        other => other,
    });
    top.truncate(n);
    top
}

/// Places rated by the most distinct users.
pub fn top_by_raters(stats: &[PlaceStats], n: usize) -> Vec<PlaceStats> {
    let mut top = stats.to_vec();
    top.sort_by(|a, b| {
        b.distinct_raters
            .cmp(&a.distinct_raters)
            .then(a.place_id.cmp(&b.place_id))
    });
    top.truncate(n);
    top
}

/// Count of ratings for each value 1..=5, index 0 holding rating 1.
pub fn rating_distribution(store: &RatingStore) -> [usize; 5] {
    let mut dist = [0usize; (MAX_RATING - MIN_RATING + 1) as usize];
    for record in store.records() {
        dist[(record.rating - MIN_RATING) as usize] += 1;
    }
    dist
}

/// A user's rated places joined with the catalog, highest rating first.
///
/// Ratings for places missing from the catalog are skipped.
pub fn user_history<'a>(
    store: &RatingStore,
    catalog: &'a PlaceCatalog,
    user_id: UserId,
    n: usize,
) -> Vec<(&'a Place, u8)> {
    let mut history: Vec<(&Place, u8)> = store
        .ratings_for_user(user_id)
        .into_iter()
        .filter_map(|(p, r)| catalog.get(p).map(|place| (place, r)))
        .collect();
    history.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.id.cmp(&b.0.id)));
    history.truncate(n);
    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RatingRecord;

    fn store() -> RatingStore {
        let rows = [
            (1, 10, 5),
            (2, 10, 3),
            (3, 10, 4),
            (1, 20, 2),
            (2, 20, 2),
            (3, 30, 5),
        ];
        RatingStore::from_records(rows.iter().map(|&(user_id, place_id, rating)| RatingRecord {
            user_id,
            place_id,
            rating,
        }))
        .unwrap()
    }

    fn catalog() -> PlaceCatalog {
        let places = [10, 20, 30, 40]
            .iter()
            .map(|&id| Place {
                id,
                name: format!("Place {id}"),
                category: "Park".into(),
                city: "Bandung".into(),
                price: 0.0,
                rating: 4.0,
                lat: 0.0,
                lon: 0.0,
                description: String::new(),
            })
            .collect();
        PlaceCatalog::new(places).unwrap()
    }

    #[test]
    fn test_place_stats() {
        let stats = place_stats(&store());
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[0].place_id, 10);
        assert!((stats[0].mean_rating - 4.0).abs() < 1e-12);
        assert_eq!(stats[0].rating_count, 3);
        assert_eq!(stats[0].distinct_raters, 3);
        assert_eq!(stats[1].mean_rating, 2.0);
    }

    #[test]
    fn test_overview() {
        let o = overview(&store(), &catalog());
        assert_eq!(o.total_users, 3);
        assert_eq!(o.total_places, 4);
        assert_eq!(o.total_ratings, 6);
        assert!((o.mean_rating.unwrap() - 21.0 / 6.0).abs() < 1e-12);
        assert_eq!(overview(&RatingStore::new(), &catalog()).mean_rating, None);
    }

    #[test]
    fn test_top_lists() {
        let stats = place_stats(&store());
        let top = top_by_rating(&stats, 2, 10);
        assert_eq!(top.iter().map(|s| s.place_id).collect::<Vec<_>>(), vec![10, 20]);
        let top = top_by_rating(&stats, 1, 1);
        assert_eq!(top[0].place_id, 30);
        let top = top_by_raters(&stats, 2);
        assert_eq!(top.iter().map(|s| s.place_id).collect::<Vec<_>>(), vec![10, 20]);
    }

    #[test]
    fn test_distribution() {
        assert_eq!(rating_distribution(&store()), [0, 2, 1, 1, 2]);
    }

    #[test]
    fn test_user_history() {
        let c = catalog();
        let history = user_history(&store(), &c, 1, 5);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].0.id, 10);
        assert_eq!(history[0].1, 5);
        assert!(user_history(&store(), &c, 9, 5).is_empty());
    }
}
