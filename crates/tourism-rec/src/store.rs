//! In-memory rating store and per-session ad-hoc ratings.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{validate_rating, PlaceId, RatingRecord, RecResult, UserId, UserKey};

/// All (user, place, rating) records of the bulk dataset.
///
/// At most one rating is kept per (user, place) pair; a later insert
/// replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct RatingStore {
    ratings: BTreeMap<(UserId, PlaceId), u8>,
}

impl RatingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from raw records, validating every rating.
    ///
    /// Duplicate (user, place) pairs resolve last-write-wins.
    pub fn from_records<I>(records: I) -> RecResult<Self>
    where
        I: IntoIterator<Item = RatingRecord>,
    {
        let mut store = Self::new();
        let mut overwritten = 0usize;
        for record in records {
            if store.insert(record)?.is_some() {
                overwritten += 1;
            }
        }
        if overwritten > 0 {
            tracing::warn!("{overwritten} duplicate ratings resolved by last write");
        }
        Ok(store)
    }

    /// Insert a record. Returns the previous rating for the pair, if any.
    pub fn insert(&mut self, record: RatingRecord) -> RecResult<Option<u8>> {
        let rating = validate_rating(record.rating as i64)?;
        Ok(self.ratings.insert((record.user_id, record.place_id), rating))
    }

    /// Get the rating a user gave a place.
    pub fn get(&self, user_id: UserId, place_id: PlaceId) -> Option<u8> {
        self.ratings.get(&(user_id, place_id)).copied()
    }

    /// Number of ratings.
    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// All records in ascending (user, place) order.
    pub fn records(&self) -> impl Iterator<Item = RatingRecord> + '_ {
        self.ratings
            .iter()
            .map(|(&(user_id, place_id), &rating)| RatingRecord {
                user_id,
                place_id,
                rating,
            })
    }

    /// Distinct users that have at least one rating.
    pub fn users(&self) -> BTreeSet<UserId> {
        self.ratings.keys().map(|(u, _)| *u).collect()
    }

    /// Distinct places that have at least one rating.
    pub fn places(&self) -> BTreeSet<PlaceId> {
        self.ratings.keys().map(|(_, p)| *p).collect()
    }

    /// Whether the user has rated anything.
    pub fn contains_user(&self, user_id: UserId) -> bool {
        self.ratings
            .range((user_id, PlaceId::MIN)..=(user_id, PlaceId::MAX))
            .next()
            .is_some()
    }

    /// A user's ratings in ascending place order.
    pub fn ratings_for_user(&self, user_id: UserId) -> Vec<(PlaceId, u8)> {
        self.ratings
            .range((user_id, PlaceId::MIN)..=(user_id, PlaceId::MAX))
            .map(|(&(_, p), &r)| (p, r))
            .collect()
    }

    /// Drop every rating.
    pub fn clear(&mut self) {
        self.ratings.clear();
    }
}

/// Ratings entered during one session by a not-yet-registered user.
///
/// Owned by the caller's session context and never written into a shared
/// [`RatingStore`]; the engine merges it into a private copy per request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionRatings {
    ratings: BTreeMap<PlaceId, u8>,
}

impl SessionRatings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rate a place. Returns the previous rating, if any.
    pub fn rate(&mut self, place_id: PlaceId, rating: i64) -> RecResult<Option<u8>> {
        let rating = validate_rating(rating)?;
        Ok(self.ratings.insert(place_id, rating))
    }

    pub fn get(&self, place_id: PlaceId) -> Option<u8> {
        self.ratings.get(&place_id).copied()
    }

    pub fn remove(&mut self, place_id: PlaceId) -> Option<u8> {
        self.ratings.remove(&place_id)
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Ratings in ascending place order.
    pub fn iter(&self) -> impl Iterator<Item = (PlaceId, u8)> + '_ {
        self.ratings.iter().map(|(&p, &r)| (p, r))
    }

    pub fn clear(&mut self) {
        self.ratings.clear();
    }
}

/// The user a recommendation is computed for.
#[derive(Debug, Clone, Copy)]
pub enum UserRef<'a> {
    /// A user present in the bulk dataset.
    Registered(UserId),
    /// The ad-hoc user of the current session.
    Ephemeral(&'a SessionRatings),
}

impl UserRef<'_> {
    /// Matrix row key for this user.
    pub fn key(&self) -> UserKey {
        match self {
            UserRef::Registered(id) => UserKey::Registered(*id),
            UserRef::Ephemeral(_) => UserKey::Ephemeral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecError;

    fn rec(user_id: UserId, place_id: PlaceId, rating: u8) -> RatingRecord {
        RatingRecord {
            user_id,
            place_id,
            rating,
        }
    }

    #[test]
    fn test_duplicate_last_write_wins() {
        let store = RatingStore::from_records(vec![rec(1, 10, 2), rec(1, 10, 5)]).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1, 10), Some(5));
    }

    #[test]
    fn test_insert_rejects_out_of_range() {
        let mut store = RatingStore::new();
        assert!(matches!(
            store.insert(rec(1, 1, 0)),
            Err(RecError::InvalidRating(0))
        ));
        assert!(store.insert(rec(1, 1, 6)).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_user_queries() {
        let store =
            RatingStore::from_records(vec![rec(2, 5, 3), rec(1, 7, 4), rec(1, 3, 5), rec(3, 3, 1)])
                .unwrap();
        assert_eq!(store.ratings_for_user(1), vec![(3, 5), (7, 4)]);
        assert!(store.contains_user(3));
        assert!(!store.contains_user(4));
        assert_eq!(store.users().into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(store.places().into_iter().collect::<Vec<_>>(), vec![3, 5, 7]);
    }

    #[test]
    fn test_records_ordered() {
        let store = RatingStore::from_records(vec![rec(2, 1, 3), rec(1, 2, 4)]).unwrap();
        let users: Vec<_> = store.records().map(|r| r.user_id).collect();
        assert_eq!(users, vec![1, 2]);
    }

    #[test]
    fn test_session_ratings_overwrite() {
        let mut session = SessionRatings::new();
        assert_eq!(session.rate(4, 3).unwrap(), None);
        assert_eq!(session.rate(4, 5).unwrap(), Some(3));
        assert_eq!(session.get(4), Some(5));
        assert_eq!(session.len(), 1);
        assert!(session.rate(4, 9).is_err());
        assert_eq!(session.get(4), Some(5));
    }

    #[test]
    fn test_user_ref_key() {
        let session = SessionRatings::new();
        assert_eq!(UserRef::Registered(9).key(), UserKey::Registered(9));
        assert_eq!(UserRef::Ephemeral(&session).key(), UserKey::Ephemeral);
    }
}
