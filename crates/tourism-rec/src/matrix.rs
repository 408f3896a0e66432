//! Dense user-by-place rating matrix.
//!
//! Cells hold the user's rating, or `0.0` when the user has not rated the
//! place. Zero never means "low rating": every consumer treats it as no signal.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use ndarray::{Array2, ArrayView1};

use crate::types::{PlaceId, UserKey, MAX_RATING, MIN_RATING};

/// Which place identifiers become matrix columns.
#[derive(Debug, Clone, Copy)]
pub enum ColumnUniverse<'a> {
    /// Only places that appear in the input ratings.
    Observed,
    /// The full catalog, plus any rated place missing from it.
    Catalog(&'a [PlaceId]),
}

/// User-item matrix with rows and columns in ascending key order.
#[derive(Debug, Clone)]
pub struct UserItemMatrix {
    users: Vec<UserKey>,
    places: Vec<PlaceId>,
    user_index: HashMap<UserKey, usize>,
    place_index: HashMap<PlaceId, usize>,
    values: Array2<f64>,
}

impl UserItemMatrix {
    /// Build the matrix from (user, place, rating) entries.
    ///
    /// Entries for the same (user, place) pair resolve last-write-wins.
    pub fn build<I>(entries: I, columns: ColumnUniverse<'_>) -> Self
    where
        I: IntoIterator<Item = (UserKey, PlaceId, u8)>,
    {
        let mut cells: BTreeMap<(UserKey, PlaceId), u8> = BTreeMap::new();
        for (user, place, rating) in entries {
            debug_assert!(
                (MIN_RATING..=MAX_RATING).contains(&rating),
                "rating {rating} outside 1..=5 reached the matrix builder"
            );
            cells.insert((user, place), rating);
        }

        let users: Vec<UserKey> = cells
            .keys()
            .map(|(u, _)| *u)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut place_set: BTreeSet<PlaceId> = cells.keys().map(|(_, p)| *p).collect();
        if let ColumnUniverse::Catalog(ids) = columns {
            place_set.extend(ids.iter().copied());
        }
        let places: Vec<PlaceId> = place_set.into_iter().collect();

        let user_index: HashMap<UserKey, usize> =
            users.iter().enumerate().map(|(i, u)| (*u, i)).collect();
        let place_index: HashMap<PlaceId, usize> =
            places.iter().enumerate().map(|(i, p)| (*p, i)).collect();

        let mut values = Array2::<f64>::zeros((users.len(), places.len()));
        for ((user, place), rating) in &cells {
            values[[user_index[user], place_index[place]]] = *rating as f64;
        }

        tracing::debug!(
            "Built user-item matrix: {} users x {} places, {} ratings",
            users.len(),
            places.len(),
            cells.len()
        );

        Self {
            users,
            places,
            user_index,
            place_index,
            values,
        }
    }

    /// Row keys in ascending order.
    pub fn users(&self) -> &[UserKey] {
        &self.users
    }

    /// Column keys in ascending order.
    pub fn places(&self) -> &[PlaceId] {
        &self.places
    }

    pub fn n_users(&self) -> usize {
        self.users.len()
    }

    pub fn n_places(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn contains_user(&self, user: UserKey) -> bool {
        self.user_index.contains_key(&user)
    }

    /// Rating vector of one user over all columns.
    pub fn row(&self, user: UserKey) -> Option<ArrayView1<'_, f64>> {
        self.user_index.get(&user).map(|&i| self.values.row(i))
    }

    /// Cell value, `0.0` when unrated or when either key is unknown.
    pub fn get(&self, user: UserKey, place: PlaceId) -> f64 {
        match (self.user_index.get(&user), self.place_index.get(&place)) {
            (Some(&u), Some(&p)) => self.values[[u, p]],
            _ => 0.0,
        }
    }

    /// Places the user has a non-zero rating for.
    pub fn rated_places(&self, user: UserKey) -> BTreeSet<PlaceId> {
        match self.row(user) {
            Some(row) => row
                .iter()
                .zip(self.places.iter())
                .filter(|(v, _)| **v > 0.0)
                .map(|(_, p)| *p)
                .collect(),
            None => BTreeSet::new(),
        }
    }

    /// The raw matrix.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: UserKey = UserKey::Registered(1);
    const B: UserKey = UserKey::Registered(2);

    #[test]
    fn test_fill_policy() {
        let m = UserItemMatrix::build(vec![(A, 10, 5), (B, 20, 3)], ColumnUniverse::Observed);
        assert_eq!(m.users(), &[A, B]);
        assert_eq!(m.places(), &[10, 20]);
        assert_eq!(m.get(A, 10), 5.0);
        assert_eq!(m.get(A, 20), 0.0);
        assert_eq!(m.get(B, 20), 3.0);
        assert_eq!(m.get(UserKey::Ephemeral, 10), 0.0);
    }

    #[test]
    fn test_ordering_is_input_independent() {
        let m1 = UserItemMatrix::build(
            vec![(B, 20, 3), (A, 10, 5), (UserKey::Ephemeral, 15, 2)],
            ColumnUniverse::Observed,
        );
        let m2 = UserItemMatrix::build(
            vec![(UserKey::Ephemeral, 15, 2), (A, 10, 5), (B, 20, 3)],
            ColumnUniverse::Observed,
        );
        assert_eq!(m1.users(), m2.users());
        assert_eq!(m1.places(), m2.places());
        assert_eq!(m1.values(), m2.values());
        assert_eq!(m1.users().last(), Some(&UserKey::Ephemeral));
    }

    #[test]
    fn test_catalog_columns() {
        let catalog = [30, 10, 40];
        let m = UserItemMatrix::build(vec![(A, 10, 4), (A, 99, 2)], ColumnUniverse::Catalog(&catalog));
        assert_eq!(m.places(), &[10, 30, 40, 99]);
        assert_eq!(m.rated_places(A).into_iter().collect::<Vec<_>>(), vec![10, 99]);
    }

    #[test]
    fn test_duplicate_entry_single_value() {
        let m = UserItemMatrix::build(vec![(A, 10, 2), (A, 10, 4)], ColumnUniverse::Observed);
        assert_eq!(m.n_places(), 1);
        assert_eq!(m.get(A, 10), 4.0);
    }

    #[test]
    fn test_empty_input() {
        let m = UserItemMatrix::build(Vec::new(), ColumnUniverse::Observed);
        assert!(m.is_empty());
        assert_eq!(m.n_places(), 0);
        assert!(m.row(A).is_none());
    }
}
