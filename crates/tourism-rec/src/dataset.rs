//! A validated, fully materialized dataset: catalog, users, ratings.

use std::collections::BTreeSet;

use crate::catalog::PlaceCatalog;
use crate::store::RatingStore;
use crate::types::{Place, RatingRecord, RecError, RecResult, User, UserId};

/// Everything the engine reads, loaded once per process.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub catalog: PlaceCatalog,
    pub users: Vec<User>,
    pub ratings: RatingStore,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Dataset {
    /// Validate raw records and assemble a dataset.
    ///
    /// Rejects ratings outside 1..=5, ratings for places missing from the
    /// catalog, and duplicate user ids. Duplicate ratings resolve last-write-wins.
    pub fn from_records(
        places: Vec<Place>,
        users: Vec<User>,
        ratings: Vec<RatingRecord>,
    ) -> RecResult<Self> {
        let catalog = PlaceCatalog::new(places)?;

        let mut seen = BTreeSet::new();
        for user in &users {
            if !seen.insert(user.id) {
                return Err(RecError::MalformedInput(format!(
                    "duplicate user id {}",
                    user.id
                )));
            }
        }

        if let Some(r) = ratings.iter().find(|r| catalog.get(r.place_id).is_none()) {
            return Err(RecError::MalformedInput(format!(
                "rating by user {} references unknown place {}",
                r.user_id, r.place_id
            )));
        }
        let ratings = RatingStore::from_records(ratings)?;

        let now = now_secs();
        Ok(Self {
            catalog,
            users,
            ratings,
            created_at: now,
            updated_at: now,
        })
    }

    /// Registered users: the user catalog plus anyone who rated something.
    pub fn user_ids(&self) -> BTreeSet<UserId> {
        let mut ids: BTreeSet<UserId> = self.users.iter().map(|u| u.id).collect();
        ids.extend(self.ratings.users());
        ids
    }

    pub fn touch(&mut self) {
        self.updated_at = now_secs();
    }
}

pub(crate) fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: u32) -> Place {
        Place {
            id,
            name: format!("Place {id}"),
            category: "Museum".into(),
            city: "Jakarta".into(),
            price: 5000.0,
            rating: 4.4,
            lat: -6.2,
            lon: 106.8,
            description: String::new(),
        }
    }

    fn rating(user_id: u32, place_id: u32, rating: u8) -> RatingRecord {
        RatingRecord {
            user_id,
            place_id,
            rating,
        }
    }

    #[test]
    fn test_valid_dataset() {
        let ds = Dataset::from_records(
            vec![place(1), place(2)],
            vec![User {
                id: 9,
                location: None,
                age: None,
            }],
            vec![rating(1, 1, 4), rating(1, 1, 2), rating(2, 2, 5)],
        )
        .unwrap();
        assert_eq!(ds.ratings.len(), 2);
        assert_eq!(ds.ratings.get(1, 1), Some(2));
        assert_eq!(ds.user_ids().into_iter().collect::<Vec<_>>(), vec![1, 2, 9]);
    }

    #[test]
    fn test_unknown_place_rejected() {
        let err = Dataset::from_records(vec![place(1)], vec![], vec![rating(1, 7, 4)]).unwrap_err();
        assert!(matches!(err, RecError::MalformedInput(_)));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = Dataset::from_records(vec![place(1)], vec![], vec![rating(1, 1, 0)]).unwrap_err();
        assert!(matches!(err, RecError::InvalidRating(0)));
    }

    #[test]
    fn test_duplicate_user_rejected() {
        let user = User {
            id: 1,
            location: None,
            age: None,
        };
        assert!(Dataset::from_records(vec![], vec![user.clone(), user], vec![]).is_err());
    }
}
