//! Place catalog: lookups by id or name and popularity listings.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Place, PlaceId, RecError, RecResult};

/// A place reference as supplied by a caller: numeric id or display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlaceRef {
    Id(PlaceId),
    Name(String),
}

impl std::fmt::Display for PlaceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaceRef::Id(id) => write!(f, "{id}"),
            PlaceRef::Name(name) => write!(f, "{name}"),
        }
    }
}

/// Immutable catalog of places, in load order.
#[derive(Debug, Clone, Default)]
pub struct PlaceCatalog {
    places: Vec<Place>,
    by_id: HashMap<PlaceId, usize>,
    by_name: HashMap<String, usize>,
}

impl PlaceCatalog {
    /// Build a catalog, rejecting duplicate ids, blank names, and non-finite numbers.
    pub fn new(places: Vec<Place>) -> RecResult<Self> {
        let mut by_id = HashMap::with_capacity(places.len());
        let mut by_name = HashMap::with_capacity(places.len());

        for (i, place) in places.iter().enumerate() {
            if place.name.trim().is_empty() {
                return Err(RecError::MalformedInput(format!(
                    "place {} has an empty name",
                    place.id
                )));
            }
            if ![place.price, place.rating, place.lat, place.lon]
                .iter()
                .all(|v| v.is_finite())
            {
                return Err(RecError::MalformedInput(format!(
                    "place {} has a non-finite numeric field",
                    place.id
                )));
            }
            if by_id.insert(place.id, i).is_some() {
                return Err(RecError::MalformedInput(format!(
                    "duplicate place id {}",
                    place.id
                )));
            }
            by_name.entry(place.name.clone()).or_insert(i);
        }

        Ok(Self {
            places,
            by_id,
            by_name,
        })
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn get(&self, id: PlaceId) -> Option<&Place> {
        self.by_id.get(&id).map(|&i| &self.places[i])
    }

    /// Exact display-name lookup.
    pub fn by_name(&self, name: &str) -> Option<&Place> {
        self.by_name.get(name).map(|&i| &self.places[i])
    }

    /// Resolve a caller-supplied reference to a place.
    pub fn resolve(&self, place: &PlaceRef) -> RecResult<&Place> {
        match place {
            PlaceRef::Id(id) => self.get(*id).ok_or(RecError::PlaceNotFound(*id)),
            PlaceRef::Name(name) => self
                .by_name(name)
                .ok_or_else(|| RecError::PlaceNameNotFound(name.clone())),
        }
    }

    /// All place ids, ascending.
    pub fn ids(&self) -> Vec<PlaceId> {
        let mut ids: Vec<PlaceId> = self.places.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids
    }

    /// Highest statically rated places, optionally limited to one city.
    pub fn popular(&self, city: Option<&str>, n: usize) -> Vec<&Place> {
        let mut places: Vec<&Place> = self
            .places
            .iter()
            .filter(|p| city.map_or(true, |c| p.city == c))
            .collect();
        places.sort_by(|a, b| match b.rating.total_cmp(&a.rating) {
            Ordering::Equal => a.id.cmp(&b.id),
            other => other,
        });
        places.truncate(n);
        places
    }

    /// Distinct cities in first-appearance order.
    pub fn cities(&self) -> Vec<&str> {
        let mut cities: Vec<&str> = Vec::new();
        for place in &self.places {
            if !cities.contains(&place.city.as_str()) {
                cities.push(&place.city);
            }
        }
        cities
    }

    /// Places located in any of `cities`.
    pub fn in_cities(&self, cities: &[String]) -> Vec<&Place> {
        self.places
            .iter()
            .filter(|p| cities.iter().any(|c| *c == p.city))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: PlaceId, name: &str, city: &str, rating: f64) -> Place {
        Place {
            id,
            name: name.to_string(),
            category: "Beach".to_string(),
            city: city.to_string(),
            price: 10_000.0,
            rating,
            lat: -8.0,
            lon: 115.0,
            description: String::new(),
        }
    }

    fn catalog() -> PlaceCatalog {
        PlaceCatalog::new(vec![
            place(3, "Kuta", "Bali", 4.5),
            place(1, "Sanur", "Bali", 4.7),
            place(2, "Monas", "Jakarta", 4.6),
            place(4, "Ancol", "Jakarta", 4.5),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup() {
        let c = catalog();
        assert_eq!(c.get(2).unwrap().name, "Monas");
        assert_eq!(c.by_name("Kuta").unwrap().id, 3);
        assert!(c.by_name("kuta").is_none());
        assert_eq!(c.resolve(&PlaceRef::Id(1)).unwrap().name, "Sanur");
        assert!(matches!(
            c.resolve(&PlaceRef::Name("Nowhere".into())),
            Err(RecError::PlaceNameNotFound(_))
        ));
        assert!(matches!(
            c.resolve(&PlaceRef::Id(42)),
            Err(RecError::PlaceNotFound(42))
        ));
        assert_eq!(c.ids(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_place_ref_deserialize() {
        let id: PlaceRef = serde_json::from_str("7").unwrap();
        assert_eq!(id, PlaceRef::Id(7));
        let name: PlaceRef = serde_json::from_str("\"Kuta\"").unwrap();
        assert_eq!(name, PlaceRef::Name("Kuta".into()));
    }

    #[test]
    fn test_popular() {
        let c = catalog();
        let ids: Vec<PlaceId> = c.popular(None, 3).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        let ids: Vec<PlaceId> = c.popular(Some("Jakarta"), 5).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 4]);
        assert!(c.popular(Some("Medan"), 5).is_empty());
    }

    #[test]
    fn test_cities() {
        let c = catalog();
        assert_eq!(c.cities(), vec!["Bali", "Jakarta"]);
        assert_eq!(c.in_cities(&["Jakarta".to_string()]).len(), 2);
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(PlaceCatalog::new(vec![place(1, "A", "X", 4.0), place(1, "B", "X", 4.0)]).is_err());
        assert!(PlaceCatalog::new(vec![place(1, "  ", "X", 4.0)]).is_err());
        assert!(PlaceCatalog::new(vec![place(1, "A", "X", f64::NAN)]).is_err());
    }
}
