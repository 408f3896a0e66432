//! Seeded synthetic dataset of Indonesian destinations for demos and tests.

use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::catalog::PlaceCatalog;
use crate::dataset::Dataset;
use crate::store::SessionRatings;
use crate::types::{
    Place, PlaceId, RatingRecord, RecError, RecResult, User, MAX_RATING, MIN_RATING,
};

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// Users generated when none is given.
pub const DEFAULT_USERS: u32 = 100;

/// Places rated in a demo session.
pub const DEMO_SESSION_SIZE: usize = 10;

const MIN_RATINGS_PER_USER: usize = 15;
const MAX_RATINGS_PER_USER: usize = 30;
const RATING_MEAN: f64 = 3.5;
const RATING_STD_DEV: f64 = 1.2;

/// Places that draw a rating boost in generated data.
const HEADLINE_PLACES: [&str; 4] = [
    "Pantai Kuta",
    "Candi Borobudur",
    "Raja Ampat",
    "Bromo Tengger Semeru",
];

// name, category, city, price (IDR), static rating, lat, lon, description
type Row = (&'static str, &'static str, &'static str, f64, f64, f64, f64, &'static str);

const DESTINATIONS: [Row; 50] = [
    ("Pantai Kuta", "Beach", "Bali", 0.0, 4.5, -8.718, 115.169, "sunset beach with surfing waves and nightlife"),
    ("Pantai Sanur", "Beach", "Bali", 0.0, 4.4, -8.691, 115.263, "calm sunrise beach with a seaside promenade"),
    ("Pantai Nusa Dua", "Beach", "Bali", 15000.0, 4.6, -8.795, 115.232, "white sand beach with resorts and snorkeling"),
    ("Ubud", "Culture", "Bali", 0.0, 4.7, -8.507, 115.262, "rice terraces art markets and monkey forest"),
    ("Tanah Lot", "Temple", "Bali", 60000.0, 4.6, -8.621, 115.087, "sea temple on a rock at sunset"),
    ("Uluwatu Temple", "Temple", "Bali", 50000.0, 4.7, -8.829, 115.085, "cliff temple with kecak dance at sunset"),
    ("Kintamani", "Mountain", "Bali", 25000.0, 4.5, -8.242, 115.375, "volcano viewpoint over Lake Batur"),
    ("Candi Borobudur", "Temple", "Magelang", 50000.0, 4.8, -7.608, 110.204, "ancient buddhist temple with stupas and reliefs"),
    ("Candi Prambanan", "Temple", "Yogyakarta", 50000.0, 4.7, -7.752, 110.491, "hindu temple complex with ramayana ballet"),
    ("Keraton Yogyakarta", "Culture", "Yogyakarta", 15000.0, 4.5, -7.805, 110.364, "sultan palace with javanese court culture"),
    ("Malioboro", "Shopping", "Yogyakarta", 0.0, 4.6, -7.792, 110.366, "shopping street with batik and street food"),
    ("Pantai Parangtritis", "Beach", "Yogyakarta", 10000.0, 4.4, -8.025, 110.332, "black sand beach with dunes and legends"),
    ("Bromo Tengger Semeru", "Mountain", "Malang", 35000.0, 4.8, -7.942, 112.953, "active volcano crater with sunrise views"),
    ("Kawah Ijen", "Mountain", "Banyuwangi", 100000.0, 4.7, -8.058, 114.242, "blue fire crater lake and sulfur miners"),
    ("Taman Nasional Baluran", "Nature", "Situbondo", 16000.0, 4.4, -7.849, 114.373, "savanna national park with wild banteng"),
    ("Danau Toba", "Lake", "Medan", 0.0, 4.7, 2.686, 98.875, "huge volcanic lake with batak villages"),
    ("Bukit Lawang", "Nature", "Medan", 150000.0, 4.6, 3.549, 98.118, "jungle trekking with orangutans"),
    ("Pulau Samosir", "Island", "Medan", 0.0, 4.5, 2.583, 98.817, "island in Lake Toba with batak culture"),
    ("Pulau Nias", "Island", "Nias", 0.0, 4.3, 1.081, 97.595, "surfing island with stone jumping tradition"),
    ("Raja Ampat", "Marine", "Sorong", 1000000.0, 4.9, -0.234, 130.507, "coral reef diving and karst islands"),
    ("Pulau Komodo", "Island", "Labuan Bajo", 150000.0, 4.8, -8.550, 119.489, "komodo dragons and marine park"),
    ("Labuan Bajo", "Marine", "Labuan Bajo", 0.0, 4.6, -8.496, 119.888, "harbor town for island hopping and diving"),
    ("Pulau Padar", "Island", "Labuan Bajo", 150000.0, 4.8, -8.651, 119.581, "hiking viewpoint over three colored bays"),
    ("Pink Beach", "Beach", "Labuan Bajo", 150000.0, 4.7, -8.607, 119.515, "pink sand beach with snorkeling reefs"),
    ("Gili Trawangan", "Island", "Lombok", 0.0, 4.6, -8.350, 116.038, "party island with diving and turtles"),
    ("Gili Meno", "Island", "Lombok", 0.0, 4.6, -8.350, 116.057, "quiet island with underwater statues"),
    ("Gili Air", "Island", "Lombok", 0.0, 4.6, -8.357, 116.082, "relaxed island with snorkeling and cafes"),
    ("Gunung Rinjani", "Mountain", "Lombok", 150000.0, 4.8, -8.411, 116.457, "volcano trekking to a crater lake"),
    ("Pantai Senggigi", "Beach", "Lombok", 0.0, 4.3, -8.491, 116.042, "sunset beach with coral and hotels"),
    ("Pantai Tanjung Tinggi", "Beach", "Belitung", 5000.0, 4.6, -2.551, 107.714, "granite boulder beach with clear water"),
    ("Pulau Lengkuas", "Island", "Belitung", 0.0, 4.6, -2.536, 107.618, "lighthouse island with snorkeling"),
    ("Danau Kelimutu", "Lake", "Ende", 150000.0, 4.7, -8.770, 121.820, "three colored crater lakes at sunrise"),
    ("Taman Nasional Bunaken", "Marine", "Manado", 150000.0, 4.7, 1.623, 124.761, "wall diving and coral reef marine park"),
    ("Tana Toraja", "Culture", "Toraja", 30000.0, 4.6, -3.075, 119.742, "traditional houses and funeral ceremonies"),
    ("Wakatobi", "Marine", "Wakatobi", 150000.0, 4.8, -5.324, 123.595, "remote coral reef diving"),
    ("Kepulauan Derawan", "Marine", "Berau", 0.0, 4.6, 2.287, 118.242, "islands with turtles and jellyfish lake"),
    ("Taman Nasional Tanjung Puting", "Nature", "Pangkalan Bun", 150000.0, 4.6, -2.955, 111.897, "river boat trips to orangutan camps"),
    ("Pulau Pramuka", "Island", "Jakarta", 0.0, 4.2, -5.745, 106.614, "thousand islands snorkeling and turtle conservation"),
    ("Pulau Tidung", "Island", "Jakarta", 0.0, 4.3, -5.798, 106.507, "island with a long bridge and water sports"),
    ("Taman Mini Indonesia Indah", "Culture", "Jakarta", 25000.0, 4.5, -6.302, 106.895, "park of regional houses and museums"),
    ("Ancol Dreamland", "Amusement Park", "Jakarta", 25000.0, 4.4, -6.123, 106.833, "seaside theme park and beach"),
    ("Taman Safari Indonesia", "Amusement Park", "Bogor", 200000.0, 4.6, -6.717, 106.950, "safari park with animals and shows"),
    ("Kebun Raya Bogor", "Nature", "Bogor", 25000.0, 4.6, -6.598, 106.799, "historic botanical garden near the palace"),
    ("Kawah Putih", "Mountain", "Bandung", 28000.0, 4.5, -7.166, 107.402, "white crater lake in the highlands"),
    ("Tangkuban Perahu", "Mountain", "Bandung", 30000.0, 4.4, -6.760, 107.610, "volcano crater with souvenir market"),
    ("Ciwidey", "Nature", "Bandung", 20000.0, 4.5, -7.100, 107.450, "tea plantations hot springs and strawberry farms"),
    ("Dago Dream Park", "Amusement Park", "Bandung", 30000.0, 4.3, -6.834, 107.626, "forest park with photo spots and rides"),
    ("Jalan Braga", "Shopping", "Bandung", 0.0, 4.4, -6.917, 107.609, "colonial street with cafes and galleries"),
    ("Taman Laut Banda", "Marine", "Banda", 0.0, 4.7, -4.525, 129.897, "spice islands with coral gardens"),
    ("Fort Rotterdam", "Culture", "Makassar", 10000.0, 4.5, -5.134, 119.405, "dutch colonial fort and museum"),
];

/// The built-in destination catalog, ids 1..=50.
pub fn destinations() -> Vec<Place> {
    DESTINATIONS
        .iter()
        .enumerate()
        .map(
            |(i, &(name, category, city, price, rating, lat, lon, description))| Place {
                id: i as PlaceId + 1,
                name: name.to_string(),
                category: category.to_string(),
                city: city.to_string(),
                price,
                rating,
                lat,
                lon,
                description: description.to_string(),
            },
        )
        .collect()
}

/// Generate a dataset of `num_users` users rating the built-in catalog.
///
/// Each user rates 15 to 30 distinct places. Ratings are drawn from
/// normal(3.5, 1.2), headline places get +0.5..1.0, then the value is
/// rounded and clamped to 1..=5. Deterministic for a fixed seed.
pub fn generate(num_users: u32, seed: u64) -> RecResult<Dataset> {
    let places = destinations();
    let mut rng = StdRng::seed_from_u64(seed);
    let rating_dist = Normal::new(RATING_MEAN, RATING_STD_DEV)
        .map_err(|e| RecError::InvalidConfig(e.to_string()))?;
    let mut ratings = Vec::new();

    for user_id in 1..=num_users {
        let count = rng
            .gen_range(MIN_RATINGS_PER_USER..=MAX_RATINGS_PER_USER)
            .min(places.len());
        for idx in sample(&mut rng, places.len(), count) {
            let place = &places[idx];
            let mut value = rating_dist.sample(&mut rng);
            if HEADLINE_PLACES.contains(&place.name.as_str()) {
                value += rng.gen_range(0.5..1.0);
            }
            ratings.push(RatingRecord {
                user_id,
                place_id: place.id,
                rating: value.round().clamp(MIN_RATING as f64, MAX_RATING as f64) as u8,
            });
        }
    }

    let users = (1..=num_users)
        .map(|id| User {
            id,
            location: None,
            age: None,
        })
        .collect();

    tracing::info!(
        "Generated synthetic dataset: {} users, {} ratings (seed {seed})",
        num_users,
        ratings.len()
    );
    Dataset::from_records(places, users, ratings)
}

/// Random 1..=5 ratings for up to 10 random catalog places.
pub fn demo_session(catalog: &PlaceCatalog, seed: u64) -> RecResult<SessionRatings> {
    let mut rng = StdRng::seed_from_u64(seed);
    let places = catalog.places();
    let mut session = SessionRatings::new();
    for idx in sample(&mut rng, places.len(), DEMO_SESSION_SIZE.min(places.len())) {
        let rating = rng.gen_range(MIN_RATING..=MAX_RATING);
        session.rate(places[idx].id, rating as i64)?;
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_valid() {
        let catalog = PlaceCatalog::new(destinations()).unwrap();
        assert_eq!(catalog.len(), 50);
        for name in HEADLINE_PLACES {
            assert!(catalog.by_name(name).is_some(), "{name}");
        }
    }

    #[test]
    fn test_generate_shape() {
        let ds = generate(20, DEFAULT_SEED).unwrap();
        assert_eq!(ds.users.len(), 20);
        for user in 1..=20 {
            let n = ds.ratings.ratings_for_user(user).len();
            assert!((MIN_RATINGS_PER_USER..=MAX_RATINGS_PER_USER).contains(&n));
        }
        assert!(ds.ratings.records().all(|r| (1..=5).contains(&r.rating)));
    }

    #[test]
    fn test_generate_deterministic() {
        let a = generate(10, 7).unwrap();
        let b = generate(10, 7).unwrap();
        assert!(a.ratings.records().eq(b.ratings.records()));
        let c = generate(10, 8).unwrap();
        assert!(!a.ratings.records().eq(c.ratings.records()));
    }

    #[test]
    fn test_demo_session() {
        let catalog = PlaceCatalog::new(destinations()).unwrap();
        let session = demo_session(&catalog, DEFAULT_SEED).unwrap();
        assert_eq!(session.len(), DEMO_SESSION_SIZE);
        assert_eq!(session, demo_session(&catalog, DEFAULT_SEED).unwrap());
    }

    #[test]
    fn test_rating_distribution_centered() {
        let ds = generate(DEFAULT_USERS, 1).unwrap();
        let headline: Vec<PlaceId> = HEADLINE_PLACES
            .iter()
            .filter_map(|name| ds.catalog.by_name(name).map(|p| p.id))
            .collect();
        let plain: Vec<f64> = ds
            .ratings
            .records()
            .filter(|r| !headline.contains(&r.place_id))
            .map(|r| r.rating as f64)
            .collect();
        let mean = plain.iter().sum::<f64>() / plain.len() as f64;
        // Rounding and clamping to 1..=5 pull the mean slightly below 3.5.
        assert!((3.2..3.6).contains(&mean), "mean {mean}");

        let dist = crate::stats::rating_distribution(&ds.ratings);
        assert!(dist.iter().all(|&n| n > 0));
        assert!(dist[3] > dist[0] && dist[2] > dist[0]);
    }
}
