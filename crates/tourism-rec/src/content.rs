//! Content-based place similarity over TF-IDF vectors of category,
//! description, and city text.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use ndarray::{Array1, Array2};

use crate::text::tokenize;
use crate::types::{ContentMatch, Place, PlaceId, RecError, RecResult};

/// Default number of similar places returned for a query.
pub const DEFAULT_TOP_K: usize = 5;

/// Text a place contributes to its TF-IDF vector.
pub fn place_document(place: &Place) -> String {
    format!("{} {} {}", place.category, place.description, place.city)
}

/// TF-IDF model fitted on a fixed corpus.
///
/// Raw term counts, smoothed idf `ln((1 + n) / (1 + df)) + 1`, rows scaled
/// to unit length. Vocabulary columns are in ascending term order.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    vocabulary: BTreeMap<String, usize>,
    idf: Array1<f64>,
}

impl TfIdfVectorizer {
    /// Fit on `documents` and return the model with the document-term matrix.
    pub fn fit_transform(documents: &[String]) -> (Self, Array2<f64>) {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d)).collect();

        let terms: BTreeSet<&str> = tokenized
            .iter()
            .flat_map(|t| t.iter().map(String::as_str))
            .collect();
        let vocabulary: BTreeMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i))
            .collect();

        let mut doc_freq = vec![0usize; vocabulary.len()];
        for tokens in &tokenized {
            let unique: BTreeSet<usize> = tokens.iter().map(|t| vocabulary[t]).collect();
            for idx in unique {
                doc_freq[idx] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: Array1<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let model = Self { vocabulary, idf };
        let mut matrix = Array2::<f64>::zeros((documents.len(), model.vocabulary.len()));
        for (row, tokens) in tokenized.iter().enumerate() {
            for token in tokens {
                if let Some(&idx) = model.vocabulary.get(token) {
                    matrix[[row, idx]] += 1.0;
                }
            }
            let mut r = matrix.row_mut(row);
            r *= &model.idf;
            let norm = r.iter().map(|x| x * x).sum::<f64>().sqrt();
            if norm > 0.0 {
                r /= norm;
            }
        }

        (model, matrix)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Precomputed place-to-place content similarity.
///
/// Depends only on the static catalog, so it is built once and reused for
/// every query against that catalog.
#[derive(Debug, Clone)]
pub struct ContentIndex {
    place_ids: Vec<PlaceId>,
    positions: HashMap<PlaceId, usize>,
    similarities: Array2<f64>,
}

impl ContentIndex {
    /// Build the index over `places`, in the given order.
    pub fn build(places: &[Place]) -> Self {
        let documents: Vec<String> = places.iter().map(place_document).collect();
        let (model, tfidf) = TfIdfVectorizer::fit_transform(&documents);

        // Rows are unit length, so the Gram matrix is the cosine matrix.
        let similarities = tfidf.dot(&tfidf.t());

        tracing::info!(
            "Built content index: {} places, {} terms",
            places.len(),
            model.vocabulary_size()
        );

        let place_ids: Vec<PlaceId> = places.iter().map(|p| p.id).collect();
        let positions = place_ids.iter().enumerate().map(|(i, p)| (*p, i)).collect();

        Self {
            place_ids,
            positions,
            similarities,
        }
    }

    pub fn len(&self) -> usize {
        self.place_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.place_ids.is_empty()
    }

    /// Content similarity between two places.
    pub fn similarity(&self, a: PlaceId, b: PlaceId) -> RecResult<f64> {
        let i = self.position(a)?;
        let j = self.position(b)?;
        Ok(self.similarities[[i, j]])
    }

    /// The `k` places most similar to `place_id`, excluding itself.
    ///
    /// Equal scores keep catalog order.
    pub fn similar(&self, place_id: PlaceId, k: usize) -> RecResult<Vec<ContentMatch>> {
        let i = self.position(place_id)?;
        let mut matches: Vec<(usize, ContentMatch)> = self
            .similarities
            .row(i)
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(j, s)| {
                (
                    j,
                    ContentMatch {
                        place_id: self.place_ids[j],
                        similarity: *s,
                    },
                )
            })
            .collect();

        matches.sort_by(|(ja, a), (jb, b)| match b.similarity.total_cmp(&a.similarity) {
            Ordering::Equal => ja.cmp(jb),
            other => other,
        });
        matches.truncate(k);
        Ok(matches.into_iter().map(|(_, m)| m).collect())
    }

    fn position(&self, place_id: PlaceId) -> RecResult<usize> {
        self.positions
            .get(&place_id)
            .copied()
            .ok_or(RecError::PlaceNotFound(place_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: PlaceId, category: &str, city: &str, description: &str) -> Place {
        Place {
            id,
            name: format!("Place {id}"),
            category: category.to_string(),
            city: city.to_string(),
            price: 0.0,
            rating: 4.5,
            lat: 0.0,
            lon: 0.0,
            description: description.to_string(),
        }
    }

    fn catalog() -> Vec<Place> {
        vec![
            place(1, "Beach", "Bali", "white sand beach with surfing waves"),
            place(2, "Beach", "Bali", "quiet sand beach for snorkeling"),
            place(3, "Temple", "Yogyakarta", "ancient buddhist temple with stupas"),
            place(4, "Temple", "Yogyakarta", "hindu temple complex near the city"),
            place(5, "Mountain", "Lombok", "volcano trekking and crater lake"),
            place(6, "Park", "Jakarta", ""),
        ]
    }

    #[test]
    fn test_similar_excludes_query_and_ranks() {
        let index = ContentIndex::build(&catalog());
        let matches = index.similar(1, 5).unwrap();
        assert_eq!(matches.len(), 5);
        assert!(matches.iter().all(|m| m.place_id != 1));
        assert_eq!(matches[0].place_id, 2);
        assert!(matches
            .windows(2)
            .all(|w| w[0].similarity >= w[1].similarity));
    }

    #[test]
    fn test_similarity_symmetric_and_bounded() {
        let index = ContentIndex::build(&catalog());
        for a in 1..=6 {
            for b in 1..=6 {
                let s = index.similarity(a, b).unwrap();
                assert!((-1e-12..=1.0 + 1e-12).contains(&s));
                assert!((s - index.similarity(b, a).unwrap()).abs() < 1e-12);
            }
        }
        assert!((index.similarity(3, 3).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_place() {
        let index = ContentIndex::build(&catalog());
        assert!(matches!(
            index.similar(99, 5),
            Err(RecError::PlaceNotFound(99))
        ));
    }

    #[test]
    fn test_deterministic() {
        let a = ContentIndex::build(&catalog());
        let b = ContentIndex::build(&catalog());
        for id in 1..=6 {
            assert_eq!(a.similar(id, 5).unwrap(), b.similar(id, 5).unwrap());
        }
    }

    #[test]
    fn test_idf_smoothing() {
        let docs = vec!["beach bali".to_string(), "beach lombok".to_string()];
        let (model, m) = TfIdfVectorizer::fit_transform(&docs);
        assert_eq!(model.vocabulary_size(), 3);
        // "beach" appears everywhere and gets idf 1, rarer terms weigh more.
        let beach = model.vocabulary["beach"];
        let bali = model.vocabulary["bali"];
        assert!(m[[0, bali]] > m[[0, beach]]);
    }

    #[test]
    fn test_empty_catalog() {
        let index = ContentIndex::build(&[]);
        assert!(index.is_empty());
    }
}
