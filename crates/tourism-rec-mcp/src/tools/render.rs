//! JSON views of places and engine results shared by tools and resources.

use serde_json::{json, Value};

use tourism_rec::{ContentMatch, Outcome, Place, PlaceCatalog, Recommendation};

/// Qualitative band for a predicted rating.
pub fn tier(predicted: f64) -> &'static str {
    if predicted >= 4.0 {
        "excellent"
    } else if predicted >= 3.0 {
        "good"
    } else {
        "fair"
    }
}

pub fn place_json(place: &Place) -> Value {
    json!({
        "id": place.id,
        "name": place.name,
        "category": place.category,
        "city": place.city,
        "price": place.price,
        "rating": place.rating,
        "coordinates": { "lat": place.lat, "lon": place.lon },
        "description": place.description,
    })
}

/// Human-readable explanation of a non-ranked or empty outcome.
pub fn outcome_message(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Ranked(p) if p.is_empty() => "Every place has already been rated.",
        Outcome::Ranked(_) => "Ranked by predicted rating.",
        Outcome::EmptyNeighborhood => {
            "No similar users found above the threshold. Try a lower threshold or rate more places."
        }
        Outcome::NoPredictableCandidates => {
            "Similar users were found, but none of them rated a place you have not rated yet."
        }
    }
}

fn outcome_status(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Ranked(_) => "ranked",
        Outcome::EmptyNeighborhood => "empty_neighborhood",
        Outcome::NoPredictableCandidates => "no_predictable_candidates",
    }
}

pub fn recommendation_json(rec: &Recommendation, catalog: &PlaceCatalog) -> Value {
    let predictions: Vec<Value> = rec
        .predictions()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let mut entry = json!({
                "rank": i + 1,
                "place_id": p.place_id,
                "predicted_rating": p.predicted_rating,
                "tier": tier(p.predicted_rating),
                "contributors": p.contributors,
            });
            if let Some(place) = catalog.get(p.place_id) {
                entry["place"] = place_json(place);
            }
            entry
        })
        .collect();

    let neighbors: Vec<Value> = rec
        .neighbors
        .iter()
        .map(|n| json!({ "user": n.user.to_string(), "similarity": n.similarity }))
        .collect();

    json!({
        "target": rec.target.to_string(),
        "status": outcome_status(&rec.outcome),
        "message": outcome_message(&rec.outcome),
        "neighborhood_size": neighbors.len(),
        "neighbors": neighbors,
        "candidate_count": rec.candidate_count,
        "predictions": predictions,
    })
}

pub fn matches_json(query: &Place, matches: &[ContentMatch], catalog: &PlaceCatalog) -> Value {
    let results: Vec<Value> = matches
        .iter()
        .map(|m| {
            let mut entry = json!({ "place_id": m.place_id, "similarity": m.similarity });
            if let Some(place) = catalog.get(m.place_id) {
                entry["place"] = place_json(place);
            }
            entry
        })
        .collect();

    json!({
        "query": place_json(query),
        "total": results.len(),
        "matches": results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_bands() {
        assert_eq!(tier(4.0), "excellent");
        assert_eq!(tier(3.99), "good");
        assert_eq!(tier(3.0), "good");
        assert_eq!(tier(2.5), "fair");
    }
}
