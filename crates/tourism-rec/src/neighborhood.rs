//! Neighborhood selection: similar users above a threshold.

use std::cmp::Ordering;

use crate::types::{Neighbor, UserKey};

/// Users similar to a target, sorted by similarity descending.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighborhood {
    target: UserKey,
    neighbors: Vec<Neighbor>,
}

impl Neighborhood {
    pub fn target(&self) -> UserKey {
        self.target
    }

    pub fn neighbors(&self) -> &[Neighbor] {
        &self.neighbors
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// No user cleared the threshold. A normal outcome, not an error.
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Neighbor> {
        self.neighbors.iter()
    }

    pub fn contains(&self, user: UserKey) -> bool {
        self.neighbors.iter().any(|n| n.user == user)
    }

    pub fn into_neighbors(self) -> Vec<Neighbor> {
        self.neighbors
    }
}

/// Select the neighbors of `target` from its similarity row.
///
/// Keeps users whose similarity is strictly greater than `threshold`,
/// never the target itself. Equal similarities order by user key ascending.
pub fn select_neighbors<I>(similarities: I, target: UserKey, threshold: f64) -> Neighborhood
where
    I: IntoIterator<Item = (UserKey, f64)>,
{
    let mut neighbors: Vec<Neighbor> = similarities
        .into_iter()
        .filter(|(user, sim)| *user != target && !sim.is_nan() && *sim > threshold)
        .map(|(user, similarity)| Neighbor { user, similarity })
        .collect();

    neighbors.sort_by(|a, b| match b.similarity.total_cmp(&a.similarity) {
        Ordering::Equal => a.user.cmp(&b.user),
        other => other,
    });

    tracing::debug!(
        "Selected {} neighbors for {target} above threshold {threshold}",
        neighbors.len()
    );

    Neighborhood { target, neighbors }
}
