//! Pairwise cosine similarity between user rating vectors.

use ndarray::{Array2, ArrayView1};

use crate::matrix::UserItemMatrix;
use crate::types::UserKey;

/// Compute cosine similarity between two vectors.
///
/// Returns `0.0` when the lengths differ or either vector is all zeros.
pub fn cosine_similarity(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return 0.0;
    }

    dot / denom
}

/// Square, symmetric similarity matrix over all users of a [`UserItemMatrix`].
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    users: Vec<UserKey>,
    values: Array2<f64>,
}

impl SimilarityMatrix {
    /// Compute the full matrix. O(U² · P).
    pub fn compute(matrix: &UserItemMatrix) -> Self {
        let n = matrix.n_users();
        let rows = matrix.values();
        let mut values = Array2::<f64>::zeros((n, n));

        for i in 0..n {
            for j in i..n {
                let sim = cosine_similarity(rows.row(i), rows.row(j));
                values[[i, j]] = sim;
                values[[j, i]] = sim;
            }
        }

        Self {
            users: matrix.users().to_vec(),
            values,
        }
    }

    pub fn users(&self) -> &[UserKey] {
        &self.users
    }

    /// Similarity between two users, `None` if either is unknown.
    pub fn get(&self, a: UserKey, b: UserKey) -> Option<f64> {
        let i = self.position(a)?;
        let j = self.position(b)?;
        Some(self.values[[i, j]])
    }

    /// One user's similarities to every user, self included.
    pub fn row(&self, user: UserKey) -> Option<Vec<(UserKey, f64)>> {
        let i = self.position(user)?;
        Some(
            self.users
                .iter()
                .zip(self.values.row(i).iter())
                .map(|(u, s)| (*u, *s))
                .collect(),
        )
    }

    fn position(&self, user: UserKey) -> Option<usize> {
        self.users.binary_search(&user).ok()
    }
}

/// Similarities of one target user against every row. O(U · P).
///
/// Values are identical to the target's row of [`SimilarityMatrix::compute`].
pub fn similarity_row(matrix: &UserItemMatrix, target: UserKey) -> Option<Vec<(UserKey, f64)>> {
    let target_row = matrix.row(target)?;
    let rows = matrix.values();
    Some(
        matrix
            .users()
            .iter()
            .enumerate()
            .map(|(i, u)| (*u, cosine_similarity(target_row, rows.row(i))))
            .collect(),
    )
}
