use ndarray::{Array2, ArrayView1, Axis};

use crate::error::{AppError, AppResult};

/// All-pairs cosine similarity between the rows of a term-frequency matrix.
///
/// Only the upper triangle is computed and then mirrored, so `get(i, j)` and
/// `get(j, i)` are bit-for-bit equal. Rows with no terms score 0 against
/// everything, themselves included.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    values: Array2<f64>,
}

impl SimilarityMatrix {
    pub fn from_vectors(vectors: &Array2<f64>) -> Self {
        let n = vectors.nrows();
        let norms: Vec<f64> = vectors
            .axis_iter(Axis(0))
            .map(|row| row.dot(&row).sqrt())
            .collect();

        let mut values = Array2::<f64>::zeros((n, n));
        for i in 0..n {
            if norms[i] == 0.0 {
                continue;
            }
            values[[i, i]] = 1.0;
            let row_i = vectors.row(i);
            for j in (i + 1)..n {
                let sim = cosine(row_i, vectors.row(j), norms[i], norms[j]);
                values[[i, j]] = sim;
                values[[j, i]] = sim;
            }
        }

        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get([i, j]).copied()
    }

    /// Similarities of record `index` against every record
    pub fn row(&self, index: usize) -> AppResult<ArrayView1<'_, f64>> {
        if index >= self.len() {
            return Err(AppError::Internal(format!(
                "similarity row {} out of range for {} records",
                index,
                self.len()
            )));
        }
        Ok(self.values.row(index))
    }
}

fn cosine(a: ArrayView1<f64>, b: ArrayView1<f64>, norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    a.dot(&b) / (norm_a * norm_b)
}
