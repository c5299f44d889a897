//! Vector index: row-normalized embedding matrix plus the chunk texts.

use finsight_core::{Error, Result};
use ndarray::{Array1, Array2, Axis};

/// A retrieval hit: stored chunk text with its cosine score.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub text: String,
    pub score: f32,
}

/// Exact cosine nearest-neighbor index over embedded chunks.
///
/// Rows are L2-normalized at insert time so lookup is one matrix-vector
/// product. The index grows only by incremental insertion; it is never
/// rebuilt once created. Owned exclusively by one retrieval session, so it
/// carries no locking.
#[derive(Debug)]
pub struct VectorIndex {
    dim: usize,
    matrix: Array2<f32>,
    texts: Vec<String>,
}

impl VectorIndex {
    /// Create an index from the first successful batch of (text, vector)
    /// pairs.
    pub fn from_pairs(dim: usize, texts: Vec<String>, vectors: Vec<Vec<f32>>) -> Result<Self> {
        let mut index = Self {
            dim,
            matrix: Array2::zeros((0, dim)),
            texts: Vec::new(),
        };
        index.insert(texts, vectors)?;
        Ok(index)
    }

    /// Merge a further batch of pairs into the index.
    pub fn insert(&mut self, texts: Vec<String>, vectors: Vec<Vec<f32>>) -> Result<()> {
        if texts.len() != vectors.len() {
            return Err(Error::Internal(format!(
                "{} texts paired with {} vectors",
                texts.len(),
                vectors.len()
            )));
        }

        for (text, vector) in texts.into_iter().zip(vectors) {
            if vector.len() != self.dim {
                return Err(Error::Internal(format!(
                    "embedding dimension {} does not match index dimension {}",
                    vector.len(),
                    self.dim
                )));
            }

            let mut row = Array1::from_vec(vector);
            let norm = row.dot(&row).sqrt();
            // A zero vector stays a zero row: cosine 0, never surfaces in
            // search, but the chunk/vector pairing is preserved.
            if norm > 1e-9 {
                row /= norm;
            }

            if self.matrix.nrows() == 0 {
                self.matrix = row.insert_axis(Axis(0));
            } else {
                self.matrix
                    .push(Axis(0), row.view())
                    .map_err(|e| Error::Internal(format!("matrix append failed: {e}")))?;
            }
            self.texts.push(text);
        }

        Ok(())
    }

    /// Top-k cosine lookup over the stored chunks.
    pub fn search(&self, query: &Array1<f32>, top_k: usize) -> Result<Vec<SearchHit>> {
        if query.len() != self.dim {
            return Err(Error::Internal(format!(
                "query dimension {} does not match index dimension {}",
                query.len(),
                self.dim
            )));
        }
        if self.matrix.nrows() == 0 || top_k == 0 {
            return Ok(Vec::new());
        }

        let q_norm = query.dot(query).sqrt();
        if q_norm < 1e-9 {
            return Ok(Vec::new());
        }
        let q = query / q_norm;

        // (N, dim) @ (dim,) -> (N,)
        let similarities = self.matrix.dot(&q);

        let mut indexed: Vec<(usize, f32)> = similarities.iter().copied().enumerate().collect();
        indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        indexed.truncate(top_k.min(self.texts.len()));

        Ok(indexed
            .into_iter()
            .map(|(i, score)| SearchHit {
                text: self.texts[i].clone(),
                score,
            })
            .collect())
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dim
    }
}
