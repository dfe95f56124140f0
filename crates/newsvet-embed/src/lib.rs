//! newsvet-embed
//!
//! Embedder implementations behind the `newsvet_core::traits::Embedder` seam.
//! The engine treats the embedding model as an external collaborator; what
//! ships here is a deterministic hashing embedder that needs no model files
//! and no network, which keeps index builds and tests reproducible offline.
//! A learned model can be swapped in behind the same trait — doing so changes
//! the vector space, so every persisted index must be rebuilt.

use std::hash::{Hash, Hasher};

use twox_hash::XxHash64;

use newsvet_core::normalize::tokenize;
use newsvet_core::traits::Embedder;

pub const DEFAULT_DIM: usize = 1024;

/// Bag-of-words embedder: each token hashes to one coordinate, coordinates
/// accumulate counts, and the vector is L2-normalized. Inner product between
/// two embeddings is then the cosine overlap of their token multisets, which
/// makes the pattern-match threshold behave predictably.
pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dim];
        for token in tokenize(text) {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let idx = (hasher.finish() as usize) % self.dim;
            v[idx] += 1.0;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        // Empty input stays the zero vector: similar to nothing.
        v
    }
}

impl Embedder for HashEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}

/// The embedder the binaries and index builders use unless a caller wires in
/// another implementation.
pub fn get_default_embedder(dim: usize) -> Box<dyn Embedder> {
    tracing::debug!(dim, "using hashing embedder");
    Box::new(HashEmbedder::new(dim))
}
