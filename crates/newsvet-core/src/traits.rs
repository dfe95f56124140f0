//! Collaborator seams: where documents, patterns, and embeddings come from.

use crate::types::{NewsDocument, TtpPattern};

/// Source of the current document collection. The engine snapshots whatever
/// this returns at build time; staleness is the caller's policy.
pub trait DocumentProvider: Send + Sync {
    fn documents(&self) -> anyhow::Result<Vec<NewsDocument>>;
}

/// Source of the current TTP pattern catalogue.
pub trait PatternProvider: Send + Sync {
    fn patterns(&self) -> anyhow::Result<Vec<TtpPattern>>;
}

/// External embedding model. Output vectors must be L2-normalized and of
/// fixed dimension `dim()`; inner product over them is cosine similarity.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
}
