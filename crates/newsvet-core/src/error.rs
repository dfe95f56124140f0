//! Typed errors for the retrieval engine.
//!
//! Empty queries and empty corpora are *not* errors: those operations return
//! empty results. The variants here are the conditions a caller needs to
//! distinguish and recover from (usually by rebuilding an index). Fallible
//! operations return `anyhow::Result`; these values travel inside it and can
//! be recovered with `err.downcast_ref::<Error>()`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A vector index build was requested over an empty pattern catalogue,
    /// or a match was attempted against one.
    #[error("pattern catalogue is empty, nothing to index")]
    EmptyCatalog,

    /// No persisted vector index exists yet. Expected on first run.
    #[error("vector index not built (looked for {0})")]
    IndexNotBuilt(PathBuf),

    /// Embedding dimensionality differs between build time and query time.
    /// A different embedding model requires a full index rebuild.
    #[error("embedding dimension mismatch: index has {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// An index build received a different number of vectors than patterns.
    /// Positions must cover the catalogue one-to-one.
    #[error("vector count {vectors} does not match catalogue size {patterns}")]
    CatalogMismatch { patterns: usize, vectors: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
