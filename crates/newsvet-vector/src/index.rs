//! Flat inner-product index over embedded pattern descriptions.
//!
//! Vectors are L2-normalized by the embedder, so inner product is cosine
//! similarity. Dimensionality is fixed at build time; swapping the embedding
//! model invalidates every persisted index, and beyond the dimension check a
//! model mismatch is undetectable at query time — rebuild, don't hope.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use newsvet_core::traits::Embedder;
use newsvet_core::types::TtpPattern;
use newsvet_core::Error;

use crate::catalog;

/// The text a pattern is embedded as: the description plus its category.
pub fn embedding_input(pattern: &TtpPattern) -> String {
    format!("{} - {}", pattern.pattern, pattern.category)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TtpIndex {
    dim: usize,
    vectors: Vec<Vec<f32>>,
    catalog_fingerprint: String,
}

impl TtpIndex {
    /// Embed every pattern via [`embedding_input`] and index the vectors in
    /// catalogue order. Fails with [`Error::EmptyCatalog`] when there is
    /// nothing to index.
    pub fn build(patterns: &[TtpPattern], embedder: &dyn Embedder) -> Result<Self> {
        let texts: Vec<String> = patterns.iter().map(embedding_input).collect();
        let vectors = if texts.is_empty() {
            vec![]
        } else {
            embedder.embed_batch(&texts)?
        };
        Self::from_vectors(patterns, vectors, embedder.dim())
    }

    /// Assemble an index from already-embedded pattern vectors, one per
    /// pattern in catalogue order.
    pub fn from_vectors(
        patterns: &[TtpPattern],
        vectors: Vec<Vec<f32>>,
        dim: usize,
    ) -> Result<Self> {
        if patterns.is_empty() {
            return Err(Error::EmptyCatalog.into());
        }
        if vectors.len() != patterns.len() {
            return Err(Error::CatalogMismatch {
                patterns: patterns.len(),
                vectors: vectors.len(),
            }
            .into());
        }
        for v in &vectors {
            if v.len() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    got: v.len(),
                }
                .into());
            }
        }
        let catalog_fingerprint = catalog::fingerprint(patterns)?;
        tracing::info!(patterns = patterns.len(), dim, "built ttp vector index");
        Ok(Self {
            dim,
            vectors,
            catalog_fingerprint,
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn catalog_fingerprint(&self) -> &str {
        &self.catalog_fingerprint
    }

    /// Top-k nearest neighbors by inner product, best first. Returns
    /// `(index position, similarity)` pairs; positions are catalogue array
    /// indices as of build time.
    pub fn search_vec(&self, query_vec: &[f32], k: usize) -> Result<Vec<(usize, f32)>> {
        if query_vec.len() != self.dim {
            return Err(Error::DimensionMismatch {
                expected: self.dim,
                got: query_vec.len(),
            }
            .into());
        }
        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, dot(query_vec, v)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }

    /// Write the index blob and the catalogue it was built from into `dir`.
    pub fn persist(&self, dir: &Path, patterns: &[TtpPattern]) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating index directory {}", dir.display()))?;
        let path = catalog::index_path(dir);
        let raw = serde_json::to_string(self).context("serializing index blob")?;
        fs::write(&path, raw).with_context(|| format!("writing index blob {}", path.display()))?;
        catalog::save_catalog(dir, patterns)?;
        tracing::info!(dir = %dir.display(), vectors = self.len(), "persisted ttp index");
        Ok(())
    }

    /// Load a persisted index blob. A missing blob is the normal first-run
    /// condition and comes back as [`Error::IndexNotBuilt`].
    pub fn load(dir: &Path) -> Result<Self> {
        let path = catalog::index_path(dir);
        if !path.exists() {
            return Err(Error::IndexNotBuilt(path).into());
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading index blob {}", path.display()))?;
        let index: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing index blob {}", path.display()))?;
        Ok(index)
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
