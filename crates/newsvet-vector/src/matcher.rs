//! Query-side orchestration: embed free text, search the index, hydrate
//! pattern metadata, filter by threshold.

use anyhow::Result;
use std::path::Path;

use newsvet_core::traits::Embedder;
use newsvet_core::types::{TtpMatch, TtpPattern};
use newsvet_core::Error;

use crate::catalog;
use crate::index::TtpIndex;

pub struct TtpMatcher {
    index: TtpIndex,
    patterns: Vec<TtpPattern>,
    embedder: Box<dyn Embedder>,
}

impl std::fmt::Debug for TtpMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtpMatcher")
            .field("index", &self.index)
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}

impl TtpMatcher {
    /// Pair an index with the live catalogue. The embedder must be the one
    /// the index was built with; the dimension check is the only mismatch we
    /// can catch. Catalogue drift since the build is flagged, not fatal:
    /// matching still works for unchanged positions.
    pub fn new(
        index: TtpIndex,
        patterns: Vec<TtpPattern>,
        embedder: Box<dyn Embedder>,
    ) -> Result<Self> {
        if embedder.dim() != index.dim() {
            return Err(Error::DimensionMismatch {
                expected: index.dim(),
                got: embedder.dim(),
            }
            .into());
        }
        let live = catalog::fingerprint(&patterns)?;
        if live != index.catalog_fingerprint() {
            tracing::warn!(
                "pattern catalogue changed since the index was built; matches may be wrong until a rebuild"
            );
        }
        Ok(Self {
            index,
            patterns,
            embedder,
        })
    }

    /// Load the persisted index blob and its catalogue from `dir`.
    /// [`Error::IndexNotBuilt`] when no build has happened yet.
    pub fn open(dir: &Path, embedder: Box<dyn Embedder>) -> Result<Self> {
        let index = TtpIndex::load(dir)?;
        let patterns = catalog::load_catalog(dir)?;
        Self::new(index, patterns, embedder)
    }

    /// Match free text against the catalogue: top-k neighbors by inner
    /// product, dropped below `threshold`, metadata looked up by index
    /// position, similarity rounded to 3 decimals, best first.
    pub fn match_text(&self, text: &str, top_k: usize, threshold: f32) -> Result<Vec<TtpMatch>> {
        if self.patterns.is_empty() {
            return Err(Error::EmptyCatalog.into());
        }
        let mut embedded = self.embedder.embed_batch(&[text.to_string()])?;
        let query_vec = embedded
            .pop()
            .ok_or_else(|| anyhow::anyhow!("embedder returned no vector"))?;

        let neighbors = self.index.search_vec(&query_vec, top_k)?;
        let mut matches = Vec::new();
        for (position, similarity) in neighbors {
            if similarity < threshold {
                continue;
            }
            // Bounds check against the live catalogue: a stale index can
            // point past the end after deletions. Dropped, not fatal.
            let Some(pattern) = self.patterns.get(position) else {
                tracing::warn!(
                    position,
                    catalogue = self.patterns.len(),
                    "neighbor position outside catalogue, dropping stale hit"
                );
                continue;
            };
            matches.push(TtpMatch {
                category: pattern.category.clone(),
                technique: pattern.technique.clone(),
                source: pattern.source.clone(),
                similarity: round3(similarity),
            });
        }
        Ok(matches)
    }
}

fn round3(x: f32) -> f32 {
    (x * 1000.0).round() / 1000.0
}
