//! newsvet-hybrid
//!
//! The two-stage document search entry point: BM25 over the whole corpus,
//! then TF-IDF cosine reranking over the candidate set. The engine is an
//! explicit owned value built from a document snapshot — no process-wide
//! singleton. Rebuilds construct a fresh index aside and swap it in, so
//! concurrent queries keep reading the old snapshot until the swap.

use anyhow::Result;
use std::sync::{Arc, RwLock};

use newsvet_core::traits::DocumentProvider;
use newsvet_core::types::QueryResult;
use newsvet_text::{rerank, Bm25Params, LexicalIndex};

pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_TOP_RERANK: usize = 3;

#[derive(Debug, Clone, Copy)]
pub struct RetrievalOptions {
    pub top_k: usize,
    pub top_rerank: usize,
    /// Re-fetch the corpus and rebuild before every query. Trades build cost
    /// for never serving a stale corpus; off by default.
    pub rebuild_per_query: bool,
    pub bm25: Bm25Params,
}

impl Default for RetrievalOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            top_rerank: DEFAULT_TOP_RERANK,
            rebuild_per_query: false,
            bm25: Bm25Params::default(),
        }
    }
}

pub struct RetrievalEngine {
    provider: Box<dyn DocumentProvider>,
    options: RetrievalOptions,
    index: RwLock<Arc<LexicalIndex>>,
}

impl RetrievalEngine {
    /// Build the engine from the provider's current document collection.
    pub fn new(provider: Box<dyn DocumentProvider>, options: RetrievalOptions) -> Result<Self> {
        let docs = provider.documents()?;
        let index = LexicalIndex::build(docs, options.bm25);
        Ok(Self {
            provider,
            options,
            index: RwLock::new(Arc::new(index)),
        })
    }

    /// Fetch the current collection, build a fresh index, and swap it in.
    /// In-flight queries keep their snapshot; the old index drops with the
    /// last reader.
    pub fn rebuild(&self) -> Result<()> {
        let docs = self.provider.documents()?;
        let fresh = Arc::new(LexicalIndex::build(docs, self.options.bm25));
        let mut guard = self
            .index
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = fresh;
        Ok(())
    }

    fn snapshot(&self) -> Arc<LexicalIndex> {
        let guard = self
            .index
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Two-stage search with the configured limits.
    pub fn retrieve(&self, query: &str) -> Result<Vec<QueryResult>> {
        self.retrieve_with(query, self.options.top_k, self.options.top_rerank)
    }

    /// Two-stage search: BM25 top-`top_k` candidates, reranked and cut to
    /// `top_rerank`. Never returns more than `min(top_rerank, top_k, corpus)`
    /// results; an empty query or corpus yields an empty result.
    pub fn retrieve_with(
        &self,
        query: &str,
        top_k: usize,
        top_rerank: usize,
    ) -> Result<Vec<QueryResult>> {
        if self.options.rebuild_per_query {
            self.rebuild()?;
        }
        let index = self.snapshot();
        let candidates = index.search(query, top_k);
        tracing::debug!(
            query,
            candidates = candidates.len(),
            corpus = index.len(),
            "lexical stage done"
        );
        Ok(rerank(candidates, query, top_rerank))
    }
}
