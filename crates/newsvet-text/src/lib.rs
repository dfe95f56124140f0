//! newsvet-text
//!
//! Lexical retrieval over the article corpus: an Okapi BM25 index for the
//! first-stage keyword search and a query-local TF-IDF cosine reranker for
//! the second stage. See `bm25` and `rerank`.

pub mod bm25;
pub mod rerank;

pub use bm25::{Bm25Params, LexicalIndex};
pub use rerank::rerank;
