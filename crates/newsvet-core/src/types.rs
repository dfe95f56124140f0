//! Domain types shared by the lexical and vector engines.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An ingested news article, owned by the external store and read-only here.
///
/// - `id`: opaque identifier assigned by the store
/// - `title`/`content`: raw article text, normalized at index time
/// - `date`: publication date when the scraper could parse one
/// - `source`: originating site or feed
///
/// The engine does not police duplicates; two rows with the same title are
/// two corpus entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsDocument {
    pub id: String,
    pub title: String,
    pub content: String,
    pub date: Option<NaiveDate>,
    pub source: String,
}

/// One ranked hit from the document search path.
///
/// `score_bm25` is set by the lexical stage and kept when the reranker runs;
/// `score_tfidf` is attached by the reranker and defines the final rank.
/// Scores are corpus-relative (BM25) or candidate-set relative (TF-IDF) and
/// must not be compared across queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    pub document: NewsDocument,
    pub score_bm25: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_tfidf: Option<f32>,
}

/// A catalogued fraud pattern (tactic/technique/procedure).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtpPattern {
    pub pattern: String,
    pub category: String,
    pub technique: String,
    pub source: String,
}

/// One pattern-catalogue hit, ordered by descending similarity.
/// `similarity` is cosine on normalized vectors, rounded to 3 decimals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtpMatch {
    pub category: String,
    pub technique: String,
    pub source: String,
    pub similarity: f32,
}
