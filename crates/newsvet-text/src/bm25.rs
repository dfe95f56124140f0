//! In-memory Okapi BM25 index over the document collection.
//!
//! Corpus statistics (document count, average length, IDF) are global, so the
//! index is never mutated incrementally: inserting or deleting documents means
//! building a fresh index. Scores are corpus-relative; results from indices
//! built over different corpora are not comparable.

use std::collections::HashMap;

use newsvet_core::normalize::tokenize;
use newsvet_core::types::{NewsDocument, QueryResult};

/// Saturation (`k1`) and length-normalization (`b`) constants. These shape
/// ranking taste, not correctness.
#[derive(Debug, Clone, Copy)]
pub struct Bm25Params {
    pub k1: f32,
    pub b: f32,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self { k1: 1.5, b: 0.75 }
    }
}

/// Negative-IDF floor factor: terms occurring in more than half the corpus
/// get `0.25 * mean(idf)` instead of a negative weight.
const IDF_EPSILON: f32 = 0.25;

pub struct LexicalIndex {
    docs: Vec<NewsDocument>,
    term_freqs: Vec<HashMap<String, f32>>,
    doc_lens: Vec<f32>,
    avgdl: f32,
    idf: HashMap<String, f32>,
    params: Bm25Params,
}

impl LexicalIndex {
    /// Build the index from an ordered corpus snapshot. Index position is the
    /// corpus array index; the tie-break in [`LexicalIndex::search`] relies
    /// on that ordering being stable across rebuilds.
    pub fn build(docs: Vec<NewsDocument>, params: Bm25Params) -> Self {
        // Content first, then title; the concatenation order must match on
        // every rebuild or scores stop being comparable.
        let tokenized: Vec<Vec<String>> = docs
            .iter()
            .map(|d| tokenize(&format!("{} {}", d.content, d.title)))
            .collect();

        let n = docs.len();
        let mut term_freqs = Vec::with_capacity(n);
        let mut doc_lens = Vec::with_capacity(n);
        let mut df: HashMap<String, usize> = HashMap::new();
        for tokens in &tokenized {
            let mut tf: HashMap<String, f32> = HashMap::new();
            for t in tokens {
                *tf.entry(t.clone()).or_insert(0.0) += 1.0;
            }
            for term in tf.keys() {
                *df.entry(term.clone()).or_insert(0) += 1;
            }
            doc_lens.push(tokens.len() as f32);
            term_freqs.push(tf);
        }

        let avgdl = if n == 0 {
            0.0
        } else {
            doc_lens.iter().sum::<f32>() / n as f32
        };

        // Okapi IDF: ln(N - df + 0.5) - ln(df + 0.5). Terms in more than
        // half the documents come out negative and get the epsilon floor,
        // which is why downstream must not filter scores on sign.
        let n_f = n as f32;
        let mut idf = HashMap::with_capacity(df.len());
        let mut idf_sum = 0.0f32;
        let mut negative: Vec<String> = Vec::new();
        for (term, d) in df {
            let d_f = d as f32;
            let value = (n_f - d_f + 0.5).ln() - (d_f + 0.5).ln();
            idf_sum += value;
            if value < 0.0 {
                negative.push(term.clone());
            }
            idf.insert(term, value);
        }
        if !idf.is_empty() {
            let floor = IDF_EPSILON * idf_sum / idf.len() as f32;
            for term in negative {
                idf.insert(term, floor);
            }
        }

        tracing::info!(documents = n, terms = idf.len(), avgdl, "built lexical index");
        Self {
            docs,
            term_freqs,
            doc_lens,
            avgdl,
            idf,
            params,
        }
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Top-k keyword search. An empty token sequence or an empty corpus is a
    /// defined empty result, not an error. Every document is scored; ties are
    /// broken by corpus order (stable sort) so results are deterministic.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<QueryResult> {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() || self.docs.is_empty() {
            return vec![];
        }

        let mut scored: Vec<(usize, f32)> = (0..self.docs.len())
            .map(|i| (i, self.score_doc(&query_tokens, i)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);

        scored
            .into_iter()
            .map(|(i, score)| QueryResult {
                document: self.docs[i].clone(),
                score_bm25: score,
                score_tfidf: None,
            })
            .collect()
    }

    fn score_doc(&self, query_tokens: &[String], idx: usize) -> f32 {
        let tf = &self.term_freqs[idx];
        let dl = self.doc_lens[idx];
        let norm = self.params.k1 * (1.0 - self.params.b + self.params.b * dl / self.avgdl.max(1.0));
        query_tokens
            .iter()
            .filter_map(|t| {
                let f = *tf.get(t)?;
                let idf = *self.idf.get(t)?;
                Some(idf * f * (self.params.k1 + 1.0) / (f + norm))
            })
            .sum()
    }
}
