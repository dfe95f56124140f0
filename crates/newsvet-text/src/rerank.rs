//! Second-stage reranking: TF-IDF cosine over the candidate set.
//!
//! The vector space is fit over exactly the query plus its candidates. That
//! is intentional: BM25 already did the corpus-scale work, and a query-local
//! vocabulary makes the cosine scores specific to this candidate set. They
//! are not comparable across queries.

use std::collections::HashMap;

use newsvet_core::normalize::{normalize, tokenize};
use newsvet_core::types::QueryResult;

/// Rerank BM25 candidates by TF-IDF cosine similarity to the query, keeping
/// at most `top_rerank`. An empty normalized query or an empty candidate set
/// falls back to the candidates truncated in their existing order.
pub fn rerank(candidates: Vec<QueryResult>, query: &str, top_rerank: usize) -> Vec<QueryResult> {
    let query_text = normalize(query);
    if query_text.is_empty() || candidates.is_empty() {
        let mut out = candidates;
        out.truncate(top_rerank);
        return out;
    }

    // Row 0 is the query; rows 1.. are the candidates (title then content).
    let mut token_rows: Vec<Vec<String>> = Vec::with_capacity(candidates.len() + 1);
    token_rows.push(tokenize(&query_text));
    for c in &candidates {
        token_rows.push(tokenize(&format!(
            "{} {}",
            c.document.title, c.document.content
        )));
    }

    let rows = tfidf_rows(&token_rows);
    let mut reranked: Vec<QueryResult> = candidates
        .into_iter()
        .enumerate()
        .map(|(i, mut c)| {
            c.score_tfidf = Some(sparse_dot(&rows[0], &rows[i + 1]));
            c
        })
        .collect();

    // Stable sort keeps the incoming (BM25) order on ties.
    reranked.sort_by(|a, b| {
        b.score_tfidf
            .partial_cmp(&a.score_tfidf)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    reranked.truncate(top_rerank);
    reranked
}

/// L2-normalized TF-IDF rows with smoothed IDF, one sparse row per input.
/// With normalized rows, cosine similarity is a plain dot product.
fn tfidf_rows(token_rows: &[Vec<String>]) -> Vec<HashMap<String, f32>> {
    let n = token_rows.len() as f32;
    let mut df: HashMap<&str, usize> = HashMap::new();
    for tokens in token_rows {
        let mut seen: Vec<&str> = tokens.iter().map(String::as_str).collect();
        seen.sort_unstable();
        seen.dedup();
        for term in seen {
            *df.entry(term).or_insert(0) += 1;
        }
    }

    token_rows
        .iter()
        .map(|tokens| {
            let mut row: HashMap<String, f32> = HashMap::new();
            for t in tokens {
                *row.entry(t.clone()).or_insert(0.0) += 1.0;
            }
            for (term, weight) in row.iter_mut() {
                let d = df.get(term.as_str()).copied().unwrap_or(0) as f32;
                let idf = ((1.0 + n) / (1.0 + d)).ln() + 1.0;
                *weight *= idf;
            }
            let norm = row.values().map(|w| w * w).sum::<f32>().sqrt();
            if norm > 0.0 {
                for weight in row.values_mut() {
                    *weight /= norm;
                }
            }
            row
        })
        .collect()
}

fn sparse_dot(a: &HashMap<String, f32>, b: &HashMap<String, f32>) -> f32 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(term, wa)| large.get(term).map(|wb| wa * wb))
        .sum()
}
