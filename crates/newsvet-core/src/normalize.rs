//! Deterministic text cleaning and tokenization, shared by every stage.
//!
//! Index build, query scoring, and the reranker must all tokenize identically
//! or scores become meaningless, so this is the only place text is cleaned.
//! Both patterns are Unicode-aware: the corpus is largely Vietnamese.

use regex::Regex;
use std::sync::OnceLock;

fn strip_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s]").expect("static regex"))
}

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w+").expect("static regex"))
}

/// Strip everything that is not a word character or whitespace, trim, and
/// lowercase. Never fails; empty or non-text input yields an empty string.
pub fn normalize(text: &str) -> String {
    strip_re().replace_all(text, "").trim().to_lowercase()
}

/// Normalize, then split on word boundaries. Possibly empty.
pub fn tokenize(text: &str) -> Vec<String> {
    let clean = normalize(text);
    word_re()
        .find_iter(&clean)
        .map(|m| m.as_str().to_string())
        .collect()
}
