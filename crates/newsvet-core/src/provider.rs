//! Document and pattern providers backing the collaborator traits.
//!
//! The JSON providers cover the common deployment (scrapers drop article
//! batches as JSON files, the TTP catalogue is one curated JSON file); the
//! static providers wrap collections already in memory.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::traits::{DocumentProvider, PatternProvider};
use crate::types::{NewsDocument, TtpPattern};

/// A fixed, in-memory document collection.
pub struct StaticDocuments(pub Vec<NewsDocument>);

impl DocumentProvider for StaticDocuments {
    fn documents(&self) -> Result<Vec<NewsDocument>> {
        Ok(self.0.clone())
    }
}

/// A fixed, in-memory pattern catalogue.
pub struct StaticPatterns(pub Vec<TtpPattern>);

impl PatternProvider for StaticPatterns {
    fn patterns(&self) -> Result<Vec<TtpPattern>> {
        Ok(self.0.clone())
    }
}

/// Raw article row as the scrapers write it. Dates arrive as strings and
/// unparseable ones are coerced to `None` rather than failing the load.
#[derive(Debug, Deserialize)]
struct ArticleRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    source: Option<String>,
}

fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    // Scrapers write either a bare date or a full timestamp; the date is the
    // first ten bytes either way.
    let head = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Loads every `*.json` file under a directory tree; each file holds an array
/// of article records. Files are visited in sorted order so the corpus order
/// (and therefore BM25 tie-breaking) is stable across rebuilds.
pub struct JsonDirProvider {
    root: PathBuf,
}

impl JsonDirProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn list_json_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("json"))
            .map(|e| e.path().to_path_buf())
            .collect();
        files.sort();
        files
    }

    fn load_file(path: &Path) -> Result<Vec<NewsDocument>> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading article file {}", path.display()))?;
        let records: Vec<ArticleRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing article file {}", path.display()))?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "articles".to_string());
        let docs = records
            .into_iter()
            .enumerate()
            .map(|(i, r)| NewsDocument {
                id: r.id.unwrap_or_else(|| format!("{stem}:{i}")),
                title: r.title,
                content: r.content,
                date: parse_date(r.date.as_deref()),
                source: r.source.unwrap_or_else(|| stem.clone()),
            })
            .collect();
        Ok(docs)
    }
}

impl DocumentProvider for JsonDirProvider {
    fn documents(&self) -> Result<Vec<NewsDocument>> {
        let files = self.list_json_files();
        if files.is_empty() {
            tracing::info!(root = %self.root.display(), "no .json article files found");
            return Ok(vec![]);
        }
        let mut docs = Vec::new();
        for path in &files {
            docs.extend(Self::load_file(path)?);
        }
        tracing::info!(
            files = files.len(),
            documents = docs.len(),
            "loaded article collection"
        );
        Ok(docs)
    }
}

/// Loads the TTP catalogue from a single JSON array file.
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PatternProvider for JsonFileProvider {
    fn patterns(&self) -> Result<Vec<TtpPattern>> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("reading pattern catalogue {}", self.path.display()))?;
        let patterns: Vec<TtpPattern> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing pattern catalogue {}", self.path.display()))?;
        tracing::info!(patterns = patterns.len(), "loaded ttp catalogue");
        Ok(patterns)
    }
}
