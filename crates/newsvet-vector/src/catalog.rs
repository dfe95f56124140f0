//! Pattern catalogue persistence and fingerprinting.
//!
//! The catalogue is stored next to the index blob so pattern metadata can be
//! recovered after a search. The fingerprint ties an index to the catalogue
//! state it was built from; a mismatch means the catalogue changed after the
//! build and the index should be rebuilt.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use newsvet_core::types::TtpPattern;

pub const INDEX_FILE: &str = "ttp_index.json";
pub const CATALOG_FILE: &str = "ttp_catalog.json";

pub fn index_path(dir: &Path) -> PathBuf {
    dir.join(INDEX_FILE)
}

pub fn catalog_path(dir: &Path) -> PathBuf {
    dir.join(CATALOG_FILE)
}

/// blake3 over the serialized catalogue, in order.
pub fn fingerprint(patterns: &[TtpPattern]) -> Result<String> {
    let raw = serde_json::to_vec(patterns).context("serializing catalogue for fingerprint")?;
    Ok(blake3::hash(&raw).to_hex().to_string())
}

pub fn save_catalog(dir: &Path, patterns: &[TtpPattern]) -> Result<()> {
    let path = catalog_path(dir);
    let raw = serde_json::to_string_pretty(patterns).context("serializing catalogue")?;
    fs::write(&path, raw).with_context(|| format!("writing catalogue {}", path.display()))?;
    Ok(())
}

pub fn load_catalog(dir: &Path) -> Result<Vec<TtpPattern>> {
    let path = catalog_path(dir);
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("reading catalogue {}", path.display()))?;
    let patterns = serde_json::from_str(&raw)
        .with_context(|| format!("parsing catalogue {}", path.display()))?;
    Ok(patterns)
}
