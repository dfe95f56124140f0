//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env
//! vars. Provides a helper to expand `~` and `${VAR}` in user-supplied paths,
//! plus the typed engine settings with their defaults.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::env;
use std::path::PathBuf;

use crate::error::Error;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_"));

        Ok(Self { figment })
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }
}

/// Engine knobs with their defaults, resolved from a loaded [`Config`].
///
/// The BM25 constants shape ranking taste, not correctness, which is why they
/// are configurable at all.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub top_k: usize,
    pub top_rerank: usize,
    pub rebuild_per_query: bool,
    pub bm25_k1: f32,
    pub bm25_b: f32,
    pub ttp_top_k: usize,
    pub ttp_threshold: f32,
    pub embed_dim: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            top_k: 10,
            top_rerank: 3,
            rebuild_per_query: false,
            bm25_k1: 1.5,
            bm25_b: 0.75,
            ttp_top_k: 2,
            ttp_threshold: 0.4,
            embed_dim: 1024,
        }
    }
}

impl EngineSettings {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let settings = Self {
            top_k: config.get("retrieval.top_k").unwrap_or(defaults.top_k),
            top_rerank: config
                .get("retrieval.top_rerank")
                .unwrap_or(defaults.top_rerank),
            rebuild_per_query: config
                .get("retrieval.rebuild_per_query")
                .unwrap_or(defaults.rebuild_per_query),
            bm25_k1: config.get("bm25.k1").unwrap_or(defaults.bm25_k1),
            bm25_b: config.get("bm25.b").unwrap_or(defaults.bm25_b),
            ttp_top_k: config.get("ttp.top_k").unwrap_or(defaults.ttp_top_k),
            ttp_threshold: config
                .get("ttp.threshold")
                .unwrap_or(defaults.ttp_threshold),
            embed_dim: config.get("embed.dim").unwrap_or(defaults.embed_dim),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.bm25_k1.is_finite() || self.bm25_k1 <= 0.0 {
            return Err(
                Error::InvalidConfig(format!("bm25.k1 must be > 0, got {}", self.bm25_k1)).into(),
            );
        }
        if !(0.0..=1.0).contains(&self.bm25_b) {
            return Err(
                Error::InvalidConfig(format!("bm25.b must be in [0, 1], got {}", self.bm25_b))
                    .into(),
            );
        }
        if self.embed_dim == 0 {
            return Err(Error::InvalidConfig("embed.dim must be > 0".to_string()).into());
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
