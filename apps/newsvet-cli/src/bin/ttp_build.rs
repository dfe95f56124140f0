use std::env;
use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};

use newsvet_core::config::{expand_path, Config, EngineSettings};
use newsvet_core::provider::JsonFileProvider;
use newsvet_core::traits::PatternProvider;
use newsvet_embed::get_default_embedder;
use newsvet_vector::{embedding_input, TtpIndex};

const EMBED_BATCH: usize = 64;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load()?;
    let settings = EngineSettings::from_config(&config)?;
    let args: Vec<String> = env::args().collect();
    let patterns_file = args.get(1).map(PathBuf::from).unwrap_or_else(|| {
        let path: String = config
            .get("data.patterns_file")
            .unwrap_or_else(|_| "./data/ttp_patterns.json".to_string());
        expand_path(path)
    });
    let index_dir = args.get(2).map(PathBuf::from).unwrap_or_else(|| {
        let dir: String = config
            .get("ttp.index_dir")
            .unwrap_or_else(|_| "./data/indexes/ttp".to_string());
        expand_path(dir)
    });

    println!("TTP Index Builder\n=================");
    println!("Catalogue: {}", patterns_file.display());
    println!("Index directory: {}", index_dir.display());

    let patterns = JsonFileProvider::new(&patterns_file).patterns()?;
    let embedder = get_default_embedder(settings.embed_dim);

    let pb = ProgressBar::new(patterns.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} patterns ({percent}%)")?
            .progress_chars("#>-"),
    );
    let mut vectors = Vec::with_capacity(patterns.len());
    for batch in patterns.chunks(EMBED_BATCH) {
        let texts: Vec<String> = batch.iter().map(embedding_input).collect();
        vectors.extend(embedder.embed_batch(&texts)?);
        pb.inc(batch.len() as u64);
    }
    pb.finish_with_message("embedding done");

    let index = TtpIndex::from_vectors(&patterns, vectors, embedder.dim())?;
    index.persist(&index_dir, &patterns)?;

    println!(
        "\n✅ Indexed {} patterns (dim {}) into {}",
        index.len(),
        index.dim(),
        index_dir.display()
    );
    println!("💡 To match text, use: cargo run --bin newsvet-ttp-match '<text>'");
    Ok(())
}
