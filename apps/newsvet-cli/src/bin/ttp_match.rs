use std::env;
use std::path::PathBuf;

use newsvet_core::config::{expand_path, Config, EngineSettings};
use newsvet_core::Error;
use newsvet_embed::get_default_embedder;
use newsvet_vector::TtpMatcher;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <text> [index_dir]", args[0]);
        eprintln!(
            "Example: {} 'công an gọi điện yêu cầu chuyển tiền' ./data/indexes/ttp",
            args[0]
        );
        std::process::exit(1);
    }
    let text = &args[1];

    let config = Config::load()?;
    let settings = EngineSettings::from_config(&config)?;
    let index_dir = args.get(2).map(PathBuf::from).unwrap_or_else(|| {
        let dir: String = config
            .get("ttp.index_dir")
            .unwrap_or_else(|_| "./data/indexes/ttp".to_string());
        expand_path(dir)
    });

    let matcher = match TtpMatcher::open(&index_dir, get_default_embedder(settings.embed_dim)) {
        Ok(matcher) => matcher,
        Err(err) if matches!(err.downcast_ref::<Error>(), Some(Error::IndexNotBuilt(_))) => {
            eprintln!("No TTP index at {} yet.", index_dir.display());
            eprintln!("Build one first: cargo run --bin newsvet-ttp-build");
            std::process::exit(1);
        }
        Err(err) => return Err(err),
    };

    let matches = matcher.match_text(text, settings.ttp_top_k, settings.ttp_threshold)?;
    println!(
        "🔍 {} match(es) above threshold {:.2} for: \"{}\"",
        matches.len(),
        settings.ttp_threshold,
        text
    );
    for (i, m) in matches.iter().enumerate() {
        println!(
            "  {}. similarity={:.3}  category={}  technique={}  source={}",
            i + 1,
            m.similarity,
            m.category,
            m.technique,
            m.source
        );
    }
    Ok(())
}
