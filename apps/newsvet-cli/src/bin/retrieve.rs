use std::env;
use std::path::PathBuf;

use newsvet_core::config::{expand_path, Config, EngineSettings};
use newsvet_core::provider::JsonDirProvider;
use newsvet_hybrid::{RetrievalEngine, RetrievalOptions};
use newsvet_text::Bm25Params;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <query> [articles_dir]", args[0]);
        eprintln!("Example: {} 'lừa đảo ngân hàng' ./data/articles", args[0]);
        std::process::exit(1);
    }
    let query = &args[1];

    let config = Config::load()?;
    let settings = EngineSettings::from_config(&config)?;
    let articles_dir = args.get(2).map(PathBuf::from).unwrap_or_else(|| {
        let dir: String = config
            .get("data.articles_dir")
            .unwrap_or_else(|_| "./data/articles".to_string());
        expand_path(dir)
    });

    println!("🔍 newsvet-retrieve\n===================");
    println!("Query: {}", query);
    println!("Articles directory: {}", articles_dir.display());

    let options = RetrievalOptions {
        top_k: settings.top_k,
        top_rerank: settings.top_rerank,
        rebuild_per_query: settings.rebuild_per_query,
        bm25: Bm25Params {
            k1: settings.bm25_k1,
            b: settings.bm25_b,
        },
    };
    let engine = RetrievalEngine::new(Box::new(JsonDirProvider::new(articles_dir)), options)?;
    let results = engine.retrieve(query)?;

    println!("\n🔍 Found {} results for: \"{}\"", results.len(), query);
    for (i, result) in results.iter().enumerate() {
        let date = result
            .document
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "\n  {}. tfidf={:.4}  bm25={:.4}  [{}] {}",
            i + 1,
            result.score_tfidf.unwrap_or(0.0),
            result.score_bm25,
            date,
            result.document.title
        );
        println!(
            "     📰 source={}  id={}",
            result.document.source, result.document.id
        );
    }
    Ok(())
}
