use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use newsvet_core::provider::StaticDocuments;
use newsvet_core::traits::DocumentProvider;
use newsvet_core::types::NewsDocument;
use newsvet_hybrid::{RetrievalEngine, RetrievalOptions};

fn doc(id: &str, title: &str, content: &str, source: &str) -> NewsDocument {
    NewsDocument {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        date: None,
        source: source.to_string(),
    }
}

fn news_corpus() -> Vec<NewsDocument> {
    vec![
        doc(
            "1",
            "Ngân hàng cảnh báo lừa đảo",
            "Nhiều vụ lừa đảo chuyển tiền qua ngân hàng được ghi nhận trong tuần",
            "A",
        ),
        doc(
            "2",
            "Thời tiết hôm nay",
            "Trời nắng đẹp trên cả nước, nhiệt độ cao nhất 34 độ",
            "B",
        ),
        doc(
            "3",
            "Giá xăng tăng nhẹ",
            "Giá xăng dầu trong nước tăng nhẹ từ chiều nay",
            "C",
        ),
        doc(
            "4",
            "Cảnh báo tin giả trên mạng",
            "Cơ quan chức năng cảnh báo tin giả lan truyền trên mạng xã hội",
            "A",
        ),
    ]
}

fn engine(options: RetrievalOptions) -> RetrievalEngine {
    RetrievalEngine::new(Box::new(StaticDocuments(news_corpus())), options).expect("engine")
}

#[test]
fn fraud_query_puts_fraud_article_on_top() {
    let engine = engine(RetrievalOptions::default());
    let results = engine.retrieve("lừa đảo ngân hàng").expect("retrieve");
    assert!(!results.is_empty());
    assert_eq!(results[0].document.id, "1");
    // Final ordering is by the reranker's score, non-increasing.
    assert!(results
        .windows(2)
        .all(|w| w[0].score_tfidf >= w[1].score_tfidf));
}

#[test]
fn result_count_never_exceeds_min_of_limits_and_corpus() {
    let engine = engine(RetrievalOptions::default());
    for (top_k, top_rerank) in [(10, 3), (2, 5), (1, 1), (100, 100)] {
        let results = engine
            .retrieve_with("cảnh báo", top_k, top_rerank)
            .expect("retrieve");
        assert!(results.len() <= top_rerank.min(top_k).min(4));
    }
}

#[test]
fn empty_and_blank_queries_return_nothing() {
    let engine = engine(RetrievalOptions::default());
    assert!(engine.retrieve("").expect("retrieve").is_empty());
    assert!(engine.retrieve("   ").expect("retrieve").is_empty());
}

#[test]
fn empty_corpus_returns_nothing() {
    let engine = RetrievalEngine::new(
        Box::new(StaticDocuments(vec![])),
        RetrievalOptions::default(),
    )
    .expect("engine");
    assert!(engine.retrieve("lừa đảo").expect("retrieve").is_empty());
}

#[test]
fn rebuild_and_requery_is_deterministic() {
    let engine = engine(RetrievalOptions::default());
    let first = engine.retrieve("cảnh báo lừa đảo").expect("retrieve");
    engine.rebuild().expect("rebuild");
    let second = engine.retrieve("cảnh báo lừa đảo").expect("retrieve");

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.document.id, b.document.id);
        assert!((a.score_bm25 - b.score_bm25).abs() < 1e-6);
    }
}

/// Provider that counts fetches of a shared, growable collection.
struct CountingProvider {
    docs: Arc<Mutex<Vec<NewsDocument>>>,
    fetches: Arc<AtomicUsize>,
}

impl DocumentProvider for CountingProvider {
    fn documents(&self) -> anyhow::Result<Vec<NewsDocument>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.docs.lock().expect("lock").clone())
    }
}

#[test]
fn rebuild_per_query_refetches_the_corpus() {
    let fetches = Arc::new(AtomicUsize::new(0));
    let engine = RetrievalEngine::new(
        Box::new(CountingProvider {
            docs: Arc::new(Mutex::new(news_corpus())),
            fetches: Arc::clone(&fetches),
        }),
        RetrievalOptions {
            rebuild_per_query: true,
            ..RetrievalOptions::default()
        },
    )
    .expect("engine");

    let before = fetches.load(Ordering::SeqCst);
    engine.retrieve("lừa đảo").expect("retrieve");
    engine.retrieve("lừa đảo").expect("retrieve");
    assert_eq!(fetches.load(Ordering::SeqCst), before + 2);
}

#[test]
fn rebuild_picks_up_new_documents_and_queries_keep_old_snapshot_until_then() {
    let docs = Arc::new(Mutex::new(news_corpus()));
    let engine = RetrievalEngine::new(
        Box::new(CountingProvider {
            docs: Arc::clone(&docs),
            fetches: Arc::new(AtomicUsize::new(0)),
        }),
        RetrievalOptions::default(),
    )
    .expect("engine");

    docs.lock().expect("lock").push(doc(
        "5",
        "Giá bitcoin lao dốc",
        "Thị trường bitcoin giảm mạnh trong phiên sáng",
        "D",
    ));
    // Index snapshot predates the insert.
    let stale = engine.retrieve("bitcoin").expect("retrieve");
    assert!(stale.iter().all(|r| r.document.id != "5"));

    engine.rebuild().expect("rebuild");
    let fresh = engine.retrieve("bitcoin").expect("retrieve");
    assert_eq!(fresh[0].document.id, "5");
}
