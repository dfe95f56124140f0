use chrono::NaiveDate;

use newsvet_core::types::NewsDocument;
use newsvet_text::{Bm25Params, LexicalIndex};

fn doc(id: &str, title: &str, content: &str, source: &str) -> NewsDocument {
    NewsDocument {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        date: NaiveDate::from_ymd_opt(2024, 1, 1),
        source: source.to_string(),
    }
}

fn fraud_corpus() -> Vec<NewsDocument> {
    vec![
        doc(
            "1",
            "Ngân hàng cảnh báo lừa đảo",
            "Nhiều vụ lừa đảo chuyển tiền qua ngân hàng được ghi nhận",
            "A",
        ),
        doc(
            "2",
            "Thời tiết hôm nay",
            "Trời nắng đẹp trên cả nước, nhiệt độ cao nhất 34 độ",
            "B",
        ),
    ]
}

#[test]
fn fraud_query_ranks_fraud_article_first() {
    let index = LexicalIndex::build(fraud_corpus(), Bm25Params::default());
    let results = index.search("lừa đảo ngân hàng", 10);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].document.id, "1");
}

#[test]
fn matching_terms_outscore_non_matching_documents() {
    // Three documents so single-document terms carry positive IDF.
    let mut corpus = fraud_corpus();
    corpus.push(doc(
        "3",
        "Giá xăng tăng nhẹ",
        "Giá xăng dầu trong nước tăng nhẹ từ chiều nay",
        "C",
    ));
    let index = LexicalIndex::build(corpus, Bm25Params::default());
    let results = index.search("lừa đảo ngân hàng", 10);
    assert_eq!(results[0].document.id, "1");
    assert!(results[0].score_bm25 > results[1].score_bm25);
}

#[test]
fn empty_and_whitespace_queries_return_nothing() {
    let index = LexicalIndex::build(fraud_corpus(), Bm25Params::default());
    assert!(index.search("", 10).is_empty());
    assert!(index.search("   ", 10).is_empty());
    assert!(index.search("?!...", 10).is_empty());
}

#[test]
fn empty_corpus_returns_nothing() {
    let index = LexicalIndex::build(vec![], Bm25Params::default());
    assert!(index.is_empty());
    assert!(index.search("lừa đảo", 10).is_empty());
}

#[test]
fn result_count_is_bounded_by_top_k_and_corpus() {
    let index = LexicalIndex::build(fraud_corpus(), Bm25Params::default());
    assert_eq!(index.search("lừa đảo", 1).len(), 1);
    assert!(index.search("lừa đảo", 100).len() <= index.len());
}

#[test]
fn rebuild_from_same_corpus_is_deterministic() {
    let a = LexicalIndex::build(fraud_corpus(), Bm25Params::default());
    let b = LexicalIndex::build(fraud_corpus(), Bm25Params::default());
    let ra = a.search("lừa đảo ngân hàng", 10);
    let rb = b.search("lừa đảo ngân hàng", 10);
    assert_eq!(ra.len(), rb.len());
    for (x, y) in ra.iter().zip(rb.iter()) {
        assert_eq!(x.document.id, y.document.id);
        assert!((x.score_bm25 - y.score_bm25).abs() < 1e-6);
    }
}

#[test]
fn ties_keep_corpus_order() {
    let corpus = vec![
        doc("first", "cùng một nội dung", "văn bản giống hệt nhau", "A"),
        doc("second", "cùng một nội dung", "văn bản giống hệt nhau", "A"),
    ];
    let index = LexicalIndex::build(corpus, Bm25Params::default());
    let results = index.search("nội dung giống", 10);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].document.id, "first");
    assert_eq!(results[1].document.id, "second");
}

#[test]
fn scores_are_not_filtered_on_sign() {
    // A term present in every document gets a floored (possibly negative)
    // IDF; the documents must still come back.
    let corpus = vec![
        doc("1", "tin tức", "tin tức buổi sáng", "A"),
        doc("2", "tin tức", "tin tức buổi tối", "B"),
    ];
    let index = LexicalIndex::build(corpus, Bm25Params::default());
    let results = index.search("tin tức", 10);
    assert_eq!(results.len(), 2);
}
