use newsvet_core::normalize::{normalize, tokenize};

#[test]
fn normalize_strips_punctuation_and_lowercases() {
    assert_eq!(normalize("Hello, World!"), "hello world");
    assert_eq!(normalize("  Trimmed.  "), "trimmed");
}

#[test]
fn normalize_keeps_vietnamese_letters() {
    assert_eq!(normalize("Ngân hàng cảnh báo: lừa đảo!"), "ngân hàng cảnh báo lừa đảo");
}

#[test]
fn normalize_empty_and_symbol_only_input() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("?!...;"), "");
    assert_eq!(normalize("   "), "");
}

#[test]
fn tokenize_splits_on_word_boundaries() {
    assert_eq!(tokenize("lừa đảo ngân hàng"), vec!["lừa", "đảo", "ngân", "hàng"]);
    assert_eq!(tokenize("a-b c_d"), vec!["ab", "c_d"]);
}

#[test]
fn tokenize_empty_yields_empty_sequence() {
    assert!(tokenize("").is_empty());
    assert!(tokenize(" .. ").is_empty());
}

#[test]
fn tokenize_is_deterministic() {
    let text = "Cảnh báo lừa đảo qua điện thoại, 2024!";
    assert_eq!(tokenize(text), tokenize(text));
}
