use newsvet_core::traits::Embedder;
use newsvet_embed::{get_default_embedder, HashEmbedder, DEFAULT_DIM};

#[test]
fn embedding_shape_and_unit_norm() {
    let embedder = get_default_embedder(DEFAULT_DIM);
    let embs = embedder
        .embed_batch(&["giả danh công an gọi điện".to_string()])
        .expect("embed_batch");
    let v = &embs[0];

    assert_eq!(v.len(), DEFAULT_DIM);
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");
}

#[test]
fn same_text_embeds_identically() {
    let embedder = HashEmbedder::new(256);
    let texts = vec!["hello world".to_string(), "hello world".to_string()];
    let embs = embedder.embed_batch(&texts).expect("embed_batch");
    for (a, b) in embs[0].iter().zip(embs[1].iter()) {
        assert!((a - b).abs() <= 1e-6);
    }
}

#[test]
fn empty_text_embeds_to_zero_vector() {
    let embedder = HashEmbedder::new(64);
    let embs = embedder
        .embed_batch(&["".to_string(), "?!..".to_string()])
        .expect("embed_batch");
    for v in &embs {
        assert!(v.iter().all(|x| *x == 0.0));
    }
}

#[test]
fn overlapping_texts_have_higher_inner_product_than_disjoint() {
    let embedder = HashEmbedder::new(DEFAULT_DIM);
    let embs = embedder
        .embed_batch(&[
            "công an gọi điện yêu cầu chuyển tiền".to_string(),
            "giả danh công an gọi điện".to_string(),
            "hôm nay trời đẹp".to_string(),
        ])
        .expect("embed_batch");
    let dot = |a: &[f32], b: &[f32]| -> f32 { a.iter().zip(b).map(|(x, y)| x * y).sum() };
    let related = dot(&embs[0], &embs[1]);
    let unrelated = dot(&embs[0], &embs[2]);
    assert!(related > 0.4, "shared tokens dominate (got {related})");
    assert!(unrelated < 0.4, "no shared tokens (got {unrelated})");
}
