use blockkit::attributes::{AttributeBag, AttributePatch, AttributeStore, BlockKind};
use blockkit::error::BlockError;
use serde_json::{json, Value};
use tokio::sync::mpsc;

fn bag(value: Value) -> AttributeBag {
    value.as_object().unwrap().clone()
}

fn recv(rx: &mut mpsc::UnboundedReceiver<AttributePatch>) -> AttributePatch {
    rx.try_recv().expect("expected a patch")
}

#[test]
fn test_update_sends_single_key_patch() {
    let (store, mut rx) = AttributeStore::new(BlockKind::PostGrid);

    store.update("postsPerPage", json!(9));

    let patch = recv(&mut rx);
    assert_eq!(patch.values.len(), 1);
    assert_eq!(patch.values.get("postsPerPage"), Some(&json!(9)));
}

#[test]
fn test_update_nested_preserves_siblings() {
    let (store, mut rx) = AttributeStore::new(BlockKind::PostGrid);
    let bag = bag(json!({
        "typography": { "size": 14, "weight": "bold" }
    }));

    store.update_nested(&bag, "typography", "size", json!(18));

    let patch = recv(&mut rx);
    assert_eq!(
        patch.values.get("typography"),
        Some(&json!({ "size": 18, "weight": "bold" }))
    );
    // Caller's snapshot is untouched
    assert_eq!(bag.get("typography"), Some(&json!({ "size": 14, "weight": "bold" })));
}

#[test]
fn test_update_nested_creates_missing_parent() {
    let (store, mut rx) = AttributeStore::new(BlockKind::PostGrid);
    let bag = AttributeBag::new();

    store.update_nested(&bag, "colors", "accent", json!("#ff6600"));

    let patch = recv(&mut rx);
    assert_eq!(patch.values.get("colors"), Some(&json!({ "accent": "#ff6600" })));
}

#[test]
fn test_update_array_item_copies_on_write() {
    let (store, mut rx) = AttributeStore::new(BlockKind::Faq);
    let bag = bag(json!({
        "faqItems": [
            { "question": "Q1", "answer": "A1" },
            { "question": "Q2", "answer": "A2" },
        ]
    }));

    store.update_array_item(&bag, "faqItems", 1, "answer", json!("edited")).unwrap();

    let patch = recv(&mut rx);
    assert_eq!(
        patch.values.get("faqItems"),
        Some(&json!([
            { "question": "Q1", "answer": "A1" },
            { "question": "Q2", "answer": "edited" },
        ]))
    );
    // Original bag untouched
    assert_eq!(bag["faqItems"][1]["answer"], json!("A2"));
}

#[test]
fn test_update_array_item_out_of_range_is_reported_no_op() {
    let (store, mut rx) = AttributeStore::new(BlockKind::Faq);
    let bag = bag(json!({ "faqItems": [{ "question": "Q1" }] }));

    let result = store.update_array_item(&bag, "faqItems", 5, "question", json!("x"));

    assert!(matches!(result, Err(BlockError::Index { index: 5, len: 1 })));
    // No patch reaches the host
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_add_array_item_creates_array_when_absent() {
    let (store, mut rx) = AttributeStore::new(BlockKind::Faq);
    let bag = AttributeBag::new();

    store.add_array_item(&bag, "faqItems", json!({ "question": "new" }));

    let patch = recv(&mut rx);
    assert_eq!(patch.values.get("faqItems"), Some(&json!([{ "question": "new" }])));
}

#[test]
fn test_add_array_item_appends() {
    let (store, mut rx) = AttributeStore::new(BlockKind::Faq);
    let bag = bag(json!({ "faqItems": [{ "question": "Q1" }] }));

    store.add_array_item(&bag, "faqItems", json!({ "question": "Q2" }));

    let patch = recv(&mut rx);
    assert_eq!(
        patch.values.get("faqItems"),
        Some(&json!([{ "question": "Q1" }, { "question": "Q2" }]))
    );
}

#[test]
fn test_remove_array_item_shifts_later_indices() {
    let (store, mut rx) = AttributeStore::new(BlockKind::Faq);
    let bag = bag(json!({ "faqItems": ["a", "b", "c"] }));

    store.remove_array_item(&bag, "faqItems", 1).unwrap();

    let patch = recv(&mut rx);
    assert_eq!(patch.values.get("faqItems"), Some(&json!(["a", "c"])));
}

#[test]
fn test_remove_array_item_out_of_range_is_reported_no_op() {
    let (store, mut rx) = AttributeStore::new(BlockKind::Faq);
    let bag = bag(json!({ "faqItems": ["a"] }));

    let result = store.remove_array_item(&bag, "faqItems", 1);

    assert!(matches!(result, Err(BlockError::Index { index: 1, len: 1 })));
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_for_kind_requires_kind_attributes() {
    let empty = AttributeBag::new();
    let result = AttributeStore::for_kind(BlockKind::ProductCarousel, &empty);
    assert!(matches!(result, Err(BlockError::Configuration(_))));

    let complete = bag(json!({ "postsPerPage": 4, "categories": [2] }));
    assert!(AttributeStore::for_kind(BlockKind::ProductCarousel, &complete).is_ok());
}

#[test]
fn test_for_kind_post_slider_requires_page_size() {
    let empty = AttributeBag::new();
    let result = AttributeStore::for_kind(BlockKind::PostSlider, &empty);
    assert!(matches!(result, Err(BlockError::Configuration(_))));

    let complete = bag(json!({ "postsPerPage": 4 }));
    assert!(AttributeStore::for_kind(BlockKind::PostSlider, &complete).is_ok());
}
