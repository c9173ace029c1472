//! Cart manager scenarios against shared and durable stores.

use rust_decimal::Decimal;
use shopfront_core::{CartLine, ProductId};
use shopfront_integration_tests::{FailingStore, catalog_of};
use shopfront_storefront::cart::CartManager;
use shopfront_storefront::catalog::InMemoryCatalog;
use shopfront_storefront::notify::{Level, RecordingNotifier};
use shopfront_storefront::store::{FileStore, KeyValueStore, MemoryStore, keys};

fn manager(
    store: MemoryStore,
) -> CartManager<MemoryStore, InMemoryCatalog, RecordingNotifier> {
    CartManager::new(store, catalog_of(60), RecordingNotifier::new())
}

#[tokio::test]
async fn test_adding_twice_merges_into_one_line() {
    let store = MemoryStore::new();
    let mut cart = manager(store.clone());
    let p1 = ProductId::from("1");

    assert!(cart.add(p1.clone(), 2).await);
    assert!(cart.add(p1.clone(), 3).await);

    assert_eq!(cart.lines(), &[CartLine::new(p1, 5)]);
    let stored = store.get(keys::CART).await.expect("get").expect("cart saved");
    let value: serde_json::Value = serde_json::from_str(&stored).expect("json");
    assert_eq!(value, serde_json::json!([{"productId": "1", "quantity": 5}]));
}

#[tokio::test]
async fn test_set_quantity_zero_matches_remove() {
    let removed_store = MemoryStore::new();
    let zeroed_store = MemoryStore::new();
    let mut removed = manager(removed_store.clone());
    let mut zeroed = manager(zeroed_store.clone());
    let p1 = ProductId::from("1");
    let p2 = ProductId::from("2");

    for cart in [&mut removed, &mut zeroed] {
        cart.add(p1.clone(), 3).await;
        cart.add(p2.clone(), 1).await;
    }
    assert!(removed.remove(&p1).await);
    assert!(zeroed.set_quantity(&p1, 0).await);

    assert_eq!(removed.lines(), zeroed.lines());
    assert_eq!(
        removed_store.get(keys::CART).await.expect("get"),
        zeroed_store.get(keys::CART).await.expect("get")
    );
}

#[tokio::test]
async fn test_total_ignores_line_order() {
    let mut forward = manager(MemoryStore::new());
    let mut backward = manager(MemoryStore::new());
    let items = [("1", 1), ("5", 2), ("12", 4)];

    for (id, qty) in items {
        forward.add(ProductId::from(id), qty).await;
    }
    for (id, qty) in items.iter().rev() {
        backward.add(ProductId::from(*id), *qty).await;
    }

    let total = forward.total().await.expect("total");
    assert_eq!(total, backward.total().await.expect("total"));
    // 299.99 + 2 * 89.99 + 4 * 69.99
    assert_eq!(total, Decimal::new(75993, 2));
}

#[tokio::test]
async fn test_unknown_products_contribute_nothing_to_total() {
    let mut cart = manager(MemoryStore::new());
    cart.add(ProductId::from("6"), 1).await;
    cart.add(ProductId::from("discontinued"), 9).await;

    assert_eq!(cart.total().await.expect("total"), Decimal::new(3999, 2));
    assert_eq!(cart.count(), 10);
}

#[tokio::test]
async fn test_failed_write_keeps_cart_and_reports_error() {
    let store = FailingStore::new();
    let notifier = RecordingNotifier::new();
    let mut cart = CartManager::new(store.clone(), catalog_of(12), notifier.clone());
    let p1 = ProductId::from("1");

    assert!(cart.add(p1.clone(), 1).await);
    store.fail_writes(true);

    assert!(!cart.add(p1.clone(), 4).await);
    assert!(!cart.set_quantity(&p1, 9).await);
    assert!(!cart.remove(&p1).await);

    assert_eq!(cart.lines(), &[CartLine::new(p1, 1)]);
    let errors: Vec<_> = notifier
        .received()
        .into_iter()
        .filter(|n| n.level == Level::Error)
        .filter_map(|n| n.description)
        .collect();
    assert_eq!(
        errors,
        vec![
            "Failed to add item to cart",
            "Failed to update quantity",
            "Failed to remove item from cart",
        ]
    );

    store.fail_writes(false);
    assert!(cart.add(ProductId::from("2"), 1).await);
    assert_eq!(cart.count(), 2);
}

#[tokio::test]
async fn test_mutations_start_from_the_persisted_cart() {
    let store = MemoryStore::new();
    let mut tab_a = manager(store.clone());
    let mut tab_b = manager(store.clone());

    tab_a.add(ProductId::from("1"), 1).await;
    // tab_b never loaded, but its write starts from what tab_a persisted
    tab_b.add(ProductId::from("2"), 1).await;

    assert_eq!(tab_b.lines().len(), 2);
    assert_eq!(tab_a.lines().len(), 1);

    tab_a.refresh().await;
    assert_eq!(tab_a.lines(), tab_b.lines());
}

#[tokio::test]
async fn test_cart_survives_restart_with_file_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("store.json");

    {
        let store = FileStore::open(&path).await.expect("open");
        let mut cart = CartManager::new(store, catalog_of(12), RecordingNotifier::new());
        cart.add(ProductId::from("3"), 2).await;
        cart.add(ProductId::from("8"), 1).await;
    }

    let store = FileStore::open(&path).await.expect("reopen");
    let mut cart = CartManager::new(store, catalog_of(12), RecordingNotifier::new());
    cart.load().await.expect("load");

    assert_eq!(cart.count(), 3);
    assert_eq!(cart.lines()[0], CartLine::new(ProductId::from("3"), 2));
}

#[tokio::test]
async fn test_load_repairs_malformed_lines() {
    let store = MemoryStore::with_entries([(
        keys::CART,
        r#"[{"productId":"1","quantity":2},{"productId":"2","quantity":0},{"productId":"1","quantity":1}]"#,
    )]);
    let mut cart = manager(store);
    cart.load().await.expect("load");

    assert_eq!(cart.lines(), &[CartLine::new(ProductId::from("1"), 3)]);
}
