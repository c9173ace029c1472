//! Category-based recommendations over hand-built catalogs.

use shopfront_core::ProductId;
use shopfront_integration_tests::{catalog_of, product};
use shopfront_storefront::catalog::{InMemoryCatalog, product_detail};
use shopfront_storefront::notify::RecordingNotifier;
use shopfront_storefront::recommend::{RECOMMENDATION_LIMIT, recommend};
use shopfront_storefront::session::{SessionOptions, Storefront};
use shopfront_storefront::store::MemoryStore;

fn ids(raw: &[&str]) -> Vec<ProductId> {
    raw.iter().map(|id| ProductId::from(*id)).collect()
}

fn id_strs(products: &[shopfront_core::Product]) -> Vec<&str> {
    products.iter().map(|p| p.id.as_str()).collect()
}

/// Three categories with six, two and five products.
fn mixed_catalog() -> InMemoryCatalog {
    let mut products = Vec::new();
    for n in 1..=6 {
        products.push(product(&format!("b{n}"), "books", 1000));
    }
    for n in 1..=2 {
        products.push(product(&format!("g{n}"), "games", 2000));
    }
    for n in 1..=5 {
        products.push(product(&format!("t{n}"), "toys", 1500));
    }
    InMemoryCatalog::new(products)
}

#[tokio::test]
async fn test_each_category_contributes_at_most_four() {
    let catalog = mixed_catalog();
    let picks = recommend(&catalog, &ids(&["g1", "b3"]), &[], None)
        .await
        .expect("recommend");

    assert_eq!(id_strs(&picks), vec!["g1", "g2", "b1", "b2", "b3", "b4"]);
}

#[tokio::test]
async fn test_history_categories_follow_cart_categories() {
    let catalog = mixed_catalog();
    let picks = recommend(&catalog, &ids(&["t2"]), &ids(&["b1", "t5"]), None)
        .await
        .expect("recommend");

    assert_eq!(picks.len(), RECOMMENDATION_LIMIT);
    assert_eq!(
        id_strs(&picks),
        vec!["t1", "t2", "t3", "t4", "b1", "b2", "b3", "b4"]
    );
}

#[tokio::test]
async fn test_excluded_product_never_recommended() {
    let catalog = mixed_catalog();
    let exclude = ProductId::from("b2");
    let picks = recommend(&catalog, &ids(&["b2"]), &[], Some(&exclude))
        .await
        .expect("recommend");

    assert_eq!(id_strs(&picks), vec!["b1", "b3", "b4", "b5"]);
}

#[tokio::test]
async fn test_small_catalog_fallback_returns_everything() {
    let catalog = catalog_of(5);
    let picks = recommend(&catalog, &[], &[], None).await.expect("recommend");
    assert_eq!(picks.len(), 5);
}

#[tokio::test]
async fn test_detail_view_related_products() {
    let catalog = mixed_catalog();
    let detail = product_detail(&catalog, &ProductId::from("t3"))
        .await
        .expect("product exists");

    assert_eq!(id_strs(&detail.related), vec!["t1", "t2", "t4", "t5"]);
}

#[tokio::test]
async fn test_session_recommends_from_cart_then_purchases() {
    let store = MemoryStore::new();
    let mut session = Storefront::open(
        store,
        mixed_catalog(),
        RecordingNotifier::new(),
        SessionOptions::default(),
    )
    .await
    .expect("open");

    let fresh = session.recommendations(None).await.expect("recommend");
    assert_eq!(id_strs(&fresh), vec!["b1", "b2", "b3", "b4", "b5", "b6", "g1", "g2"]);

    session.cart_mut().add(ProductId::from("g2"), 1).await;
    session.checkout().await.expect("purchase");
    session.cart_mut().add(ProductId::from("t1"), 1).await;

    let picks = session.recommendations(None).await.expect("recommend");
    assert_eq!(id_strs(&picks), vec!["t1", "t2", "t3", "t4", "g1", "g2"]);
}
