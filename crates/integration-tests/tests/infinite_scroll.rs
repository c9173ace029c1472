//! Infinite-scroll paging against catalogs of various sizes.

use std::collections::HashSet;

use shopfront_integration_tests::{FlakyCatalog, catalog_of};
use shopfront_storefront::pagination::{InfiniteScroll, ScrollState};

async fn scroll_to_end(catalog: &FlakyCatalog, page_size: u32) -> InfiniteScroll {
    let mut scroll = InfiniteScroll::new(page_size);
    while scroll.is_observing() {
        assert!(scroll.on_sentinel_visible(catalog).await);
    }
    scroll
}

#[tokio::test]
async fn test_thirty_products_in_pages_of_twelve() {
    let catalog = FlakyCatalog::new(catalog_of(30));
    let scroll = scroll_to_end(&catalog, 12).await;

    assert_eq!(scroll.fetches_issued(), 3);
    assert_eq!(catalog.list_calls(), 3);
    assert_eq!(scroll.items().len(), 30);
    assert_eq!(scroll.state(), ScrollState::Exhausted { page: 3 });
}

#[tokio::test]
async fn test_fetch_count_is_ceiling_of_total_over_page_size() {
    for total in [1_usize, 7, 8, 9, 24, 60] {
        for page_size in [1_u32, 5, 8, 12, 100] {
            let catalog = FlakyCatalog::new(catalog_of(total));
            let scroll = scroll_to_end(&catalog, page_size).await;

            let expected = total.div_ceil(page_size as usize);
            assert_eq!(
                scroll.fetches_issued() as usize,
                expected,
                "total {total}, page size {page_size}"
            );

            let unique: HashSet<_> = scroll.items().iter().map(|p| &p.id).collect();
            assert_eq!(unique.len(), total, "total {total}, page size {page_size}");
            assert_eq!(scroll.items().len(), total);
        }
    }
}

#[tokio::test]
async fn test_items_keep_catalog_order() {
    let catalog = FlakyCatalog::new(catalog_of(20));
    let scroll = scroll_to_end(&catalog, 8).await;

    let ids: Vec<&str> = scroll.items().iter().map(|p| p.id.as_str()).collect();
    let expected: Vec<String> = (1..=20).map(|n| n.to_string()).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_failed_page_is_retried_on_next_trigger() {
    let catalog = FlakyCatalog::new(catalog_of(20));
    let mut scroll = InfiniteScroll::new(8);

    assert!(scroll.on_sentinel_visible(&catalog).await);
    catalog.fail_next_lists(1);
    assert!(scroll.on_sentinel_visible(&catalog).await);
    assert_eq!(scroll.state(), ScrollState::Loaded { page: 1 });
    assert_eq!(scroll.items().len(), 8);

    assert!(scroll.on_sentinel_visible(&catalog).await);
    assert_eq!(scroll.state(), ScrollState::Loaded { page: 2 });
    assert!(scroll.on_sentinel_visible(&catalog).await);
    assert_eq!(scroll.state(), ScrollState::Exhausted { page: 3 });

    assert_eq!(scroll.items().len(), 20);
    assert_eq!(catalog.list_calls(), 4);
}

#[tokio::test]
async fn test_failed_first_page_leaves_controller_idle() {
    let catalog = FlakyCatalog::new(catalog_of(20));
    catalog.fail_next_lists(1);
    let mut scroll = InfiniteScroll::new(8);

    assert!(scroll.on_sentinel_visible(&catalog).await);
    assert_eq!(scroll.state(), ScrollState::Idle);
    assert!(scroll.items().is_empty());
    assert!(scroll.is_observing());

    assert!(scroll.on_sentinel_visible(&catalog).await);
    assert_eq!(scroll.state(), ScrollState::Loaded { page: 1 });
}

#[tokio::test]
async fn test_triggers_during_a_fetch_are_ignored() {
    let mut scroll = InfiniteScroll::new(8);
    let request = scroll.begin_fetch().expect("first request");

    for _ in 0..5 {
        assert!(scroll.begin_fetch().is_none());
    }
    assert_eq!(scroll.fetches_issued(), 1);
    assert_eq!(request.page, 1);
}
