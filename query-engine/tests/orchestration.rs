//! End-to-end orchestration behavior under virtual time, driven through
//! the scriptable fake backend.

use catalog_client::{
    ALL_CATEGORY_ID, CatalogBackend, CatalogItem, CategoryEntry, FakeCatalog, FakeFailure,
    ItemPage,
};
use query_engine::{QueryErrorKind, ShuffleMode, profiles, shuffle_in_place};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

fn item(id: &str) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        name: format!("Item {id}"),
        price_cents: 1290,
        image_url: None,
        category_id: None,
        popularity: None,
        created_at: None,
    }
}

fn page(ids: &[&str], page: u32, total_pages: u32) -> ItemPage {
    ItemPage {
        items: ids.iter().map(|id| item(id)).collect(),
        page,
        page_size: ids.len() as u32,
        total_items: (total_pages as u64) * (ids.len() as u64),
        total_pages,
    }
}

fn category(id: &str, name: &str, sort_order: i32, is_principal: bool) -> CategoryEntry {
    CategoryEntry {
        id: id.to_string(),
        name: name.to_string(),
        sort_order,
        is_principal,
    }
}

/// Lets spawned dispatch tasks run without advancing past their timers.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

#[tokio::test(start_paused = true)]
async fn debounce_collapses_a_burst_to_the_last_intent() {
    let fake = FakeCatalog::new();
    fake.push_page(Duration::ZERO, page(&["1", "2"], 1, 1)).await;
    let engine = profiles::search_screen(CatalogBackend::Fake(fake.clone()));

    engine.set_text("a");
    tokio::time::sleep(Duration::from_millis(100)).await;
    engine.set_text("ab");
    tokio::time::sleep(Duration::from_millis(100)).await;
    engine.set_text("abc");
    tokio::time::sleep(Duration::from_millis(900)).await;

    assert_eq!(fake.item_call_count(), 1);
    let queries = fake.seen_queries().await;
    assert_eq!(queries[0].text.as_deref(), Some("abc"));
    assert_eq!(queries[0].page, 1);

    let snap = engine.snapshot();
    assert_eq!(snap.results.items.len(), 2);
    assert!(!snap.loading);
    assert!(snap.error.is_none());
}

#[tokio::test(start_paused = true)]
async fn a_stale_response_never_clobbers_newer_results() {
    let fake = FakeCatalog::new();
    // First dispatch answers slowly, the superseding one quickly.
    fake.push_page(Duration::from_millis(1500), page(&["old-1", "old-2"], 1, 1))
        .await;
    fake.push_page(Duration::from_millis(10), page(&["new-1"], 1, 1))
        .await;
    let engine = profiles::search_screen(CatalogBackend::Fake(fake.clone()));

    engine.set_text("first");
    tokio::time::sleep(Duration::from_millis(850)).await;
    engine.set_text("second");
    tokio::time::sleep(Duration::from_millis(850)).await;
    // Let the superseded response arrive and be discarded.
    tokio::time::sleep(Duration::from_millis(1000)).await;

    assert_eq!(fake.item_call_count(), 2);
    let snap = engine.snapshot();
    let ids: Vec<&str> = snap.results.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["new-1"]);
    assert!(!snap.loading);
    assert!(!snap.refreshing);
    assert!(snap.error.is_none());
}

#[tokio::test(start_paused = true)]
async fn a_stale_failure_is_discarded_too() {
    let fake = FakeCatalog::new();
    fake.push_failure(Duration::from_millis(1500), FakeFailure::Timeout)
        .await;
    fake.push_page(Duration::from_millis(10), page(&["kept"], 1, 1))
        .await;
    let engine = profiles::search_screen(CatalogBackend::Fake(fake.clone()));

    engine.set_text("first");
    tokio::time::sleep(Duration::from_millis(850)).await;
    engine.set_text("second");
    tokio::time::sleep(Duration::from_millis(2000)).await;

    let snap = engine.snapshot();
    assert_eq!(snap.results.items.len(), 1);
    assert!(snap.error.is_none());
}

#[tokio::test(start_paused = true)]
async fn load_more_appends_and_rejects_concurrent_requests() {
    let fake = FakeCatalog::new();
    fake.push_page(Duration::ZERO, page(&["1", "2"], 1, 3)).await;
    fake.push_page(Duration::from_millis(50), page(&["3", "4"], 2, 3))
        .await;
    let engine = profiles::search_screen(CatalogBackend::Fake(fake.clone()));

    engine.load();
    settle().await;
    assert!(engine.snapshot().results.has_more);

    engine.load_more();
    settle().await;
    assert!(engine.snapshot().loading_more);
    // Already loading more: rejected at the call site, never dispatched.
    engine.load_more();
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(fake.item_call_count(), 2);
    let queries = fake.seen_queries().await;
    assert_eq!(queries[1].page, 2);

    let snap = engine.snapshot();
    let ids: Vec<&str> = snap.results.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3", "4"]);
    assert_eq!(snap.results.page, 2);
    assert!(snap.results.has_more);
    assert!(!snap.loading_more);
}

#[tokio::test(start_paused = true)]
async fn load_more_on_the_last_page_marks_exhaustion() {
    let fake = FakeCatalog::new();
    fake.push_page(Duration::ZERO, page(&["1"], 1, 2)).await;
    fake.push_page(Duration::ZERO, page(&["2"], 2, 2)).await;
    let engine = profiles::search_screen(CatalogBackend::Fake(fake.clone()));

    engine.load();
    settle().await;
    engine.load_more();
    settle().await;

    let snap = engine.snapshot();
    assert_eq!(snap.results.items.len(), 2);
    assert!(!snap.results.has_more);

    // Exhausted: a further load-more never reaches the backend.
    engine.load_more();
    settle().await;
    assert_eq!(fake.item_call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn a_failed_append_preserves_the_visible_list() {
    let fake = FakeCatalog::new();
    let first: Vec<String> = (1..=8).map(|i| i.to_string()).collect();
    let ids: Vec<&str> = first.iter().map(String::as_str).collect();
    fake.push_page(Duration::ZERO, page(&ids, 1, 3)).await;
    fake.push_failure(Duration::ZERO, FakeFailure::Timeout).await;
    let engine = profiles::search_screen(CatalogBackend::Fake(fake.clone()));

    engine.load();
    settle().await;
    assert_eq!(engine.snapshot().results.items.len(), 8);

    engine.load_more();
    settle().await;

    let snap = engine.snapshot();
    assert_eq!(snap.results.items.len(), 8);
    assert_eq!(snap.results.page, 1);
    assert!(!snap.loading_more);
    let error = snap.error.expect("classified error surfaced");
    assert_eq!(error.kind, QueryErrorKind::Transport);
}

#[tokio::test(start_paused = true)]
async fn a_failed_fresh_query_clears_and_classifies() {
    let fake = FakeCatalog::new();
    fake.push_page(Duration::ZERO, page(&["1", "2"], 1, 1)).await;
    fake.push_failure(Duration::ZERO, FakeFailure::RateLimited)
        .await;
    let engine = profiles::search_screen(CatalogBackend::Fake(fake.clone()));

    engine.load();
    settle().await;
    assert_eq!(engine.snapshot().results.items.len(), 2);

    engine.refresh();
    settle().await;

    assert_eq!(engine.current_generation(), 2);
    let snap = engine.snapshot();
    assert!(snap.results.items.is_empty());
    assert!(!snap.refreshing);
    let error = snap.error.expect("classified error surfaced");
    assert_eq!(error.kind, QueryErrorKind::RateLimited);
}

#[tokio::test(start_paused = true)]
async fn an_empty_text_intent_still_dispatches() {
    let fake = FakeCatalog::new();
    fake.push_page(Duration::ZERO, page(&["1"], 1, 1)).await;
    let engine = profiles::search_screen(CatalogBackend::Fake(fake.clone()));

    engine.set_text("");
    tokio::time::sleep(Duration::from_millis(900)).await;

    assert_eq!(fake.item_call_count(), 1);
    let queries = fake.seen_queries().await;
    assert!(queries[0].text.is_none());
    assert!(queries[0].category_id.is_none());
}

#[tokio::test]
async fn categories_are_fetched_once_and_ordered() {
    let fake = FakeCatalog::new();
    fake.set_categories(vec![
        category("1", "B", 2, true),
        category("2", "A", 1, true),
        category("3", "Z", 5, false),
    ])
    .await;
    let engine = profiles::search_screen(CatalogBackend::Fake(fake.clone()));

    let display = engine.categories().await;
    let names: Vec<&str> = display.entries.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "Z", "All"]);
    assert!(!display.degraded);

    let again = engine.categories().await;
    assert_eq!(again, display);
    assert_eq!(fake.category_call_count(), 1);
}

#[tokio::test]
async fn the_home_feed_puts_all_first() {
    let fake = FakeCatalog::new();
    fake.set_categories(vec![category("1", "A", 1, true)]).await;
    let engine = profiles::home_feed(CatalogBackend::Fake(fake.clone()), ShuffleMode::Off);

    let display = engine.categories().await;
    assert_eq!(display.entries[0].id, ALL_CATEGORY_ID);
}

#[tokio::test]
async fn an_empty_category_source_degrades_to_all_only() {
    let fake = FakeCatalog::new();
    let engine = profiles::search_screen(CatalogBackend::Fake(fake.clone()));

    let display = engine.categories().await;
    assert_eq!(display.entries.len(), 1);
    assert_eq!(display.entries[0].id, ALL_CATEGORY_ID);
    assert!(display.degraded);
}

#[tokio::test]
async fn a_failing_category_source_degrades_the_same_way() {
    let fake = FakeCatalog::new();
    fake.fail_categories(FakeFailure::Server(503)).await;
    let engine = profiles::search_screen(CatalogBackend::Fake(fake.clone()));

    let display = engine.categories().await;
    assert_eq!(display.entries.len(), 1);
    assert_eq!(display.entries[0].id, ALL_CATEGORY_ID);
    assert!(display.degraded);
}

#[tokio::test(start_paused = true)]
async fn a_seeded_home_feed_shuffle_is_deterministic() {
    let ids: Vec<String> = (1..=8).map(|i| i.to_string()).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();

    let fake = FakeCatalog::new();
    fake.push_page(Duration::ZERO, page(&id_refs, 1, 1)).await;
    let engine = profiles::home_feed(CatalogBackend::Fake(fake.clone()), ShuffleMode::Seeded(7));

    engine.load();
    settle().await;

    let mut expected = page(&id_refs, 1, 1).items;
    shuffle_in_place(&mut expected, &mut StdRng::seed_from_u64(7));

    assert_eq!(engine.snapshot().results.items, expected);
}
