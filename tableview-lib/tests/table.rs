//! A controller and cache driven together over the in-process mock backend.

use tableview_lib::RemoteTable;
use tableview_lib::mock::MockConfig;
use tableview_lib::mock::MockVehicleService;
use tableview_lib::query::MemoryStore;
use tableview_lib::query::UrlStore;
use tableview_lib::transport::MockTransport;
use tableview_lib::view::ColumnSort;
use tableview_lib::view::FetchKey;
use tableview_lib::view::TableConfig;
use url::Url;

fn transport() -> MockTransport {
    MockTransport::new(MockVehicleService::new(MockConfig::default()))
}

#[tokio::test]
async fn test_sort_transition_keeps_previous_rows_visible() {
    let mut table = RemoteTable::new(MemoryStore::new(), transport(), TableConfig::default());

    let result = table.view();
    assert!(result.is_loading());
    assert!(result.data().is_none());

    table.settle().await;
    let unsorted = table.view();
    assert!(unsorted.is_fresh());
    assert_eq!(unsorted.rows().len(), 20);

    assert!(table.controller_mut().toggle_sort("name"));
    let result = table.view();
    assert_eq!(result.key(), &FetchKey::sorted(0, "name", Default::default()));
    assert!(result.is_loading());
    assert!(result.is_stale());
    assert_eq!(result.data_key(), Some(&FetchKey::page(0)));
    assert_eq!(result.rows(), unsorted.rows());

    table.settle().await;
    let sorted = table.view();
    assert!(sorted.is_fresh());
    let names: Vec<_> = sorted.rows().iter().map(|v| v.name.to_lowercase()).collect();
    let mut expected = names.clone();
    expected.sort();
    assert_eq!(names, expected);
}

#[tokio::test]
async fn test_ignored_page_transition_keeps_key() {
    let mut table = RemoteTable::new(MemoryStore::new(), transport(), TableConfig::default());
    table.view();
    table.settle().await;

    assert!(!table.controller_mut().go_to_page(-1));
    assert!(!table.controller_mut().go_to_page(10));

    let result = table.view();
    assert!(result.is_fresh());
    assert_eq!(result.key(), &FetchKey::page(0));
    assert_eq!(table.cache().len(), 1);
}

#[tokio::test]
async fn test_url_round_trip_reproduces_view() {
    let url = Url::parse("http://localhost:5173/garage?tab=cars").unwrap();
    let mut table = RemoteTable::new(UrlStore::new(url), transport(), TableConfig::default());

    table.controller_mut().go_to_page(4);
    table.controller_mut().toggle_sort("fuel");
    table.controller_mut().toggle_sort("fuel");

    let shared = table.controller().store().url().clone();
    assert_eq!(
        shared.as_str(),
        "http://localhost:5173/garage?tab=cars&page=4&sort=fuel&direction=desc"
    );

    let reopened = RemoteTable::new(UrlStore::new(shared), transport(), TableConfig::default());
    assert_eq!(reopened.state(), table.state());
    assert_eq!(reopened.state().sort, Some(ColumnSort::desc("fuel")));
}

#[tokio::test]
async fn test_page_past_dataset_is_empty_not_error() {
    let mut table = RemoteTable::new(
        MemoryStore::parse("page=12"),
        transport(),
        TableConfig::default().with_page_count(20),
    );

    table.view();
    table.settle().await;
    let result = table.view();
    assert!(result.is_fresh());
    assert!(!result.is_error());
    assert!(result.rows().is_empty());
}
