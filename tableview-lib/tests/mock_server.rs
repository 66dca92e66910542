//! The HTTP transport against the hyper mock server on an ephemeral port.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use tableview_lib::RemoteTable;
use tableview_lib::error::FetchError;
use tableview_lib::mock::MockConfig;
use tableview_lib::mock::MockServer;
use tableview_lib::mock::MockVehicleService;
use tableview_lib::mock::Vehicle;
use tableview_lib::mock::VehicleQuery;
use tableview_lib::query::MemoryStore;
use tableview_lib::transport::HttpTransport;
use tableview_lib::transport::Transport;
use tableview_lib::view::Direction;
use tableview_lib::view::FetchKey;
use tableview_lib::view::TableConfig;

async fn start() -> (String, CancellationToken) {
    let service = MockVehicleService::new(MockConfig::default());
    let server = MockServer::bind("127.0.0.1:0".parse().unwrap(), service)
        .await
        .unwrap();
    let base_url = server.base_url().unwrap();

    let cancel = CancellationToken::new();
    tokio::spawn(server.serve(cancel.clone()));
    (base_url, cancel)
}

fn transport(base_url: &str) -> HttpTransport<Vehicle> {
    HttpTransport::builder()
        .base_url(base_url)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_http_pages_match_service() {
    let (base_url, cancel) = start().await;
    let transport = transport(&base_url);
    let service = MockVehicleService::new(MockConfig::default());

    for key in [
        FetchKey::page(0),
        FetchKey::page(9),
        FetchKey::sorted(3, "type", Direction::Desc),
    ] {
        let rows = transport.fetch(&key).await.unwrap();
        assert_eq!(rows, service.page(&VehicleQuery::from(&key)), "{}", key);
    }

    assert!(transport.fetch(&FetchKey::page(10)).await.unwrap().is_empty());
    cancel.cancel();
}

#[tokio::test]
async fn test_name_desc_across_all_pages() {
    let (base_url, cancel) = start().await;
    let transport = transport(&base_url);

    let mut names = Vec::new();
    for page in 0..10 {
        let key = FetchKey::sorted(page, "name", Direction::Desc);
        names.extend(transport.fetch(&key).await.unwrap().into_iter().map(|v| v.name));
    }

    assert_eq!(names.len(), 200);
    for pair in names.windows(2) {
        assert!(pair[0].to_lowercase() >= pair[1].to_lowercase());
    }
    cancel.cancel();
}

#[tokio::test]
async fn test_unknown_resource_is_http_error() {
    let (base_url, cancel) = start().await;
    let transport: HttpTransport<Vehicle> = HttpTransport::builder()
        .base_url(&base_url)
        .resource("trucks")
        .build()
        .unwrap();

    let error = transport.fetch(&FetchKey::page(0)).await.unwrap_err();
    assert!(matches!(error, FetchError::Http { status: 404, .. }));
    assert!(!error.is_retryable());
    cancel.cancel();
}

#[tokio::test]
async fn test_table_over_http() {
    let (base_url, cancel) = start().await;
    let mut table = RemoteTable::new(
        MemoryStore::parse("page=2"),
        transport(&base_url),
        TableConfig::default(),
    );

    table.view();
    table.settle().await;
    let first = table.view();
    assert!(first.is_fresh());
    assert_eq!(first.rows().len(), 20);

    table.controller_mut().next_page();
    let pending = table.view();
    assert!(pending.is_stale());
    assert_eq!(pending.rows(), first.rows());

    table.settle().await;
    let second = table.view();
    assert_eq!(second.key(), &FetchKey::page(3));
    assert!(second.is_fresh());
    assert_ne!(second.rows(), first.rows());
    cancel.cancel();
}
