use std::time::Duration;

use cinema_db::config::ConnectionConfig;
use cinema_db::db::{ConnectionHandle, global};

// Kept as a single test: the handle is process-wide and tests in one binary share it.
#[tokio::test]
async fn test_global_handle_is_a_singleton() {
    assert!(global::handle().is_none());

    let first = global::init(
        ConnectionConfig::new("mongodb://127.0.0.1:1/cinema")
            .unwrap()
            .with_server_selection_timeout(Duration::from_millis(200)),
    );
    let second = global::init(ConnectionConfig::new("mongodb://elsewhere:27017/other").unwrap());

    assert!(std::ptr::eq(first, second));
    assert_eq!(second.endpoint(), "mongodb://127.0.0.1:1/cinema");

    let looked_up = global::handle().unwrap();
    assert!(std::ptr::eq(first, looked_up));
    assert!(ConnectionHandle::ptr_eq(first, &looked_up.clone()));
}
