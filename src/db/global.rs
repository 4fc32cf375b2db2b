//! The process-wide connection handle.
//!
//! [`init`] is meant to run once during startup. Later calls do nothing and hand back
//! the handle created by the first one.

use std::sync::OnceLock;

use super::ConnectionHandle;
use crate::config::ConnectionConfig;

static HANDLE: OnceLock<ConnectionHandle> = OnceLock::new();

pub fn init(config: ConnectionConfig) -> &'static ConnectionHandle {
    let mut created = false;
    let handle = HANDLE.get_or_init(|| {
        created = true;
        ConnectionHandle::initialize(config)
    });

    if !created {
        tracing::debug!(
            target: "cinema_db",
            endpoint = %handle.redacted_endpoint(),
            "database handle already initialized, ignoring new configuration"
        );
    }

    handle
}

/// Looks up the process handle. `None` until [`init`] has run.
pub fn handle() -> Option<&'static ConnectionHandle> {
    HANDLE.get()
}
