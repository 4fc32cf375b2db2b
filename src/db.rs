//! # Database connection module
//!
//! This module owns the one MongoDB connection the process shares.
//!
//! [`ConnectionHandle::initialize`] issues the connect request on a background task and
//! returns immediately, usually while the handle is still `connecting`. A failed attempt
//! is logged once and recorded in the handle's state; it never reaches the caller and
//! never stops the process. There is no retry.
//!
//! ## Usage
//!
//! The handle is built once at startup (see [`global::init`]) and handed to Rocket as
//! managed state, so request handlers can take it as a `&State<ConnectionHandle>` guard.
//!
//! ```rust,no_run
//! use cinema_db::{config::ConnectionConfig, db::ConnectionHandle};
//!
//! # async fn run() {
//! let handle = ConnectionHandle::initialize(ConnectionConfig::default());
//! let state = handle.wait_settled().await;
//! println!("database is {state}");
//! # }
//! ```

pub mod global;

use std::sync::{Arc, OnceLock};

use mongodb::{Client, Database, bson::doc, options::ClientOptions};
use tokio::sync::watch;

use crate::config::{ConnectionConfig, redact_uri};
use crate::errors::DbError;
use crate::state::ConnectionState;

struct Inner {
    endpoint: String,
    state: watch::Sender<ConnectionState>,
    client: OnceLock<Client>,
}

/// Shared handle to the process's database connection.
///
/// Clones point at the same connection. Holders can observe the connection state
/// but cannot close it or change it.
#[derive(Clone)]
pub struct ConnectionHandle {
    inner: Arc<Inner>,
}

impl ConnectionHandle {
    /// Starts connecting to `config`'s endpoint without waiting for the outcome.
    ///
    /// Must be called from within a tokio runtime for the attempt to run. Outside one,
    /// the handle comes back already `errored`.
    pub fn initialize(config: ConnectionConfig) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        let handle = Self {
            inner: Arc::new(Inner {
                endpoint: config.uri().to_string(),
                state,
                client: OnceLock::new(),
            }),
        };

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let _ = handle.advance(ConnectionState::Connecting);
                let task = handle.clone();
                runtime.spawn(async move { task.connect(config).await });
            }
            Err(e) => handle.fail(format!("no async runtime to connect on: {e}")),
        }

        handle
    }

    async fn connect(self, config: ConnectionConfig) {
        match self.try_connect(&config).await {
            Ok(()) => {
                if self.advance(ConnectionState::connected()).is_ok() {
                    tracing::debug!(
                        target: "cinema_db",
                        endpoint = %self.redacted_endpoint(),
                        "database connected"
                    );
                }
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    async fn try_connect(&self, config: &ConnectionConfig) -> Result<(), DbError> {
        let mut options = ClientOptions::parse(config.uri()).await?;

        if let Some(timeout) = config.options.server_selection_timeout {
            options.server_selection_timeout = Some(timeout);
            options.connect_timeout = Some(timeout);
        }
        if let Some(name) = &config.options.app_name {
            options.app_name = Some(name.clone());
        }

        let client = Client::with_options(options)?;
        let _ = self.inner.client.set(client.clone());

        let database = client
            .default_database()
            .unwrap_or_else(|| client.database("admin"));
        database.run_command(doc! { "ping": 1 }).await?;

        Ok(())
    }

    fn fail(&self, reason: String) {
        tracing::error!(
            target: "cinema_db",
            endpoint = %self.redacted_endpoint(),
            reason = %reason,
            "Connection error: {reason}"
        );
        let _ = self.advance(ConnectionState::errored(reason));
    }

    fn advance(&self, next: ConnectionState) -> Result<(), DbError> {
        let mut outcome = Ok(());
        self.inner.state.send_if_modified(|state| {
            outcome = state.transition(next);
            outcome.is_ok()
        });
        outcome
    }

    pub fn state(&self) -> ConnectionState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.inner.state.subscribe()
    }

    /// Resolves once the initial attempt has either connected or failed.
    pub async fn wait_settled(&self) -> ConnectionState {
        let mut rx = self.subscribe();
        match rx.wait_for(ConnectionState::is_settled).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    /// The driver client, available as soon as the endpoint has been parsed.
    ///
    /// The driver queues operations issued while the connection is still coming up.
    pub fn client(&self) -> Result<Client, DbError> {
        self.inner
            .client
            .get()
            .cloned()
            .ok_or_else(|| DbError::NotReady(self.state()))
    }

    /// The database named in the endpoint's path.
    pub fn database(&self) -> Result<Database, DbError> {
        self.client()?
            .default_database()
            .ok_or(DbError::NoDefaultDatabase)
    }

    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    pub fn redacted_endpoint(&self) -> String {
        redact_uri(&self.inner.endpoint)
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl std::fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("endpoint", &self.redacted_endpoint())
            .field("state", &self.state())
            .finish()
    }
}
