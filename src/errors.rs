use thiserror::Error;

use crate::state::ConnectionState;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Database URI must not be empty")]
    EmptyUri,
    #[error("Invalid server selection timeout: {value:?}")]
    InvalidTimeout { value: String },
}

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database connection is not ready (state: {0})")]
    NotReady(ConnectionState),
    #[error("Database URI does not name a database")]
    NoDefaultDatabase,
    #[error("Invalid connection state transition from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
    #[error("Driver error: {0}")]
    Driver(#[from] mongodb::error::Error),
}
