//! Connection lifecycle state machine.
//!
//! ```text
//! disconnected -> connecting -> connected
//!       |              \
//!       +---------------+--> errored
//! ```
//!
//! `connected` and `errored` are terminal. There is no retry edge.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::DbError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConnectionState {
    /// Nothing has been attempted yet.
    #[default]
    Disconnected,

    /// The connect request is in flight.
    Connecting,

    /// The server answered the initial ping.
    Connected { since: DateTime<Utc> },

    /// The initial attempt failed; the handle will never become ready.
    Errored { reason: String, at: DateTime<Utc> },
}

impl ConnectionState {
    pub fn connected() -> Self {
        Self::Connected { since: Utc::now() }
    }

    pub fn errored(reason: impl Into<String>) -> Self {
        Self::Errored {
            reason: reason.into(),
            at: Utc::now(),
        }
    }

    pub fn can_transition_to(&self, next: &ConnectionState) -> bool {
        use ConnectionState::*;

        matches!(
            (self, next),
            (Disconnected, Connecting)
                | (Disconnected, Errored { .. })
                | (Connecting, Connected { .. })
                | (Connecting, Errored { .. })
        )
    }

    pub fn transition(&mut self, next: ConnectionState) -> Result<(), DbError> {
        if !self.can_transition_to(&next) {
            return Err(DbError::InvalidTransition {
                from: self.as_str(),
                to: next.as_str(),
            });
        }
        *self = next;
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }

    /// Whether the initial attempt has finished, one way or the other.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Connected { .. } | Self::Errored { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected { .. } => "connected",
            Self::Errored { .. } => "errored",
        }
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Errored { reason, .. } => write!(f, "errored: {reason}"),
            other => f.write_str(other.as_str()),
        }
    }
}
