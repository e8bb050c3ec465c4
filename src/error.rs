use std::time::Duration;

use thiserror::Error;

/// Failure of a road snapping call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapError {
    #[error("SNAP_TIMEOUT: no response within {0:?}")]
    Timeout(Duration),

    #[error("SNAP_NETWORK_ERROR: {0}")]
    Network(String),

    #[error("SNAP_HTTP_ERROR({0})")]
    Http(u16),

    #[error("SNAP_INVALID_RESPONSE: {0}")]
    InvalidResponse(String),
}

impl SnapError {
    /// Stable code for logs and callers that branch on the failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            SnapError::Timeout(_) => "SNAP_TIMEOUT",
            SnapError::Network(_) => "SNAP_NETWORK_ERROR",
            SnapError::Http(_) => "SNAP_HTTP_ERROR",
            SnapError::InvalidResponse(_) => "SNAP_INVALID_RESPONSE",
        }
    }

    /// Message shown when an explicit save fails.
    pub fn user_message(&self) -> String {
        match self {
            SnapError::Timeout(_) => {
                "The road alignment service took too long to answer. Try again.".to_string()
            }
            SnapError::Network(_) => {
                "Could not reach the road alignment service. Check your connection and try again."
                    .to_string()
            }
            SnapError::Http(status) => format!(
                "The road alignment service rejected the trace (HTTP {}). Try again.",
                status
            ),
            SnapError::InvalidResponse(_) => {
                "Could not align the trace to the road. Try again.".to_string()
            }
        }
    }

    /// Map a transport error, keeping timeouts distinct from other failures.
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            SnapError::Timeout(timeout)
        } else if err.is_decode() {
            SnapError::InvalidResponse(err.to_string())
        } else if let Some(status) = err.status() {
            SnapError::Http(status.as_u16())
        } else {
            SnapError::Network(err.to_string())
        }
    }
}

/// Failure talking to the route points API.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("authentication required")]
    Unauthorized,

    #[error("route {route_id}: point_order {found} where {expected} was expected")]
    NonContiguousOrder {
        route_id: String,
        expected: usize,
        found: i64,
    },
}

impl StoreError {
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            StoreError::Timeout(timeout)
        } else if err.is_decode() {
            StoreError::InvalidResponse(err.to_string())
        } else {
            StoreError::Network(err.to_string())
        }
    }
}

/// Failure of a save (commit) of the draft trace.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("at least 2 points are needed to define a road, got {0}")]
    TooFewPoints(usize),

    #[error(transparent)]
    Snap(#[from] SnapError),

    #[error("snapped trace has {got} points, expected at least {expected_at_least}")]
    Truncated { expected_at_least: usize, got: usize },

    #[error("saving route points failed: {0}")]
    Store(#[from] StoreError),
}

impl CommitError {
    pub fn user_message(&self) -> String {
        match self {
            CommitError::Snap(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}
