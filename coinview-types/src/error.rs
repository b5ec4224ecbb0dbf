use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the coinview workspace.
///
/// Fetchers surface the specific kind; the query cache stores the value
/// as-is and hands clones to every subscriber of the failing key.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoinviewError {
    /// Transport failure, timeout or unexpected HTTP status.
    #[error("network error: {msg}")]
    Network {
        /// Human-readable error message.
        msg: String,
    },

    /// The remote call completed but the payload was not well-formed.
    #[error("decode error: {msg}")]
    Decode {
        /// Human-readable error message.
        msg: String,
    },

    /// The identifier has no corresponding resource.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "coin btc-bitcoin".
        what: String,
    },

    /// The fetcher does not implement the requested resource kind.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// Capability label, e.g. "metadata" or "ticker".
        capability: String,
    },

    /// Invalid input argument or API misuse.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl CoinviewError {
    /// Helper: build a `Network` error.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network { msg: msg.into() }
    }

    /// Helper: build a `Decode` error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode { msg: msg.into() }
    }

    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Returns true if a later attempt may succeed without any change of input.
    ///
    /// Transport failures are transient; decode failures and missing resources
    /// are not expected to change on the next poll.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}
