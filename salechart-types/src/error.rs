use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the salechart workspace.
///
/// This wraps capability mismatches, argument validation errors, malformed
/// backend data and connector-tagged failures.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChartError {
    /// The requested capability is not implemented by the target connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "status").
        capability: String,
    },

    /// Issues with the returned or expected data (unparsable amounts, bad timestamps).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument or configuration value.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An individual connector returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A connector call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Capability label ("status" or "chart-data").
        capability: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl ChartError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            capability: capability.into(),
        }
    }

    /// Helper: build a `Data` error from any displayable message.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Tag an error with the connector that produced it.
    ///
    /// Errors that already carry a connector name (`Connector`, `ProviderTimeout`)
    /// and capability gaps are returned unchanged.
    #[must_use]
    pub fn tagged(self, connector: &str) -> Self {
        match self {
            e @ (Self::Connector { .. } | Self::ProviderTimeout { .. } | Self::Unsupported { .. }) => {
                e
            }
            other => Self::Connector {
                connector: connector.to_string(),
                msg: other.to_string(),
            },
        }
    }
}
