//! MVG feed client error types.

/// Errors from the MVG feed client.
///
/// Two failure families matter to callers: the upstream was unreachable
/// (`Network`), or it answered with something other than the expected
/// message list (`UpstreamStatus`, `UpstreamFormat`). Neither is retried;
/// the cache is left untouched and the error propagates to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MvgError {
    /// Upstream unreachable or the request timed out.
    #[error("network error: {message}")]
    Network { message: String },

    /// Upstream returned a non-2xx status.
    #[error("upstream returned status {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    /// Upstream body could not be decoded as a message list.
    #[error("upstream format error: {message}")]
    UpstreamFormat {
        message: String,
        /// Truncated body excerpt for diagnostics.
        body: Option<String>,
    },
}

impl MvgError {
    /// Stable machine-readable error kind, surfaced in error responses
    /// so callers can distinguish network failure from format failure.
    pub fn kind(&self) -> &'static str {
        match self {
            MvgError::Network { .. } => "network",
            MvgError::UpstreamStatus { .. } | MvgError::UpstreamFormat { .. } => {
                "upstream_format"
            }
        }
    }
}

impl From<reqwest::Error> for MvgError {
    fn from(err: reqwest::Error) -> Self {
        MvgError::Network {
            message: err.to_string(),
        }
    }
}
