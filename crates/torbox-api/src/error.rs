use thiserror::Error;

/// Top-level error type for the `torbox-api` crate.
///
/// Every failure a request can hit falls into one of three classes:
/// a local precondition (no API key), the transport (network, malformed
/// body), or the remote service (HTTP status or a `success: false`
/// envelope). `torbox-core` folds these into its `RequestOutcome`.
#[derive(Debug, Error)]
pub enum Error {
    // ── Precondition ────────────────────────────────────────────────
    /// An authenticated endpoint was called without an API key.
    /// Raised before any network I/O.
    #[error("API key required")]
    MissingApiKey,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, abort).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Building the underlying HTTP client failed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Remote ──────────────────────────────────────────────────────
    /// Non-2xx HTTP status. `message` is the server-supplied error when the
    /// body carried one, else a synthesized `"HTTP <code>: <reason>"`.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// 2xx response whose envelope reported `success: false`.
    #[error("{message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// The response body was not the JSON we expected, with the raw body for debugging.
    #[error("Malformed response: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the failure happened before any request was sent.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::MissingApiKey)
    }

    /// Returns `true` for network-level and malformed-body failures.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::InvalidUrl(_) | Self::ClientBuild(_) | Self::Deserialization { .. }
        )
    }

    /// Status code reported by the server, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } | Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_displays_server_message() {
        let err = Error::Http {
            status: 401,
            message: "BAD_TOKEN".into(),
        };
        assert_eq!(err.to_string(), "BAD_TOKEN");
        assert_eq!(err.status(), Some(401));
        assert!(!err.is_transport());
    }

    #[test]
    fn missing_key_is_precondition() {
        assert!(Error::MissingApiKey.is_precondition());
        assert_eq!(Error::MissingApiKey.status(), None);
        assert_eq!(Error::MissingApiKey.to_string(), "API key required");
    }

    #[test]
    fn deserialization_is_transport_class() {
        let err = Error::Deserialization {
            message: "expected value".into(),
            body: "<html>".into(),
        };
        assert!(err.is_transport());
    }
}
