// ── Core error types ──
//
// Only construction can fail with a `CoreError`. Once a `Dashboard` exists,
// every request failure is folded into a `RequestOutcome` and surfaced as a
// placeholder or notification instead.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Cannot build API client: {message}")]
    ClientBuild { message: String },
}

impl From<torbox_api::Error> for CoreError {
    fn from(err: torbox_api::Error) -> Self {
        match err {
            torbox_api::Error::InvalidUrl(e) => Self::Config {
                message: format!("Invalid URL: {e}"),
            },
            other => Self::ClientBuild {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_maps_to_config() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err: CoreError = torbox_api::Error::InvalidUrl(parse_err).into();
        assert!(matches!(err, CoreError::Config { .. }));
    }
}
