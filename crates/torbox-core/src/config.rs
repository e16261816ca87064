// ── Runtime dashboard configuration ──
//
// Describes where the remote API lives and how the dashboard behaves.
// Never touches disk and never carries the API key; the frontend builds a
// `DashboardConfig` from its own settings and hands it in.

use std::time::Duration;

use url::Url;

use torbox_api::DEFAULT_API_PREFIX;

/// Configuration for a single `Dashboard`.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Service root (e.g. `https://api.torbox.app`).
    pub base_url: Url,
    /// Versioned prefix inserted before every endpoint path.
    pub api_prefix: String,
    /// Overall request timeout.
    pub timeout: Duration,
    /// How long a toast stays on screen.
    pub toast_duration: Duration,
}

impl DashboardConfig {
    /// Default prefix and timings against `base_url`.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_prefix: DEFAULT_API_PREFIX.to_owned(),
            timeout: Duration::from_secs(30),
            toast_duration: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_base_url_and_default_prefix() {
        let config = DashboardConfig::new(Url::parse("http://127.0.0.1:9000").unwrap());
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(config.api_prefix, DEFAULT_API_PREFIX);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
