// TorBox HTTP client
//
// Wraps `reqwest::Client` with versioned URL construction, bearer auth and
// envelope unwrapping. The API key is supplied per call because the user
// can change it while the client is alive.

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::models::{
    ApiResponse, ControlTorrentRequest, CreateDownloadRequest, CreateTorrentRequest, ErrorBody,
    QueuedDownload, ResourceId, ServiceStats, Torrent, UserProfile,
};
use crate::transport::TransportConfig;

/// Default service root.
pub const DEFAULT_BASE_URL: &str = "https://api.torbox.app";
/// Default versioned prefix placed between the root and every endpoint path.
pub const DEFAULT_API_PREFIX: &str = "/v1/api";

const BODY_PREVIEW: usize = 200;

/// Raw HTTP client for the TorBox API.
///
/// Every method returns the unwrapped `data` payload of the envelope, or
/// `None` when the service sent a successful envelope without one.
#[derive(Debug, Clone)]
pub struct TorboxClient {
    http: reqwest::Client,
    base_url: Url,
    api_prefix: String,
}

impl TorboxClient {
    /// Create a client from a `TransportConfig`.
    pub fn new(base_url: Url, api_prefix: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, api_prefix))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, mut base_url: Url, api_prefix: &str) -> Self {
        // `Url::join` replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            http,
            base_url,
            api_prefix: api_prefix.trim_matches('/').to_owned(),
        }
    }

    /// The service root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL for an endpoint, query string included.
    pub fn url_for(&self, endpoint: &Endpoint) -> Result<Url, Error> {
        let relative = if self.api_prefix.is_empty() {
            endpoint.path().to_owned()
        } else {
            format!("{}/{}", self.api_prefix, endpoint.path())
        };
        let mut url = self.base_url.join(&relative)?;
        let query = endpoint.query();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    // ── Core request path ───────────────────────────────────────────

    /// Perform one API exchange and unwrap its envelope.
    ///
    /// Fails with [`Error::MissingApiKey`] before any I/O when the endpoint
    /// is authenticated and no key was given.
    pub async fn send<T, B>(
        &self,
        endpoint: &Endpoint,
        api_key: Option<&SecretString>,
        body: Option<&B>,
    ) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let api_key = api_key.filter(|k| !k.expose_secret().is_empty());
        if endpoint.requires_auth() && api_key.is_none() {
            debug!(%endpoint, "refusing request without API key");
            return Err(Error::MissingApiKey);
        }

        let url = self.url_for(endpoint)?;
        debug!(%endpoint, %url, "api request");

        let mut req = self
            .http
            .request(endpoint.method(), url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = api_key {
            req = req.bearer_auth(key.expose_secret());
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        self.parse_envelope(endpoint, resp).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        api_key: Option<&SecretString>,
    ) -> Result<Option<T>, Error> {
        self.send::<T, ()>(endpoint, api_key, None).await
    }

    async fn parse_envelope<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        resp: reqwest::Response,
    ) -> Result<Option<T>, Error> {
        let status = resp.status();
        let body = resp.text().await?;
        trace!(%endpoint, status = status.as_u16(), body = %preview(&body), "api response");

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::message)
                .unwrap_or_else(|| {
                    format!(
                        "HTTP {}: {}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or("Unknown")
                    )
                });
            debug!(%endpoint, status = status.as_u16(), %message, "api error");
            return Err(Error::Http {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiResponse<T> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: format!("{e} (body preview: {:?})", preview(&body)),
                body: body.clone(),
            })?;

        if !envelope.success {
            let message = envelope
                .message()
                .map_or_else(|| "Request was not successful".to_owned(), str::to_owned);
            debug!(%endpoint, %message, "api reported failure");
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(envelope.data)
    }

    // ── Account & service ───────────────────────────────────────────

    /// `GET user/me`. `settings` asks for the full profile document.
    pub async fn me(
        &self,
        api_key: Option<&SecretString>,
        settings: bool,
    ) -> Result<Option<UserProfile>, Error> {
        self.get(&Endpoint::UserMe { settings }, api_key).await
    }

    /// `GET general/getstats`.
    pub async fn stats(&self, api_key: Option<&SecretString>) -> Result<Option<ServiceStats>, Error> {
        self.get(&Endpoint::Stats, api_key).await
    }

    /// `GET general/getupstatus`. The payload shape is not stable, so it is
    /// returned as raw JSON.
    pub async fn up_status(
        &self,
        api_key: Option<&SecretString>,
    ) -> Result<Option<serde_json::Value>, Error> {
        self.get(&Endpoint::UpStatus, api_key).await
    }

    // ── Torrents ────────────────────────────────────────────────────

    pub async fn list_torrents(
        &self,
        api_key: Option<&SecretString>,
    ) -> Result<Option<Vec<Torrent>>, Error> {
        self.get(&Endpoint::TorrentList, api_key).await
    }

    pub async fn create_torrent(
        &self,
        api_key: Option<&SecretString>,
        request: &CreateTorrentRequest,
    ) -> Result<Option<serde_json::Value>, Error> {
        self.send(&Endpoint::CreateTorrent, api_key, Some(request))
            .await
    }

    pub async fn control_torrent(
        &self,
        api_key: Option<&SecretString>,
        request: &ControlTorrentRequest,
    ) -> Result<Option<serde_json::Value>, Error> {
        self.send(&Endpoint::ControlTorrent, api_key, Some(request))
            .await
    }

    /// `GET torrents/requestdl`. Returns the download link.
    pub async fn request_download(
        &self,
        api_key: Option<&SecretString>,
        torrent_id: &ResourceId,
    ) -> Result<Option<String>, Error> {
        let endpoint = Endpoint::RequestDownload {
            torrent_id: torrent_id.to_string(),
        };
        self.get(&endpoint, api_key).await
    }

    // ── Web downloads ───────────────────────────────────────────────

    pub async fn list_web_downloads(
        &self,
        api_key: Option<&SecretString>,
    ) -> Result<Option<Vec<QueuedDownload>>, Error> {
        self.get(&Endpoint::WebDownloadList, api_key).await
    }

    pub async fn create_web_download(
        &self,
        api_key: Option<&SecretString>,
        request: &CreateDownloadRequest,
    ) -> Result<Option<serde_json::Value>, Error> {
        self.send(&Endpoint::CreateWebDownload, api_key, Some(request))
            .await
    }

    // ── Usenet ──────────────────────────────────────────────────────

    pub async fn list_usenet_downloads(
        &self,
        api_key: Option<&SecretString>,
    ) -> Result<Option<Vec<QueuedDownload>>, Error> {
        self.get(&Endpoint::UsenetList, api_key).await
    }

    pub async fn create_usenet_download(
        &self,
        api_key: Option<&SecretString>,
        request: &CreateDownloadRequest,
    ) -> Result<Option<serde_json::Value>, Error> {
        self.send(&Endpoint::CreateUsenetDownload, api_key, Some(request))
            .await
    }
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(BODY_PREVIEW) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
