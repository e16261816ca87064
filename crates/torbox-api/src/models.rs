// API response and request types
//
// Every endpoint wraps its payload in the same envelope. List item fields
// are decoded leniently because the service omits keys and changes their
// types freely; one odd field must never fail a whole list.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ── Response Envelope ────────────────────────────────────────────────

/// Standard response envelope.
///
/// ```json
/// { "success": true, "data": ..., "error": null, "detail": "..." }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Absent means success; the service only spells out failures.
    #[serde(default = "default_success")]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

fn default_success() -> bool {
    true
}

impl<T> ApiResponse<T> {
    /// Best human-readable failure message carried by the envelope.
    pub fn message(&self) -> Option<&str> {
        self.error
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.detail.as_deref().filter(|s| !s.is_empty()))
    }
}

/// Minimal view of an error body, used for non-2xx responses whose
/// payload type is unknown.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub(crate) fn message(self) -> Option<String> {
        self.error
            .filter(|s| !s.is_empty())
            .or(self.detail.filter(|s| !s.is_empty()))
    }
}

// ── Identifiers ──────────────────────────────────────────────────────

/// Resource identifier. The service uses integers, but string ids are
/// accepted so a schema change does not break listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(u64),
    Text(String),
}

impl Default for ResourceId {
    /// The empty id given to list items the service sent without one.
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl ResourceId {
    /// True for the placeholder id of an item that cannot be acted on.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ResourceId {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        s.parse().map_or_else(|_| Self::Text(s.to_owned()), Self::Number)
    }
}

// ── Lenient field decoding ───────────────────────────────────────────

/// Numbers and numeric strings. Anything else reads as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

/// Strings, with numbers spelled out. Anything else reads as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Any id the service sends; missing or unusable ids become empty.
fn lenient_id<'de, D>(deserializer: D) -> Result<ResourceId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n
            .as_u64()
            .map_or_else(|| ResourceId::Text(n.to_string()), ResourceId::Number),
        Some(Value::String(s)) => ResourceId::from(s.as_str()),
        _ => ResourceId::default(),
    })
}

// ── Torrents ─────────────────────────────────────────────────────────

/// One entry of `torrents/mylist`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Torrent {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: ResourceId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    /// Bytes. Floats are tolerated.
    #[serde(default, deserialize_with = "lenient_number")]
    pub size: Option<f64>,
    /// Either a 0..=1 fraction or a 0..=100 percentage depending on API version.
    #[serde(default, deserialize_with = "lenient_number")]
    pub progress: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub download_state: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_at: Option<String>,
}

/// Operation accepted by `torrents/controltorrent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TorrentOperation {
    Resume,
    Pause,
    Delete,
}

impl TorrentOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Resume => "resume",
            Self::Pause => "pause",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for TorrentOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `torrents/createtorrent`. Flags travel as `1`/`0`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTorrentRequest {
    pub magnet: String,
    pub name: String,
    pub seed: u8,
    pub allow_zip: u8,
}

/// Body of `torrents/controltorrent`.
#[derive(Debug, Clone, Serialize)]
pub struct ControlTorrentRequest {
    pub torrent_id: ResourceId,
    pub operation: TorrentOperation,
}

// ── Web / Usenet downloads ───────────────────────────────────────────

/// One entry of `webdl/mylist` or `usenet/mylist`. Both services return
/// the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedDownload {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: ResourceId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub download_state: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub size: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub progress: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_at: Option<String>,
}

impl QueuedDownload {
    /// The state string, whichever key the service used.
    pub fn state(&self) -> Option<&str> {
        self.status.as_deref().or(self.download_state.as_deref())
    }
}

pub type WebDownload = QueuedDownload;
pub type UsenetDownload = QueuedDownload;

/// Body of `webdl/createwebdownload` and `usenet/createusenetdownload`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateDownloadRequest {
    pub url: String,
    pub name: String,
}

// ── User / service ───────────────────────────────────────────────────

/// `user/me` payload. Known fields are typed; everything else lands in
/// `extra` so the raw view can show the full document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<ResourceId>,
    #[serde(default)]
    pub email: Option<String>,
    /// Numeric tier on current API versions, a name on older ones.
    #[serde(default)]
    pub plan: Option<serde_json::Value>,
    #[serde(default)]
    pub premium_expires_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_downloaded: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_uploaded: Option<f64>,
    #[serde(default)]
    pub server_time: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `general/getstats` payload: free-form counters keyed by name.
pub type ServiceStats = serde_json::Map<String, serde_json::Value>;
