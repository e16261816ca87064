// Endpoint table for the remote API.
//
// Every call the dashboard makes is one of these variants. Path, method,
// query string and auth requirement live together so the client never
// builds a URL by string concatenation at a call site.

use reqwest::Method;

/// A remote API endpoint, with any path/query parameters it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET user/me` -- identity probe. `settings` requests the full profile.
    UserMe { settings: bool },
    /// `GET general/getstats` -- service metrics. Unauthenticated.
    Stats,
    /// `GET general/getupstatus` -- service uptime. Unauthenticated.
    UpStatus,
    /// `GET torrents/mylist`
    TorrentList,
    /// `POST torrents/createtorrent`
    CreateTorrent,
    /// `POST torrents/controltorrent`
    ControlTorrent,
    /// `GET torrents/requestdl?torrent_id=..`
    RequestDownload { torrent_id: String },
    /// `GET webdl/mylist`
    WebDownloadList,
    /// `POST webdl/createwebdownload`
    CreateWebDownload,
    /// `GET usenet/mylist`
    UsenetList,
    /// `POST usenet/createusenetdownload`
    CreateUsenetDownload,
}

impl Endpoint {
    /// HTTP method for this endpoint.
    pub fn method(&self) -> Method {
        match self {
            Self::CreateTorrent
            | Self::ControlTorrent
            | Self::CreateWebDownload
            | Self::CreateUsenetDownload => Method::POST,
            _ => Method::GET,
        }
    }

    /// Path relative to the versioned API prefix (no leading slash).
    pub fn path(&self) -> &'static str {
        match self {
            Self::UserMe { .. } => "user/me",
            Self::Stats => "general/getstats",
            Self::UpStatus => "general/getupstatus",
            Self::TorrentList => "torrents/mylist",
            Self::CreateTorrent => "torrents/createtorrent",
            Self::ControlTorrent => "torrents/controltorrent",
            Self::RequestDownload { .. } => "torrents/requestdl",
            Self::WebDownloadList => "webdl/mylist",
            Self::CreateWebDownload => "webdl/createwebdownload",
            Self::UsenetList => "usenet/mylist",
            Self::CreateUsenetDownload => "usenet/createusenetdownload",
        }
    }

    /// Query parameters appended to the URL.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::UserMe { settings: true } => vec![("settings", "1".into())],
            Self::RequestDownload { torrent_id } => vec![("torrent_id", torrent_id.clone())],
            _ => Vec::new(),
        }
    }

    /// Whether the endpoint refuses anonymous callers.
    ///
    /// Only the `general/*` service endpoints are public.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Stats | Self::UpStatus)
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
