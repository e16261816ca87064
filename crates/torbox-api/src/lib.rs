// torbox-api: Async Rust client for the TorBox download-management API

pub mod client;
pub mod endpoint;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{DEFAULT_API_PREFIX, DEFAULT_BASE_URL, TorboxClient};
pub use endpoint::Endpoint;
pub use error::Error;
pub use models::{
    ApiResponse, ControlTorrentRequest, CreateDownloadRequest, CreateTorrentRequest,
    QueuedDownload, ResourceId, ServiceStats, Torrent, TorrentOperation, UsenetDownload,
    UserProfile, WebDownload,
};
pub use transport::TransportConfig;
