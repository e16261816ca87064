//! Session controller between `torbox-api` and terminal frontends.
//!
//! - **[`Dashboard`]**: central facade. Holds the [`Session`] (API key and
//!   verification state), routes views with
//!   [`show_view()`](Dashboard::show_view), runs the resource loaders and the
//!   create/control mutations.
//!
//! - **[`Gateway`]**: the single path to the network. Enforces the API-key
//!   precondition, drives the [`BusyIndicator`] and folds every failure into
//!   a [`RequestOutcome`].
//!
//! - **View models** ([`render`]): loaders render plain values
//!   ([`PanelContent`]) into per-panel slots. Frontends read them with
//!   [`Dashboard::panel`] after a [`DashboardEvent::PanelUpdated`].
//!
//! - **Formatting** ([`format`]): byte sizes, dates, progress and stat keys.

pub mod busy;
pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod gateway;
pub mod model;
pub mod notify;
pub mod outcome;
pub mod render;
pub mod requests;
pub mod session;
mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use busy::{BusyGuard, BusyIndicator};
pub use config::DashboardConfig;
pub use controller::{Clipboard, Dashboard, DashboardEvent, confirmation_prompt};
pub use error::CoreError;
pub use gateway::Gateway;
pub use model::{DownloadStatus, Panel, StatusTone, View};
pub use notify::{Notification, NotificationLevel};
pub use outcome::RequestOutcome;
pub use render::{
    DownloadRow, LabelledValue, PanelContent, Placeholder, PlaceholderKind, ProfileView,
    RowAction, StatsView, TorrentRow, UptimeView,
};
pub use requests::{Confirmation, NewDownload, NewTorrent, Trigger};
pub use session::{ConnectionStatus, Session};

pub use torbox_api::{DEFAULT_API_PREFIX, DEFAULT_BASE_URL, ResourceId, TorrentOperation};
