// ── Views and panels ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A navigable view. Exactly one is active at a time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Dashboard,
    Torrents,
    #[strum(to_string = "webdownloads", serialize = "webdl")]
    WebDownloads,
    Usenet,
    Profile,
    Status,
}

impl View {
    /// Title shown in the tab bar.
    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Torrents => "Torrents",
            Self::WebDownloads => "Web Downloads",
            Self::Usenet => "Usenet",
            Self::Profile => "Profile",
            Self::Status => "Service Status",
        }
    }

    /// Panels rendered by this view.
    pub fn panels(self) -> &'static [Panel] {
        match self {
            Self::Dashboard => &[Panel::QuickStats],
            Self::Torrents => &[Panel::Torrents],
            Self::WebDownloads => &[Panel::WebDownloads],
            Self::Usenet => &[Panel::Usenet],
            Self::Profile => &[Panel::Profile],
            Self::Status => &[Panel::Uptime, Panel::ServiceStats],
        }
    }

    /// Whether the view's data needs a verified session.
    pub fn requires_connection(self) -> bool {
        !matches!(self, Self::Status)
    }
}

/// An independently rendered region. Each loader owns exactly one panel
/// (the status loader owns two).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Panel {
    QuickStats,
    Torrents,
    WebDownloads,
    Usenet,
    Profile,
    Uptime,
    ServiceStats,
}

impl Panel {
    /// Placeholder text shown while the session is unverified.
    pub fn connect_message(self) -> &'static str {
        match self {
            Self::QuickStats => "Connect your API key to view stats",
            Self::Torrents => "Connect your API key to view torrents",
            Self::WebDownloads => "Connect your API key to view web downloads",
            Self::Usenet => "Connect your API key to view usenet downloads",
            Self::Profile => "Connect your API key to view profile information",
            Self::Uptime | Self::ServiceStats => "Loading service status...",
        }
    }

    /// Placeholder text for a successful load with nothing to show.
    pub fn empty_message(self) -> &'static str {
        match self {
            Self::QuickStats => "Connect your API key to view stats",
            Self::Torrents => "No torrents found",
            Self::WebDownloads => "No web downloads found",
            Self::Usenet => "No usenet downloads found",
            Self::Profile => "Could not load profile information",
            Self::Uptime => "Could not load uptime data",
            Self::ServiceStats => "No statistics available",
        }
    }

    /// Placeholder text for a failed load.
    pub fn failed_message(self) -> &'static str {
        match self {
            Self::QuickStats => "Connect your API key to view stats",
            Self::Torrents => "Failed to load torrents",
            Self::WebDownloads => "Failed to load web downloads",
            Self::Usenet => "Failed to load usenet downloads",
            Self::Profile => "Could not load profile information",
            Self::Uptime => "Could not load uptime data",
            Self::ServiceStats => "Could not load statistics",
        }
    }
}
