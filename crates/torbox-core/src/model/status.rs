// ── Download status classification ──
//
// Known state strings map to variants directly; anything else falls back to
// case-insensitive substring matching so new server states still get a
// sensible tone.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Visual tone of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum StatusTone {
    Success,
    Info,
    Warning,
    Error,
}

/// State of a torrent, web download or usenet download.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DownloadStatus {
    Downloading,
    Uploading,
    Seeding,
    Completed,
    Cached,
    Paused,
    Queued,
    Stalled,
    MetaDl,
    Checking,
    Error,
    Failed,
    /// The server sent no state at all.
    Unknown,
    /// A state string this client does not recognise, kept verbatim.
    Other(String),
}

/// The recognised state strings, matched case-insensitively.
#[derive(EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
enum KnownState {
    Downloading,
    Uploading,
    Seeding,
    Completed,
    Cached,
    Paused,
    Queued,
    Stalled,
    #[strum(serialize = "metadl")]
    MetaDl,
    Checking,
    Error,
    Failed,
}

impl DownloadStatus {
    /// Classify a raw state string from the API.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::Unknown;
        };
        match raw.parse::<KnownState>() {
            Ok(KnownState::Downloading) => Self::Downloading,
            Ok(KnownState::Uploading) => Self::Uploading,
            Ok(KnownState::Seeding) => Self::Seeding,
            Ok(KnownState::Completed) => Self::Completed,
            Ok(KnownState::Cached) => Self::Cached,
            Ok(KnownState::Paused) => Self::Paused,
            Ok(KnownState::Queued) => Self::Queued,
            Ok(KnownState::Stalled) => Self::Stalled,
            Ok(KnownState::MetaDl) => Self::MetaDl,
            Ok(KnownState::Checking) => Self::Checking,
            Ok(KnownState::Error) => Self::Error,
            Ok(KnownState::Failed) => Self::Failed,
            Err(_) => Self::Other(raw.to_owned()),
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            Self::Completed | Self::Seeding | Self::Cached => StatusTone::Success,
            Self::Downloading | Self::Uploading | Self::MetaDl | Self::Checking | Self::Unknown => {
                StatusTone::Info
            }
            Self::Paused | Self::Queued | Self::Stalled => StatusTone::Warning,
            Self::Error | Self::Failed => StatusTone::Error,
            Self::Other(raw) => tone_by_substring(raw),
        }
    }

    /// Label shown in tables.
    pub fn label(&self) -> &str {
        match self {
            Self::Downloading => "downloading",
            Self::Uploading => "uploading",
            Self::Seeding => "seeding",
            Self::Completed => "completed",
            Self::Cached => "cached",
            Self::Paused => "paused",
            Self::Queued => "queued",
            Self::Stalled => "stalled",
            Self::MetaDl => "metaDL",
            Self::Checking => "checking",
            Self::Error => "error",
            Self::Failed => "failed",
            Self::Unknown => "Unknown",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn tone_by_substring(raw: &str) -> StatusTone {
    let lower = raw.to_lowercase();
    let has = |needle: &str| lower.contains(needle);
    if has("completed") || has("seeding") {
        StatusTone::Success
    } else if has("downloading") || has("active") {
        StatusTone::Info
    } else if has("paused") || has("queued") {
        StatusTone::Warning
    } else if has("error") || has("failed") {
        StatusTone::Error
    } else {
        StatusTone::Info
    }
}
