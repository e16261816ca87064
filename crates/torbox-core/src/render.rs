// ── View models ──
//
// Loaders never build terminal widgets. They turn API payloads into these
// plain values and the frontend decides how to draw them. Every row carries
// the actions it supports so key bindings stay data-driven.

use torbox_api::{QueuedDownload, ResourceId, ServiceStats, Torrent, UserProfile};

use crate::format::{
    display_value, format_file_size, format_optional_date, format_plan, humanize_key,
    progress_percent,
};
use crate::model::{DownloadStatus, Panel, StatusTone};
use crate::outcome::RequestOutcome;

// ── Content ──────────────────────────────────────────────────────────

/// Why a panel shows a message instead of data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// Session not verified; nothing was requested.
    Connect,
    /// The load succeeded with nothing to show.
    Empty,
    /// The load failed.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub kind: PlaceholderKind,
    pub message: String,
}

impl Placeholder {
    pub fn connect(panel: Panel) -> Self {
        Self {
            kind: PlaceholderKind::Connect,
            message: panel.connect_message().to_owned(),
        }
    }

    pub fn empty(panel: Panel) -> Self {
        Self {
            kind: PlaceholderKind::Empty,
            message: panel.empty_message().to_owned(),
        }
    }

    pub fn failed(panel: Panel) -> Self {
        Self {
            kind: PlaceholderKind::Failed,
            message: panel.failed_message().to_owned(),
        }
    }
}

/// Everything a panel can display.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    Placeholder(Placeholder),
    Torrents(Vec<TorrentRow>),
    Downloads(Vec<DownloadRow>),
    Profile(ProfileView),
    Uptime(UptimeView),
    Stats(StatsView),
}

impl PanelContent {
    /// Initial content of a panel before any load.
    pub fn initial(panel: Panel) -> Self {
        Self::Placeholder(Placeholder::connect(panel))
    }

    pub fn placeholder(&self) -> Option<&Placeholder> {
        match self {
            Self::Placeholder(p) => Some(p),
            _ => None,
        }
    }

    /// Number of selectable rows.
    pub fn row_count(&self) -> usize {
        match self {
            Self::Torrents(rows) => rows.len(),
            Self::Downloads(rows) => rows.len(),
            _ => 0,
        }
    }
}

// ── Rows ─────────────────────────────────────────────────────────────

/// Per-row action exposed to the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    Resume,
    Pause,
    DownloadLink,
    Delete,
}

impl RowAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Resume => "Resume",
            Self::Pause => "Pause",
            Self::DownloadLink => "Get Download Link",
            Self::Delete => "Delete",
        }
    }
}

const TORRENT_ACTIONS: [RowAction; 4] = [
    RowAction::Resume,
    RowAction::Pause,
    RowAction::DownloadLink,
    RowAction::Delete,
];

#[derive(Debug, Clone, PartialEq)]
pub struct TorrentRow {
    pub id: ResourceId,
    pub name: String,
    pub size: String,
    /// 0..=100.
    pub progress: f64,
    pub status: DownloadStatus,
    pub tone: StatusTone,
    pub created: String,
    pub actions: Vec<RowAction>,
}

impl From<&Torrent> for TorrentRow {
    fn from(t: &Torrent) -> Self {
        let status = DownloadStatus::parse(t.download_state.as_deref());
        Self {
            id: t.id.clone(),
            name: display_name(t.name.as_deref()),
            size: format_file_size(t.size),
            progress: progress_percent(t.progress),
            tone: status.tone(),
            status,
            created: format_optional_date(t.created_at.as_deref()),
            // Nothing can be sent for a torrent the service listed without an id.
            actions: if t.id.is_empty() {
                Vec::new()
            } else {
                TORRENT_ACTIONS.to_vec()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DownloadRow {
    pub id: ResourceId,
    pub name: String,
    pub url: String,
    pub size: String,
    pub progress: f64,
    pub status: DownloadStatus,
    pub tone: StatusTone,
    pub created: String,
}

impl From<&QueuedDownload> for DownloadRow {
    fn from(d: &QueuedDownload) -> Self {
        let status = DownloadStatus::parse(d.state());
        Self {
            id: d.id.clone(),
            name: display_name(d.name.as_deref()),
            url: d.url.clone().unwrap_or_else(|| "N/A".to_owned()),
            size: format_file_size(d.size),
            progress: progress_percent(d.progress),
            tone: status.tone(),
            status,
            created: format_optional_date(d.created_at.as_deref()),
        }
    }
}

fn display_name(name: Option<&str>) -> String {
    name.filter(|n| !n.is_empty())
        .unwrap_or("Unknown")
        .to_owned()
}

/// Render a list load: rows on data, the empty placeholder on no data,
/// the failed placeholder on any failure.
pub fn list_content<T>(
    panel: Panel,
    outcome: &RequestOutcome<Option<Vec<T>>>,
    build: impl FnOnce(&[T]) -> PanelContent,
) -> PanelContent {
    match outcome {
        RequestOutcome::Success(Some(items)) if !items.is_empty() => build(items.as_slice()),
        RequestOutcome::Success(_) => PanelContent::Placeholder(Placeholder::empty(panel)),
        _ => PanelContent::Placeholder(Placeholder::failed(panel)),
    }
}

pub fn torrent_rows(torrents: &[Torrent]) -> PanelContent {
    PanelContent::Torrents(torrents.iter().map(TorrentRow::from).collect())
}

pub fn download_rows(downloads: &[QueuedDownload]) -> PanelContent {
    PanelContent::Downloads(downloads.iter().map(DownloadRow::from).collect())
}

// ── Profile ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelledValue {
    pub label: String,
    pub value: String,
}

impl LabelledValue {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    /// Only fields the service actually sent.
    pub fields: Vec<LabelledValue>,
    /// Pretty-printed profile document.
    pub raw_json: String,
}

impl From<&UserProfile> for ProfileView {
    fn from(p: &UserProfile) -> Self {
        let mut fields = Vec::new();
        if let Some(email) = &p.email {
            fields.push(LabelledValue::new("Email", email.as_str()));
        }
        if p.plan.is_some() {
            fields.push(LabelledValue::new("Plan", format_plan(p.plan.as_ref())));
        }
        if let Some(expires) = &p.premium_expires_at {
            fields.push(LabelledValue::new(
                "Premium Expires",
                format_optional_date(Some(expires.as_str())),
            ));
        }
        if p.total_downloaded.is_some() {
            fields.push(LabelledValue::new(
                "Total Downloaded",
                format_file_size(p.total_downloaded),
            ));
        }
        if p.total_uploaded.is_some() {
            fields.push(LabelledValue::new(
                "Total Uploaded",
                format_file_size(p.total_uploaded),
            ));
        }
        if let Some(time) = &p.server_time {
            fields.push(LabelledValue::new("Server Time", format_optional_date(Some(time.as_str()))));
        }
        if let Some(id) = &p.id {
            fields.push(LabelledValue::new("User ID", id.to_string()));
        }

        Self {
            fields,
            raw_json: serde_json::to_string_pretty(p).unwrap_or_default(),
        }
    }
}

pub fn profile_content(outcome: &RequestOutcome<Option<UserProfile>>) -> PanelContent {
    match outcome {
        RequestOutcome::Success(Some(profile)) => PanelContent::Profile(ProfileView::from(profile)),
        RequestOutcome::Success(None) => PanelContent::Placeholder(Placeholder::empty(Panel::Profile)),
        _ => PanelContent::Placeholder(Placeholder::failed(Panel::Profile)),
    }
}

// ── Service status ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UptimeView {
    pub operational: bool,
    pub headline: String,
    /// Raw payload on success, the service's error text otherwise.
    pub detail: String,
}

/// Uptime panel. A service that answers with an error is degraded; one that
/// cannot be reached gets the failed placeholder.
pub fn uptime_content(outcome: &RequestOutcome<Option<serde_json::Value>>) -> PanelContent {
    match outcome {
        RequestOutcome::Success(data) => PanelContent::Uptime(UptimeView {
            operational: true,
            headline: "Service is operational".to_owned(),
            detail: data
                .as_ref()
                .and_then(|d| serde_json::to_string_pretty(d).ok())
                .unwrap_or_default(),
        }),
        RequestOutcome::HttpError { message, .. } => PanelContent::Uptime(UptimeView {
            operational: false,
            headline: "Service issues detected".to_owned(),
            detail: message.clone(),
        }),
        _ => PanelContent::Placeholder(Placeholder::failed(Panel::Uptime)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    pub items: Vec<LabelledValue>,
    pub raw_json: Option<String>,
}

/// Full service statistics: every key, humanised.
pub fn service_stats_content(outcome: &RequestOutcome<Option<ServiceStats>>) -> PanelContent {
    match outcome {
        RequestOutcome::Success(Some(stats)) if !stats.is_empty() => {
            let items = stats
                .iter()
                .map(|(key, value)| LabelledValue::new(humanize_key(key), display_value(value)))
                .collect();
            PanelContent::Stats(StatsView {
                items,
                raw_json: serde_json::to_string_pretty(stats).ok(),
            })
        }
        RequestOutcome::Success(_) => {
            PanelContent::Placeholder(Placeholder::empty(Panel::ServiceStats))
        }
        _ => PanelContent::Placeholder(Placeholder::failed(Panel::ServiceStats)),
    }
}

/// Dashboard summary built from the account probe and the service counters.
/// Either half may be missing; with neither, the connect placeholder shows.
pub fn quick_stats_content(
    user: &RequestOutcome<Option<UserProfile>>,
    stats: &RequestOutcome<Option<ServiceStats>>,
) -> PanelContent {
    let mut items = Vec::new();

    if let RequestOutcome::Success(Some(profile)) = user {
        items.push(LabelledValue::new(
            "Email",
            profile.email.clone().unwrap_or_else(|| "N/A".to_owned()),
        ));
        items.push(LabelledValue::new("Plan", format_plan(profile.plan.as_ref())));
    }

    if let RequestOutcome::Success(Some(stats)) = stats {
        let counter = |key: &str| {
            stats
                .get(key)
                .filter(|v| !v.is_null())
                .map_or_else(|| "0".to_owned(), display_value)
        };
        items.push(LabelledValue::new("Total Torrents", counter("total_torrents")));
        items.push(LabelledValue::new("Total Downloads", counter("total_downloads")));
    }

    if items.is_empty() {
        PanelContent::Placeholder(Placeholder::connect(Panel::QuickStats))
    } else {
        PanelContent::Stats(StatsView {
            items,
            raw_json: None,
        })
    }
}
