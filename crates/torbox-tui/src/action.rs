//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;
use std::sync::Arc;

use torbox_core::{
    ConnectionStatus, NewDownload, NewTorrent, Notification, Panel, PanelContent, ResourceId,
    TorrentOperation, View, confirmation_prompt,
};

/// Pending confirmation for a torrent operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmAction {
    pub torrent_id: ResourceId,
    pub name: String,
    pub operation: TorrentOperation,
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&confirmation_prompt(self.operation))
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchView(View),
    Refresh,

    // ── Dashboard state (from the data bridge) ─────────────────────
    ViewChanged(View),
    ConnectionChanged(ConnectionStatus),
    BusyChanged(bool),
    PanelUpdated(Panel, Arc<PanelContent>),

    // ── Session ───────────────────────────────────────────────────
    Connect(String),

    // ── Mutations ─────────────────────────────────────────────────
    AddTorrent(NewTorrent),
    AddWebDownload(NewDownload),
    AddUsenetDownload(NewDownload),
    /// A create call was accepted; the view's form can close.
    FormAccepted(View),
    RequestControl(ConfirmAction),
    RequestDownloadLink(ResourceId),

    // ── Confirm Dialog ────────────────────────────────────────────
    ConfirmYes,
    ConfirmNo,

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}
