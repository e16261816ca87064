//! Palette and semantic styles.

use ratatui::style::{Color, Modifier, Style};

use torbox_core::{ConnectionStatus, NotificationLevel, StatusTone};

// ── Palette ───────────────────────────────────────────────────────────

pub const ACCENT: Color = Color::Rgb(98, 114, 255); // #6272ff
pub const CYAN: Color = Color::Rgb(128, 222, 234); // #80deea
pub const GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const RED: Color = Color::Rgb(255, 99, 99); // #ff6363
pub const TEXT: Color = Color::Rgb(205, 208, 220); // #cdd0dc
pub const MUTED: Color = Color::Rgb(110, 118, 150); // #6e7696
pub const BG_PANEL: Color = Color::Rgb(28, 30, 40); // #1c1e28
pub const BG_SELECTED: Color = Color::Rgb(44, 47, 64); // #2c2f40

// ── Semantic Styles ───────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(CYAN).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(ACCENT)
}

pub fn border_default() -> Style {
    Style::default().fg(MUTED)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(CYAN)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(TEXT)
}

pub fn table_selected() -> Style {
    Style::default()
        .fg(ACCENT)
        .bg(BG_SELECTED)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_active() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(TEXT)
}

pub fn label() -> Style {
    Style::default().fg(MUTED)
}

pub fn value() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn placeholder() -> Style {
    Style::default().fg(MUTED).add_modifier(Modifier::ITALIC)
}

pub fn key_hint() -> Style {
    Style::default().fg(MUTED)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(CYAN).add_modifier(Modifier::BOLD)
}

pub fn tone_color(tone: StatusTone) -> Color {
    match tone {
        StatusTone::Success => GREEN,
        StatusTone::Info => CYAN,
        StatusTone::Warning => YELLOW,
        StatusTone::Error => RED,
    }
}

/// Border colour and icon for a toast.
pub fn notification_style(level: NotificationLevel) -> (Color, &'static str) {
    match level {
        NotificationLevel::Success => (GREEN, "✓"),
        NotificationLevel::Info => (CYAN, "·"),
        NotificationLevel::Warning => (YELLOW, "!"),
        NotificationLevel::Error => (RED, "✗"),
    }
}

/// Indicator glyph and colour for the connection status.
pub fn connection_indicator(status: ConnectionStatus) -> (&'static str, Color) {
    match status {
        ConnectionStatus::Disconnected => ("○", MUTED),
        ConnectionStatus::Checking => ("◐", YELLOW),
        ConnectionStatus::Connected => ("●", GREEN),
        ConnectionStatus::Failed => ("✗", RED),
    }
}
