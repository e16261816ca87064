//! Dashboard screen — API key entry, connection status and quick stats.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use torbox_core::{ConnectionStatus, Panel, PanelContent};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::form::TextField;
use crate::widgets::panel;

pub struct DashboardScreen {
    focused: bool,
    key_field: TextField,
    editing: bool,
    status: ConnectionStatus,
    stats: Arc<PanelContent>,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            key_field: TextField::masked(),
            // Nothing works without a key, so start in the field.
            editing: true,
            status: ConnectionStatus::default(),
            stats: Arc::new(PanelContent::initial(Panel::QuickStats)),
        }
    }

    fn render_connection(&self, frame: &mut Frame, area: Rect) {
        let (glyph, color) = theme::connection_indicator(self.status);
        let mut spans = vec![
            Span::styled("  Status  ", theme::label()),
            Span::styled(
                format!("{glyph} {}", self.status.label()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ];
        if self.editing {
            spans.push(Span::styled("    Enter ", theme::key_hint_key()));
            spans.push(Span::styled("connect  ", theme::key_hint()));
            spans.push(Span::styled("Esc ", theme::key_hint_key()));
            spans.push(Span::styled("done", theme::key_hint()));
        } else {
            spans.push(Span::styled("    k ", theme::key_hint_key()));
            spans.push(Span::styled("edit key  ", theme::key_hint()));
            spans.push(Span::styled("c ", theme::key_hint_key()));
            spans.push(Span::styled("reconnect", theme::key_hint()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl Component for DashboardScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.editing {
            return Ok(match key.code {
                KeyCode::Enter => {
                    self.editing = false;
                    Some(Action::Connect(self.key_field.value().to_owned()))
                }
                KeyCode::Esc => {
                    self.editing = false;
                    None
                }
                _ => {
                    self.key_field.handle_key(key);
                    None
                }
            });
        }

        Ok(match key.code {
            KeyCode::Char('k') | KeyCode::Enter => {
                self.editing = true;
                None
            }
            KeyCode::Char('c') => Some(Action::Connect(self.key_field.value().to_owned())),
            _ => None,
        })
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::PanelUpdated(Panel::QuickStats, content) => {
                self.stats = Arc::clone(content);
            }
            Action::ConnectionChanged(status) => {
                self.status = *status;
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let outer = panel::block("TorBox Dashboard", self.focused);
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let layout = Layout::vertical([
            Constraint::Length(3), // key field
            Constraint::Length(1), // status
            Constraint::Length(1),
            Constraint::Min(1), // stats
        ])
        .split(inner);

        self.key_field
            .render(frame, layout[0], "API Key", self.focused && self.editing);
        self.render_connection(frame, layout[1]);

        let stats_block = panel::block("Quick Stats", false);
        let stats_area = stats_block.inner(layout[3]);
        frame.render_widget(stats_block, layout[3]);
        match self.stats.as_ref() {
            PanelContent::Stats(stats) => {
                frame.render_widget(Paragraph::new(panel::labelled_lines(&stats.items)), stats_area);
            }
            PanelContent::Placeholder(p) => panel::render_placeholder(frame, stats_area, p),
            _ => {}
        }
    }

    fn captures_input(&self) -> bool {
        self.editing
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "dashboard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn enter_submits_the_typed_key() {
        let mut screen = DashboardScreen::new();
        assert!(screen.captures_input());
        for c in "tb-key".chars() {
            screen.handle_key_event(press(KeyCode::Char(c))).unwrap();
        }
        let action = screen.handle_key_event(press(KeyCode::Enter)).unwrap();
        assert!(matches!(action, Some(Action::Connect(ref k)) if k == "tb-key"));
        assert!(!screen.captures_input());
    }
}
