//! Service status screen — uptime and public statistics.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use torbox_core::{Panel, PanelContent, UptimeView};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::panel;

pub struct StatusScreen {
    focused: bool,
    uptime: Arc<PanelContent>,
    stats: Arc<PanelContent>,
}

impl StatusScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            uptime: Arc::new(PanelContent::initial(Panel::Uptime)),
            stats: Arc::new(PanelContent::initial(Panel::ServiceStats)),
        }
    }

    fn render_uptime(&self, frame: &mut Frame, area: Rect) {
        let block = panel::block("Uptime", self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match self.uptime.as_ref() {
            PanelContent::Uptime(view) => {
                frame.render_widget(
                    Paragraph::new(uptime_lines(view)).wrap(Wrap { trim: false }),
                    inner,
                );
            }
            PanelContent::Placeholder(p) => panel::render_placeholder(frame, inner, p),
            _ => {}
        }
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect) {
        let block = panel::block("Service Statistics", false);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match self.stats.as_ref() {
            PanelContent::Stats(stats) => {
                let mut lines = panel::labelled_lines(&stats.items);
                if let Some(raw) = &stats.raw_json {
                    lines.push(Line::from(""));
                    lines.extend(
                        raw.lines()
                            .map(|l| Line::from(Span::styled(l.to_owned(), theme::placeholder()))),
                    );
                }
                frame.render_widget(Paragraph::new(lines), inner);
            }
            PanelContent::Placeholder(p) => panel::render_placeholder(frame, inner, p),
            _ => {}
        }
    }
}

fn uptime_lines(view: &UptimeView) -> Vec<Line<'static>> {
    let (glyph, color) = if view.operational {
        ("●", theme::GREEN)
    } else {
        ("▲", theme::YELLOW)
    };
    let mut lines = vec![Line::from(Span::styled(
        format!("  {glyph} {}", view.headline),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))];
    if !view.detail.is_empty() {
        lines.push(Line::from(""));
        lines.extend(
            view.detail
                .lines()
                .map(|l| Line::from(Span::styled(format!("  {l}"), theme::value()))),
        );
    }
    lines
}

impl Component for StatusScreen {
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::PanelUpdated(Panel::Uptime, content) => self.uptime = Arc::clone(content),
            Action::PanelUpdated(Panel::ServiceStats, content) => self.stats = Arc::clone(content),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout =
            Layout::vertical([Constraint::Percentage(35), Constraint::Percentage(65)]).split(area);
        self.render_uptime(frame, layout[0]);
        self.render_stats(frame, layout[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "status"
    }
}
