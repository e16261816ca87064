//! Profile screen. Account fields on top, the raw profile document below.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use torbox_core::{Panel, PanelContent};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::panel;

pub struct ProfileScreen {
    focused: bool,
    content: Arc<PanelContent>,
    scroll: u16,
}

impl ProfileScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            content: Arc::new(PanelContent::initial(Panel::Profile)),
            scroll: 0,
        }
    }

    fn raw_line_count(&self) -> u16 {
        match self.content.as_ref() {
            PanelContent::Profile(p) => u16::try_from(p.raw_json.lines().count()).unwrap_or(u16::MAX),
            _ => 0,
        }
    }
}

impl Component for ProfileScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll = self
                    .scroll
                    .saturating_add(1)
                    .min(self.raw_line_count().saturating_sub(1));
            }
            KeyCode::Char('k') | KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Char('g') => self.scroll = 0,
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::PanelUpdated(Panel::Profile, content) = action {
            self.content = Arc::clone(content);
            self.scroll = 0;
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let profile = match self.content.as_ref() {
            PanelContent::Profile(p) => p,
            PanelContent::Placeholder(p) => {
                let block = panel::block("Profile", self.focused);
                let inner = block.inner(area);
                frame.render_widget(block, area);
                panel::render_placeholder(frame, inner, p);
                return;
            }
            _ => return,
        };

        let fields_height = u16::try_from(profile.fields.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let layout =
            Layout::vertical([Constraint::Length(fields_height), Constraint::Min(3)]).split(area);

        let fields = panel::block("Profile", self.focused);
        frame.render_widget(
            Paragraph::new(panel::labelled_lines(&profile.fields)).block(fields),
            layout[0],
        );

        let raw: Vec<Line> = profile
            .raw_json
            .lines()
            .map(|l| Line::from(Span::styled(l.to_owned(), theme::value())))
            .collect();
        frame.render_widget(
            Paragraph::new(raw)
                .block(panel::block("Raw Profile", false))
                .scroll((self.scroll, 0)),
            layout[1],
        );
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "profile"
    }
}
