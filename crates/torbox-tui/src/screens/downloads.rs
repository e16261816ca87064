//! Web download and usenet screens. Both show a queue table and an add
//! form with a URL and an optional name.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};

use torbox_core::{DownloadRow, NewDownload, Panel, PanelContent, View};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::form::{Form, FormEvent};
use crate::widgets::panel;

const URL: usize = 0;
const NAME: usize = 1;

/// Which download queue a screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Queue {
    Web,
    Usenet,
}

impl Queue {
    fn view(self) -> View {
        match self {
            Self::Web => View::WebDownloads,
            Self::Usenet => View::Usenet,
        }
    }

    fn panel(self) -> Panel {
        match self {
            Self::Web => Panel::WebDownloads,
            Self::Usenet => Panel::Usenet,
        }
    }

    fn form(self) -> Form {
        match self {
            Self::Web => Form::new("Add Web Download").text("URL").text("Name (optional)"),
            Self::Usenet => Form::new("Add Usenet Download")
                .text("NZB URL")
                .text("Name (optional)"),
        }
    }

    fn submit(self, request: NewDownload) -> Action {
        match self {
            Self::Web => Action::AddWebDownload(request),
            Self::Usenet => Action::AddUsenetDownload(request),
        }
    }
}

pub struct DownloadsScreen {
    queue: Queue,
    focused: bool,
    content: Arc<PanelContent>,
    table_state: TableState,
    form: Option<Form>,
}

impl DownloadsScreen {
    pub fn new(queue: Queue) -> Self {
        Self {
            queue,
            focused: false,
            content: Arc::new(PanelContent::initial(queue.panel())),
            table_state: TableState::default().with_selected(Some(0)),
            form: None,
        }
    }

    fn rows(&self) -> &[DownloadRow] {
        match self.content.as_ref() {
            PanelContent::Downloads(rows) => rows,
            _ => &[],
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        self.table_state
            .select(Some(current.saturating_add_signed(delta).min(len - 1)));
    }

    fn render_table(&self, frame: &mut Frame, area: Rect, rows: &[DownloadRow]) {
        let header = Row::new(["Name", "Status", "Progress", "Size", "Created"])
            .style(theme::table_header());
        let body = rows.iter().map(|row| {
            Row::new(vec![
                Cell::from(row.name.clone()),
                Cell::from(Span::styled(
                    row.status.label(),
                    Style::default().fg(theme::tone_color(row.tone)),
                )),
                Cell::from(panel::progress_bar(row.progress)),
                Cell::from(row.size.clone()),
                Cell::from(row.created.clone()),
            ])
            .style(theme::table_row())
        });
        let table = Table::new(
            body,
            [
                Constraint::Min(24),
                Constraint::Length(14),
                Constraint::Length(20),
                Constraint::Length(12),
                Constraint::Length(20),
            ],
        )
        .header(header)
        .row_highlight_style(theme::table_selected())
        .highlight_symbol("▸ ");

        frame.render_stateful_widget(table, area, &mut self.table_state.clone());
    }
}

impl Component for DownloadsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(form) = self.form.as_mut() {
            return Ok(match form.handle_key(key) {
                Some(FormEvent::Submit) => Some(self.queue.submit(NewDownload {
                    url: form.value(URL).to_owned(),
                    name: form.value(NAME).to_owned(),
                })),
                Some(FormEvent::Cancel) => {
                    self.form = None;
                    None
                }
                None => None,
            });
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('g') => self.table_state.select(Some(0)),
            KeyCode::Char('G') => self.move_selection(isize::MAX),
            KeyCode::Char('a') => self.form = Some(self.queue.form()),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::PanelUpdated(panel, content) if *panel == self.queue.panel() => {
                self.content = Arc::clone(content);
                let len = self.rows().len();
                if len > 0 && self.table_state.selected().unwrap_or(0) >= len {
                    self.table_state.select(Some(len - 1));
                }
            }
            Action::FormAccepted(view) if *view == self.queue.view() => {
                self.form = None;
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let base = self.queue.view().title();
        let title = match self.content.as_ref() {
            PanelContent::Downloads(rows) => format!("{base} ({})", rows.len()),
            _ => base.to_owned(),
        };
        let block = panel::block(&title, self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
        match self.content.as_ref() {
            PanelContent::Downloads(rows) => self.render_table(frame, layout[0], rows),
            PanelContent::Placeholder(p) => panel::render_placeholder(frame, layout[0], p),
            _ => {}
        }

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" a ", theme::key_hint_key()),
                Span::styled("add  ", theme::key_hint()),
                Span::styled("j/k ", theme::key_hint_key()),
                Span::styled("move", theme::key_hint()),
            ])),
            layout[1],
        );

        if let Some(form) = &self.form {
            form.render(frame, area);
        }
    }

    fn captures_input(&self) -> bool {
        self.form.is_some()
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        match self.queue {
            Queue::Web => "webdownloads",
            Queue::Usenet => "usenet",
        }
    }
}
