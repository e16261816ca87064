//! Torrents screen — torrent table, per-row controls and the add form.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};

use torbox_core::{NewTorrent, Panel, PanelContent, RowAction, TorrentOperation, TorrentRow, View};

use crate::action::{Action, ConfirmAction};
use crate::component::Component;
use crate::theme;
use crate::widgets::form::{Form, FormEvent};
use crate::widgets::panel;

const MAGNET: usize = 0;
const NAME: usize = 1;
const SEED: usize = 2;
const ALLOW_ZIP: usize = 3;

fn add_form() -> Form {
    Form::new("Add Torrent")
        .text("Magnet Link")
        .text("Name (optional)")
        .toggle("Seed after download", false)
        .toggle("Allow zip", false)
}

pub struct TorrentsScreen {
    focused: bool,
    content: Arc<PanelContent>,
    table_state: TableState,
    form: Option<Form>,
}

impl TorrentsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            content: Arc::new(PanelContent::initial(Panel::Torrents)),
            table_state: TableState::default().with_selected(Some(0)),
            form: None,
        }
    }

    fn rows(&self) -> &[TorrentRow] {
        match self.content.as_ref() {
            PanelContent::Torrents(rows) => rows,
            _ => &[],
        }
    }

    fn selected(&self) -> Option<&TorrentRow> {
        self.rows().get(self.table_state.selected().unwrap_or(0))
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.table_state.select(Some(next));
    }

    /// Dispatch a row action for the selected torrent, if it supports it.
    fn row_action(&self, wanted: RowAction) -> Option<Action> {
        let row = self.selected()?;
        if !row.actions.contains(&wanted) {
            return None;
        }
        let operation = match wanted {
            RowAction::DownloadLink => return Some(Action::RequestDownloadLink(row.id.clone())),
            RowAction::Resume => TorrentOperation::Resume,
            RowAction::Pause => TorrentOperation::Pause,
            RowAction::Delete => TorrentOperation::Delete,
        };
        Some(Action::RequestControl(ConfirmAction {
            torrent_id: row.id.clone(),
            name: row.name.clone(),
            operation,
        }))
    }

    fn submit_form(&self) -> Option<Action> {
        let form = self.form.as_ref()?;
        Some(Action::AddTorrent(NewTorrent {
            magnet: form.value(MAGNET).to_owned(),
            name: form.value(NAME).to_owned(),
            seed: form.checked(SEED),
            allow_zip: form.checked(ALLOW_ZIP),
        }))
    }

    fn render_table(&self, frame: &mut Frame, area: Rect, rows: &[TorrentRow]) {
        let header = Row::new(["Name", "Size", "Progress", "Status", "Created"])
            .style(theme::table_header());
        let body = rows.iter().map(|row| {
            Row::new(vec![
                Cell::from(row.name.clone()),
                Cell::from(row.size.clone()),
                Cell::from(panel::progress_bar(row.progress)),
                Cell::from(Span::styled(
                    row.status.label(),
                    Style::default().fg(theme::tone_color(row.tone)),
                )),
                Cell::from(row.created.clone()),
            ])
            .style(theme::table_row())
        });
        let table = Table::new(
            body,
            [
                Constraint::Min(24),
                Constraint::Length(12),
                Constraint::Length(20),
                Constraint::Length(14),
                Constraint::Length(20),
            ],
        )
        .header(header)
        .row_highlight_style(theme::table_selected())
        .highlight_symbol("▸ ");

        frame.render_stateful_widget(table, area, &mut self.table_state.clone());
    }
}

impl Component for TorrentsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(form) = self.form.as_mut() {
            return Ok(match form.handle_key(key) {
                Some(FormEvent::Submit) => self.submit_form(),
                Some(FormEvent::Cancel) => {
                    self.form = None;
                    None
                }
                None => None,
            });
        }

        Ok(match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            KeyCode::Char('g') => {
                self.table_state.select(Some(0));
                None
            }
            KeyCode::Char('G') => {
                self.move_selection(isize::MAX);
                None
            }
            KeyCode::Char('a') => {
                self.form = Some(add_form());
                None
            }
            KeyCode::Char('s') => self.row_action(RowAction::Resume),
            KeyCode::Char('p') => self.row_action(RowAction::Pause),
            KeyCode::Char('l') => self.row_action(RowAction::DownloadLink),
            KeyCode::Char('d') => self.row_action(RowAction::Delete),
            _ => None,
        })
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::PanelUpdated(Panel::Torrents, content) => {
                self.content = Arc::clone(content);
                let len = self.rows().len();
                if len > 0 && self.table_state.selected().unwrap_or(0) >= len {
                    self.table_state.select(Some(len - 1));
                }
            }
            Action::FormAccepted(View::Torrents) => {
                self.form = None;
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = match self.content.as_ref() {
            PanelContent::Torrents(rows) => format!("Torrents ({})", rows.len()),
            _ => "Torrents".to_owned(),
        };
        let block = panel::block(&title, self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
        match self.content.as_ref() {
            PanelContent::Torrents(rows) => self.render_table(frame, layout[0], rows),
            PanelContent::Placeholder(p) => panel::render_placeholder(frame, layout[0], p),
            _ => {}
        }

        let hints = Line::from(vec![
            Span::styled(" a ", theme::key_hint_key()),
            Span::styled("add  ", theme::key_hint()),
            Span::styled("s ", theme::key_hint_key()),
            Span::styled(RowAction::Resume.label(), theme::key_hint()),
            Span::styled("  p ", theme::key_hint_key()),
            Span::styled(RowAction::Pause.label(), theme::key_hint()),
            Span::styled("  l ", theme::key_hint_key()),
            Span::styled(RowAction::DownloadLink.label(), theme::key_hint()),
            Span::styled("  d ", theme::key_hint_key()),
            Span::styled(RowAction::Delete.label(), theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);

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
        "torrents"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use torbox_core::{DownloadStatus, ResourceId, StatusTone};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn row(id: u64, name: &str) -> TorrentRow {
        TorrentRow {
            id: ResourceId::Number(id),
            name: name.into(),
            size: "1 GB".into(),
            progress: 50.0,
            status: DownloadStatus::Downloading,
            tone: StatusTone::Info,
            created: "N/A".into(),
            actions: vec![
                RowAction::Resume,
                RowAction::Pause,
                RowAction::DownloadLink,
                RowAction::Delete,
            ],
        }
    }

    fn loaded() -> TorrentsScreen {
        let mut screen = TorrentsScreen::new();
        let content = Arc::new(PanelContent::Torrents(vec![row(1, "a"), row(2, "b")]));
        screen
            .update(&Action::PanelUpdated(Panel::Torrents, content))
            .unwrap();
        screen
    }

    #[test]
    fn delete_asks_for_confirmation_of_selected_row() {
        let mut screen = loaded();
        screen.handle_key_event(press(KeyCode::Down)).unwrap();
        let action = screen.handle_key_event(press(KeyCode::Char('d'))).unwrap();
        match action {
            Some(Action::RequestControl(confirm)) => {
                assert_eq!(confirm.torrent_id, ResourceId::Number(2));
                assert_eq!(confirm.operation, TorrentOperation::Delete);
            }
            other => panic!("expected RequestControl, got: {other:?}"),
        }
    }

    #[test]
    fn link_goes_straight_to_request() {
        let mut screen = loaded();
        let action = screen.handle_key_event(press(KeyCode::Char('l'))).unwrap();
        assert!(matches!(action, Some(Action::RequestDownloadLink(ResourceId::Number(1)))));
    }

    #[test]
    fn row_keys_do_nothing_without_rows() {
        let mut screen = TorrentsScreen::new();
        assert!(screen.handle_key_event(press(KeyCode::Char('d'))).unwrap().is_none());
    }

    #[test]
    fn form_stays_open_until_accepted() {
        let mut screen = loaded();
        screen.handle_key_event(press(KeyCode::Char('a'))).unwrap();
        assert!(screen.captures_input());
        for c in "magnet:?xt=urn:btih:abc".chars() {
            screen.handle_key_event(press(KeyCode::Char(c))).unwrap();
        }
        let action = screen.handle_key_event(press(KeyCode::Enter)).unwrap();
        match action {
            Some(Action::AddTorrent(form)) => assert_eq!(form.magnet, "magnet:?xt=urn:btih:abc"),
            other => panic!("expected AddTorrent, got: {other:?}"),
        }
        assert!(screen.captures_input());

        screen.update(&Action::FormAccepted(View::Torrents)).unwrap();
        assert!(!screen.captures_input());
    }
}
