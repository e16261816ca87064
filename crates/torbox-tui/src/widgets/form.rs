//! Text fields and popup forms built on `tui-input`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use tui_input::{Input, InputRequest};

use crate::theme;

const MASK: char = '\u{25CF}';

// ── TextField ─────────────────────────────────────────────────────────

/// Single-line editable text, optionally masked.
#[derive(Debug, Default, Clone)]
pub struct TextField {
    input: Input,
    masked: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn masked() -> Self {
        Self {
            input: Input::default(),
            masked: true,
        }
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    /// Apply an editing key. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let request = match key.code {
            KeyCode::Char('u') if ctrl => InputRequest::DeleteLine,
            KeyCode::Char('w') if ctrl => InputRequest::DeletePrevWord,
            KeyCode::Char(_) if ctrl => return false,
            KeyCode::Char(c) => InputRequest::InsertChar(c),
            KeyCode::Backspace => InputRequest::DeletePrevChar,
            KeyCode::Delete => InputRequest::DeleteNextChar,
            KeyCode::Left => InputRequest::GoToPrevChar,
            KeyCode::Right => InputRequest::GoToNextChar,
            KeyCode::Home => InputRequest::GoToStart,
            KeyCode::End => InputRequest::GoToEnd,
            _ => return false,
        };
        self.input.handle(request);
        true
    }

    /// What the field shows: the value, or one mask glyph per character.
    pub fn display(&self) -> String {
        if self.masked {
            std::iter::repeat_n(MASK, self.value().chars().count()).collect()
        } else {
            self.value().to_owned()
        }
    }

    /// Draw the field in a bordered box. Places the terminal cursor when
    /// `active`.
    pub fn render(&self, frame: &mut Frame, area: Rect, title: &str, active: bool) {
        let block = Block::default()
            .title(format!(" {title} "))
            .title_style(if active { theme::title_style() } else { theme::label() })
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if active {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let width = usize::from(inner.width.max(1));
        let scroll = self.input.visual_scroll(width.saturating_sub(1));
        let shown: String = self.display().chars().skip(scroll).collect();
        frame.render_widget(
            Paragraph::new(Span::styled(shown, Style::default().fg(theme::CYAN))),
            inner,
        );

        if active {
            let offset = self.input.visual_cursor().saturating_sub(scroll);
            let x = inner
                .x
                .saturating_add(u16::try_from(offset).unwrap_or(u16::MAX))
                .min(inner.right().saturating_sub(1));
            frame.set_cursor_position(Position::new(x, inner.y));
        }
    }
}

// ── Form ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum FieldKind {
    Text(TextField),
    Toggle(bool),
}

#[derive(Debug, Clone)]
struct Field {
    label: &'static str,
    kind: FieldKind,
}

/// Outcome of a key press inside a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Submit,
    Cancel,
}

/// A popup form: text fields and checkboxes, Tab to move, Enter to submit.
#[derive(Debug, Clone)]
pub struct Form {
    title: &'static str,
    fields: Vec<Field>,
    focus: usize,
}

impl Form {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            fields: Vec::new(),
            focus: 0,
        }
    }

    pub fn text(mut self, label: &'static str) -> Self {
        self.fields.push(Field {
            label,
            kind: FieldKind::Text(TextField::new()),
        });
        self
    }

    pub fn toggle(mut self, label: &'static str, initial: bool) -> Self {
        self.fields.push(Field {
            label,
            kind: FieldKind::Toggle(initial),
        });
        self
    }

    /// Value of the text field at `index`; empty for anything else.
    pub fn value(&self, index: usize) -> &str {
        match self.fields.get(index).map(|f| &f.kind) {
            Some(FieldKind::Text(field)) => field.value(),
            _ => "",
        }
    }

    pub fn checked(&self, index: usize) -> bool {
        matches!(
            self.fields.get(index).map(|f| &f.kind),
            Some(FieldKind::Toggle(true))
        )
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<FormEvent> {
        match key.code {
            KeyCode::Esc => return Some(FormEvent::Cancel),
            KeyCode::Enter => return Some(FormEvent::Submit),
            KeyCode::Tab | KeyCode::Down => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),
            _ => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    match &mut field.kind {
                        FieldKind::Text(text) => {
                            text.handle_key(key);
                        }
                        FieldKind::Toggle(on) => {
                            if key.code == KeyCode::Char(' ') {
                                *on = !*on;
                            }
                        }
                    }
                }
            }
        }
        None
    }

    fn move_focus(&mut self, forward: bool) {
        let len = self.fields.len();
        if len == 0 {
            return;
        }
        self.focus = if forward {
            (self.focus + 1) % len
        } else {
            (self.focus + len - 1) % len
        };
    }

    /// Draw the form as a centered popup over `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let text_fields = self
            .fields
            .iter()
            .filter(|f| matches!(f.kind, FieldKind::Text(_)))
            .count();
        let toggles = self.fields.len() - text_fields;
        let body = u16::try_from(text_fields * 3 + toggles).unwrap_or(u16::MAX);

        let width = 64u16.min(area.width.saturating_sub(4));
        let height = body.saturating_add(4).min(area.height);
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        let popup = Rect::new(x, y, width, height);

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_PANEL));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let mut constraints: Vec<Constraint> = self
            .fields
            .iter()
            .map(|f| match f.kind {
                FieldKind::Text(_) => Constraint::Length(3),
                FieldKind::Toggle(_) => Constraint::Length(1),
            })
            .collect();
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(1));
        let rows = Layout::vertical(constraints).split(inner);

        for (i, field) in self.fields.iter().enumerate() {
            let active = i == self.focus;
            match &field.kind {
                FieldKind::Text(text) => text.render(frame, rows[i], field.label, active),
                FieldKind::Toggle(on) => {
                    let mark = if *on { "[x]" } else { "[ ]" };
                    let style = if active { theme::tab_active() } else { theme::tab_inactive() };
                    frame.render_widget(
                        Paragraph::new(Line::from(vec![
                            Span::styled(format!(" {mark} "), style),
                            Span::styled(field.label, style),
                        ])),
                        rows[i],
                    );
                }
            }
        }

        let hints = Line::from(vec![
            Span::styled(" Tab ", theme::key_hint_key()),
            Span::styled("next  ", theme::key_hint()),
            Span::styled("Space ", theme::key_hint_key()),
            Span::styled("toggle  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("submit  ", theme::key_hint()),
            Span::styled("Esc ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]);
        if let Some(last) = rows.last() {
            frame.render_widget(Paragraph::new(hints), *last);
        }
    }
}
