//! Application core — event loop, screen management, action dispatch.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use strum::IntoEnumIterator;
use throbber_widgets_tui::{Throbber, ThrobberState};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use torbox_core::{Confirmation, ConnectionStatus, Dashboard, Notification, View};

use crate::action::{Action, ConfirmAction};
use crate::clipboard::SystemClipboard;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

const MAX_TOASTS: usize = 4;

/// Top-level application state and event loop.
pub struct App {
    dashboard: Dashboard,
    /// Active view as last reported by the dashboard.
    active_view: View,
    screens: HashMap<View, Box<dyn Component>>,
    running: bool,
    connection_status: ConnectionStatus,
    busy: bool,
    throbber: ThrobberState,
    help_visible: bool,
    /// Pending confirmation dialog (blocks other input while active).
    pending_confirm: Option<ConfirmAction>,
    /// Visible toasts, oldest first, with their display timestamps.
    toasts: VecDeque<(Notification, Instant)>,
    toast_duration: Duration,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Cancellation token for the data bridge task.
    data_cancel: CancellationToken,
    /// Kept open for the whole session so copied links outlive the copy.
    clipboard: Arc<SystemClipboard>,
}

impl App {
    pub fn new(dashboard: Dashboard) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let toast_duration = dashboard.config().toast_duration;

        Self {
            dashboard,
            active_view: View::Dashboard,
            screens: create_screens().into_iter().collect(),
            running: true,
            connection_status: ConnectionStatus::default(),
            busy: false,
            throbber: ThrobberState::default(),
            help_visible: false,
            pending_confirm: None,
            toasts: VecDeque::new(),
            toast_duration,
            action_tx,
            action_rx,
            data_cancel: CancellationToken::new(),
            clipboard: Arc::new(SystemClipboard::new()),
        }
    }

    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_view) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        let cancel = self.data_cancel.clone();
        let tx = self.action_tx.clone();
        let bridge_dashboard = self.dashboard.clone();
        tokio::spawn(async move {
            crate::bridge::spawn_data_bridge(bridge_dashboard, tx, cancel).await;
        });

        // Status loads without a key; everything else shows its placeholder.
        let dashboard = self.dashboard.clone();
        tokio::spawn(async move { dashboard.activate(View::Dashboard).await });

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.data_cancel.cancel();
        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Map a key event to an action. Global keys are handled here;
    /// everything else goes to the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.pending_confirm.is_some() {
            return Ok(match key.code {
                KeyCode::Char('y' | 'Y') => Some(Action::ConfirmYes),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            });
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        let Some(screen) = self.screens.get_mut(&self.active_view) else {
            return Ok(None);
        };
        if screen.captures_input() {
            return screen.handle_key_event(key);
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            (KeyModifiers::SHIFT | KeyModifiers::NONE, KeyCode::Char('R'))
            | (KeyModifiers::NONE, KeyCode::F(5)) => return Ok(Some(Action::Refresh)),
            (KeyModifiers::NONE, KeyCode::Char('x')) => {
                return Ok(Some(Action::DismissNotification));
            }
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) => {
                let index = c.to_digit(10).and_then(|d| usize::try_from(d).ok());
                if let Some(view) = index.and_then(|i| View::iter().nth(i - 1)) {
                    return Ok(Some(Action::SwitchView(view)));
                }
            }
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchView(cycle(self.active_view, 1))));
            }
            (_, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchView(cycle(self.active_view, -1))));
            }
            _ => {}
        }

        screen.handle_key_event(key)
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Resize(..) | Action::Render => {}

            Action::Tick => {
                let ttl = self.toast_duration;
                self.toasts.retain(|(_, shown)| shown.elapsed() < ttl);
                if self.busy {
                    self.throbber.calc_next();
                }
            }

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            // ── Dashboard calls ───────────────────────────────────────
            Action::SwitchView(view) => {
                let dashboard = self.dashboard.clone();
                let view = *view;
                tokio::spawn(async move { dashboard.activate(view).await });
            }

            Action::Refresh => {
                let dashboard = self.dashboard.clone();
                tokio::spawn(async move { dashboard.refresh().await });
            }

            Action::Connect(key) => {
                let dashboard = self.dashboard.clone();
                let key = key.clone();
                tokio::spawn(async move {
                    dashboard.set_api_key(&key);
                    dashboard.test_connection().await;
                });
            }

            Action::AddTorrent(form) => {
                let (dashboard, tx, form) =
                    (self.dashboard.clone(), self.action_tx.clone(), form.clone());
                tokio::spawn(async move {
                    if dashboard.create_torrent(&form).await {
                        let _ = tx.send(Action::FormAccepted(View::Torrents));
                    }
                });
            }

            Action::AddWebDownload(form) => {
                let (dashboard, tx, form) =
                    (self.dashboard.clone(), self.action_tx.clone(), form.clone());
                tokio::spawn(async move {
                    if dashboard.create_web_download(&form).await {
                        let _ = tx.send(Action::FormAccepted(View::WebDownloads));
                    }
                });
            }

            Action::AddUsenetDownload(form) => {
                let (dashboard, tx, form) =
                    (self.dashboard.clone(), self.action_tx.clone(), form.clone());
                tokio::spawn(async move {
                    if dashboard.create_usenet_download(&form).await {
                        let _ = tx.send(Action::FormAccepted(View::Usenet));
                    }
                });
            }

            Action::RequestControl(confirm) => {
                self.pending_confirm = Some(confirm.clone());
            }

            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    debug!(torrent = %confirm.name, operation = %confirm.operation, "confirmed");
                    let dashboard = self.dashboard.clone();
                    tokio::spawn(async move {
                        dashboard
                            .control_torrent(
                                &confirm.torrent_id,
                                confirm.operation,
                                Confirmation::Granted,
                            )
                            .await;
                    });
                }
            }

            Action::ConfirmNo => self.pending_confirm = None,

            Action::RequestDownloadLink(id) => {
                let dashboard = self.dashboard.clone();
                let clipboard = Arc::clone(&self.clipboard);
                let id = id.clone();
                tokio::spawn(async move {
                    dashboard.request_download_link(&id, clipboard.as_ref()).await;
                });
            }

            // ── Dashboard state ───────────────────────────────────────
            Action::ViewChanged(view) => self.focus(*view),

            Action::BusyChanged(busy) => self.busy = *busy,

            Action::ConnectionChanged(status) => {
                self.connection_status = *status;
                self.broadcast(action)?;
            }

            // Data updates go to ALL screens so they stay in sync
            Action::PanelUpdated(..) | Action::FormAccepted(_) => self.broadcast(action)?,

            Action::Notify(n) => {
                if self.toasts.len() == MAX_TOASTS {
                    self.toasts.pop_front();
                }
                self.toasts.push_back((n.clone(), Instant::now()));
            }

            Action::DismissNotification => {
                self.toasts.pop_front();
            }
        }
        Ok(())
    }

    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn focus(&mut self, view: View) {
        if view == self.active_view {
            return;
        }
        debug!("switching view: {} → {}", self.active_view, view);
        if let Some(screen) = self.screens.get_mut(&self.active_view) {
            screen.set_focused(false);
        }
        self.active_view = view;
        if let Some(screen) = self.screens.get_mut(&view) {
            screen.set_focused(true);
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Length(1), // Tab bar
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        self.render_tab_bar(frame, layout[0]);
        if let Some(screen) = self.screens.get(&self.active_view) {
            screen.render(frame, layout[1]);
        }
        self.render_status_bar(frame, layout[2]);

        // Overlays: last = topmost
        self.render_toasts(frame, area);
        if let Some(confirm) = &self.pending_confirm {
            render_confirm_dialog(frame, area, confirm);
        }
        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = View::iter()
            .enumerate()
            .map(|(i, view)| {
                let style = if view == self.active_view {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(format!(" {} {} ", i + 1, view.title()), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                View::iter()
                    .position(|v| v == self.active_view)
                    .unwrap_or(0),
            );
        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::horizontal([Constraint::Min(1), Constraint::Length(14)]).split(area);

        let (glyph, color) = theme::connection_indicator(self.connection_status);
        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(
                format!("{glyph} {}", self.connection_status.label()),
                Style::default().fg(color),
            ),
            Span::styled(" │ ? help  R refresh  Tab next  q quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), layout[0]);

        if self.busy {
            let throbber = Throbber::default()
                .label("Loading")
                .style(theme::key_hint())
                .throbber_style(Style::default().fg(theme::CYAN));
            frame.render_stateful_widget(throbber, layout[1], &mut self.throbber.clone());
        }
    }

    /// Stack toasts upward from the bottom-right corner, newest lowest.
    fn render_toasts(&self, frame: &mut Frame, area: Rect) {
        let height = 3u16;
        let mut bottom = area.bottom().saturating_sub(1); // above status bar

        for (toast, _) in self.toasts.iter().rev() {
            if bottom < area.y + height {
                break;
            }
            let len = u16::try_from(toast.message.chars().count()).unwrap_or(u16::MAX);
            let width = len
                .saturating_add(6)
                .clamp(20, 70)
                .min(area.width.saturating_sub(2));
            let x = area.right().saturating_sub(width + 1);
            let toast_area = Rect::new(x, bottom - height, width, height);
            bottom -= height;

            let (color, icon) = theme::notification_style(toast.level);
            frame.render_widget(Clear, toast_area);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(theme::BG_PANEL));
            let line = Line::from(vec![
                Span::styled(format!(" {icon} "), Style::default().fg(color)),
                Span::styled(toast.message.as_str(), Style::default().fg(theme::TEXT)),
            ]);
            frame.render_widget(Paragraph::new(line).block(block), toast_area);
        }
    }
}

/// Next or previous view in tab order, wrapping around.
fn cycle(current: View, step: isize) -> View {
    let views: Vec<View> = View::iter().collect();
    let index = views.iter().position(|v| *v == current).unwrap_or(0);
    let next = index
        .checked_add_signed(step)
        .unwrap_or(views.len() - 1)
        % views.len();
    views.get(next).copied().unwrap_or_default()
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}

fn render_confirm_dialog(frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
    let dialog_area = centered(area, 60, 6);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(" Confirm ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::YELLOW))
        .style(Style::default().bg(theme::BG_PANEL));

    let text = vec![
        Line::from(Span::styled(format!("  {confirm}"), Style::default().fg(theme::TEXT))),
        Line::from(Span::styled(
            format!("  {}", confirm.name),
            Style::default().fg(theme::CYAN).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y ", theme::key_hint_key()),
            Span::styled("confirm    ", theme::key_hint()),
            Span::styled("n ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]),
    ];
    frame.render_widget(Paragraph::new(text).block(block), dialog_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_area = centered(area, 56, 20);
    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .style(Style::default().bg(theme::BG_PANEL));

    let section = |title: &'static str| {
        Line::from(Span::styled(format!("  {title}"), Style::default().fg(theme::CYAN)))
    };
    let entry = |key: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
            Span::styled(what, theme::key_hint()),
        ])
    };

    let help_text = vec![
        Line::from(""),
        section("Navigation"),
        entry("1-6", "Jump to view"),
        entry("Tab", "Next view"),
        entry("j/k ↑/↓", "Move up/down"),
        entry("g/G", "Top / bottom"),
        Line::from(""),
        section("Actions"),
        entry("k / c", "Edit API key / reconnect (Dashboard)"),
        entry("a", "Add torrent or download"),
        entry("s / p", "Resume / pause torrent"),
        entry("l / d", "Copy download link / delete torrent"),
        entry("R / F5", "Refresh current view"),
        entry("x", "Dismiss oldest notification"),
        Line::from(""),
        section("Global"),
        entry("?", "This help"),
        entry("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled("  Esc or ? to close", theme::key_hint())),
    ];
    frame.render_widget(Paragraph::new(help_text).block(block), help_area);
}
