//! Shared panel chrome: bordered blocks, placeholders, label/value lists
//! and progress bars.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use torbox_core::{LabelledValue, Placeholder, PlaceholderKind};

use crate::theme;

const BAR_WIDTH: usize = 10;

pub fn block(title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            theme::border_focused()
        } else {
            theme::border_default()
        })
}

pub fn render_placeholder(frame: &mut Frame, area: Rect, placeholder: &Placeholder) {
    let style = match placeholder.kind {
        PlaceholderKind::Failed => Style::default().fg(theme::RED),
        PlaceholderKind::Connect | PlaceholderKind::Empty => theme::placeholder(),
    };
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(placeholder.message.clone(), style)),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true }),
        area,
    );
}

/// One line per item, labels padded to a common width.
pub fn labelled_lines(items: &[LabelledValue]) -> Vec<Line<'static>> {
    let width = items.iter().map(|i| i.label.chars().count()).max().unwrap_or(0);
    items
        .iter()
        .map(|item| {
            Line::from(vec![
                Span::styled(format!("  {:<width$}  ", item.label), theme::label()),
                Span::styled(item.value.clone(), theme::value()),
            ])
        })
        .collect()
}

/// Text progress bar: `[████░░░░░░]  42.0%`.
pub fn progress_bar(percent: f64) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = (0..BAR_WIDTH)
        .take_while(|i| {
            #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
            let threshold = (*i as f64 + 0.5) * 100.0 / BAR_WIDTH as f64;
            clamped >= threshold
        })
        .count();
    format!(
        "[{}{}] {clamped:>5.1}%",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled)
    )
}
