use crate::counter::SyncStatus;
use crate::ui::app::App;
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT, STATUS_ERROR, STATUS_PENDING};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const FULL_HINTS: &str = " +/-: Step │ [/]: Step ×5 │ r: Reset │ q: Quit";
const SHORT_HINTS: &str = " +/- [/] r q";

/// Bottom bar: key hints on the left, confirmed value and version on the right.
pub fn footer_widget(app: &App, area: Rect) -> Paragraph<'static> {
    let view = app.view();
    let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);

    let (summary, summary_style) = match view.status() {
        SyncStatus::Pending => (
            format!("confirmed {} ", view.confirmed.value),
            Style::default().fg(STATUS_PENDING),
        ),
        SyncStatus::Failed(_) => (
            format!("rolled back to {} ", view.confirmed.value),
            Style::default().fg(STATUS_ERROR),
        ),
        SyncStatus::Synced => (format!("confirmed {} ", view.confirmed.value), text_style),
    };
    let version = format!("│ v{} ", VERSION);

    // Box-drawing separators are multi-byte, so widths are counted in chars
    let content_width = area.width.saturating_sub(2) as usize;
    let right_width = summary.chars().count() + version.chars().count();
    let hints = if FULL_HINTS.chars().count() + right_width <= content_width {
        FULL_HINTS
    } else {
        SHORT_HINTS
    };
    let padding = content_width
        .saturating_sub(hints.chars().count())
        .saturating_sub(right_width);

    let line = Line::from(vec![
        Span::styled(hints, text_style),
        Span::styled(" ".repeat(padding), text_style),
        Span::styled(summary, summary_style),
        Span::styled(version, text_style),
    ]);

    Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GLOBAL_BORDER)),
    )
}
