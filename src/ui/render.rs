use crate::counter::SyncStatus;
use crate::ui::app::App;
use crate::ui::footer::footer_widget;
use crate::ui::layout::{centered_rect_by_size, layout_regions};
use crate::ui::theme::{
    ACCENT, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT, STATUS_ERROR, STATUS_OK, STATUS_PENDING,
};
use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];
const CARD_WIDTH: u16 = 52;
const CARD_HEIGHT: u16 = 17;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (body, footer) = layout_regions(area);

    frame.render_widget(Clear, body);
    let card = centered_rect_by_size(CARD_WIDTH, CARD_HEIGHT, body);
    frame.render_widget(counter_card(app), card);
    frame.render_widget(footer_widget(app, footer), footer);
}

fn counter_card(app: &App) -> Paragraph<'static> {
    let view = app.view();
    let muted = Style::default().fg(MUTED_TEXT);
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        "Optimistic Counter",
        Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "Updates show instantly, the server confirms later",
        muted,
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        view.displayed.value.to_string(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        format!("Last updated: {}", view.displayed.last_updated.label()),
        muted,
    )));
    lines.push(Line::from(Span::styled(
        format!("Total updates: {}", view.displayed.update_count),
        muted,
    )));
    lines.push(Line::from(""));
    lines.push(status_line(app));
    lines.push(Line::from(""));
    lines.push(controls_line(app));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Range: {}", view.bounds.range_label()),
        muted,
    )));
    lines.push(Line::from(Span::styled(
        format!("Server delay: {}ms", app.delay_ms()),
        muted,
    )));
    lines.push(Line::from(Span::styled(
        format!("Error rate: {:.1}%", app.failure_probability() * 100.0),
        muted,
    )));

    Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GLOBAL_BORDER)),
    )
}

fn status_line(app: &App) -> Line<'static> {
    match app.view().status() {
        SyncStatus::Pending => {
            let frame = SPINNER[app.animation_tick() as usize % SPINNER.len()];
            Line::from(Span::styled(
                format!("{} Updating server...", frame),
                Style::default().fg(STATUS_PENDING),
            ))
        }
        SyncStatus::Failed(error) => Line::from(Span::styled(
            format!("✗ {}", error),
            Style::default().fg(STATUS_ERROR),
        )),
        SyncStatus::Synced => Line::from(Span::styled(
            "✓ Synced",
            Style::default().fg(STATUS_OK),
        )),
    }
}

fn controls_line(app: &App) -> Line<'static> {
    let view = app.view();
    let idle = !view.is_pending();
    let control = |label: String, enabled: bool| {
        let style = if enabled {
            Style::default().fg(HEADER_TEXT)
        } else {
            Style::default().fg(MUTED_TEXT).add_modifier(Modifier::DIM)
        };
        Span::styled(label, style)
    };

    Line::from(vec![
        control(format!("[-{}]", app.large_step()), idle && view.can_decrement()),
        Span::raw(" "),
        control(format!("[-{}]", app.step()), idle && view.can_decrement()),
        Span::raw(" "),
        control(format!("[+{}]", app.step()), idle && view.can_increment()),
        Span::raw(" "),
        control(format!("[+{}]", app.large_step()), idle && view.can_increment()),
        Span::raw("  "),
        control("[reset]".to_string(), idle),
    ])
}
