use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Span,
    widgets::{Paragraph, Wrap},
};

use super::super::view::UiContext;

pub fn render_footer(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>, valid: bool, compact: bool) {
    let status_area = if compact {
        area
    } else {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(2)])
            .split(area);
        let actions = ctx.help.unwrap_or(" ");
        let actions_widget = Paragraph::new(format!("Actions: {actions}"))
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(actions_widget, rows[0]);
        rows[1]
    };

    let status = if ctx.status_message.trim().is_empty() {
        "Ready"
    } else {
        ctx.status_message
    };
    let badge = if valid {
        Span::styled("[ok]", Style::default().fg(Color::Green))
    } else {
        Span::styled("[!]", Style::default().fg(Color::Red).bg(Color::Black))
    };
    let status_widget = Paragraph::new(ratatui::text::Line::from(vec![
        Span::raw("Status: "),
        Span::raw(status.to_string()),
        Span::raw(" "),
        badge,
    ]))
    .wrap(Wrap { trim: true });
    frame.render_widget(status_widget, status_area);
}
