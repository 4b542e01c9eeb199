use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::cell::ParameterCell;
use crate::control::Environment;

use super::components::{render_fields, render_footer};

pub struct UiContext<'a> {
    pub title: &'a str,
    pub status_message: &'a str,
    pub help: Option<&'a str>,
    pub focus: usize,
}

pub fn draw(frame: &mut Frame<'_>, cell: &ParameterCell, ctx: &UiContext<'_>) {
    let compact = cell.environment() == Environment::SidePanel;
    let footer_height = if compact { 2 } else { 4 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(footer_height)])
        .split(frame.area());

    let views = cell.views();
    render_fields(frame, chunks[0], ctx.title, &views, ctx.focus, compact);
    render_footer(frame, chunks[1], ctx, cell.is_valid(), compact);
}
