use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use crate::cell::FieldView;
use crate::control::InputControl;
use crate::domain::{ParamKind, ValidateAs};

const MAX_SUGGESTIONS: usize = 3;

pub fn render_fields(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    views: &[FieldView<'_>],
    focus: usize,
    compact: bool,
) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    if views.is_empty() {
        let placeholder = Paragraph::new("This method takes no parameters")
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let content_width = area.width.saturating_sub(4);
    let items: Vec<ListItem<'static>> = views
        .iter()
        .enumerate()
        .map(|(idx, view)| ListItem::new(field_lines(view, idx == focus, content_width, compact)))
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(focus.min(views.len() - 1)));

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, area, &mut list_state);
}

pub(crate) fn field_lines(
    view: &FieldView<'_>,
    is_selected: bool,
    max_width: u16,
    compact: bool,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut label = view.spec.display_label();
    if view.spec.required {
        label.push_str(" *");
    }
    let label_style = if is_selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(Span::styled(label, label_style)));

    if !compact && let Some(description) = &view.spec.description {
        for segment in wrap(description, max_width.max(8) as usize) {
            lines.push(Line::from(Span::styled(
                format!("  {segment}"),
                Style::default().fg(Color::Gray),
            )));
        }
    }

    match view.control {
        Some(control) => lines.extend(control_lines(control, is_selected, max_width)),
        None => lines.push(Line::from(Span::styled(
            "  (not rendered yet)",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    if !compact {
        lines.push(meta_line(view, is_selected));
    }
    lines.extend(error_lines(view, max_width));
    lines
}

fn control_lines(control: &InputControl, is_selected: bool, max_width: u16) -> Vec<Line<'static>> {
    match control {
        InputControl::Select {
            multiple,
            enabled,
            choices,
            highlighted,
        } => {
            let mut spans = vec![Span::raw("  ")];
            for (idx, choice) in choices.iter().enumerate().skip(1) {
                let mark = match (*multiple, choice.selected) {
                    (true, true) => "[x] ",
                    (true, false) => "[ ] ",
                    (false, true) => "(•) ",
                    (false, false) => "( ) ",
                };
                let mut style = if choice.selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                if is_selected && idx == *highlighted {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                if !enabled {
                    style = style.fg(Color::DarkGray);
                }
                spans.push(Span::styled(format!("{mark}{}", choice.display), style));
                spans.push(Span::raw("  "));
            }
            vec![Line::from(spans)]
        }
        InputControl::Text {
            enabled,
            value,
            placeholder,
            datalist,
            ..
        } => {
            let mut lines = Vec::new();
            let (text, style) = if value.is_empty() {
                (
                    placeholder.clone().unwrap_or_default(),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )
            } else if *enabled {
                (
                    value.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (value.clone(), Style::default().fg(Color::DarkGray))
            };
            let clamp_width = max_width.saturating_sub(4).max(4) as usize;
            let mut wrapped: Vec<String> = wrap(&text, clamp_width)
                .into_iter()
                .map(|segment| segment.into_owned())
                .collect();
            if wrapped.is_empty() {
                wrapped.push(String::new());
            }
            if is_selected && *enabled {
                let inner_width = wrapped
                    .iter()
                    .map(|line| UnicodeWidthStr::width(line.as_str()))
                    .max()
                    .unwrap_or(0);
                let border_style = Style::default().fg(Color::Yellow);
                let border_line = "─".repeat(inner_width.saturating_add(2));
                lines.push(Line::from(Span::styled(
                    format!("  ┌{border_line}┐"),
                    border_style,
                )));
                for segment in wrapped {
                    let padding = inner_width.saturating_sub(UnicodeWidthStr::width(segment.as_str()));
                    lines.push(Line::from(vec![
                        Span::styled("  │ ", border_style),
                        Span::styled(format!("{segment}{}", " ".repeat(padding)), style),
                        Span::styled(" │", border_style),
                    ]));
                }
                lines.push(Line::from(Span::styled(
                    format!("  └{border_line}┘"),
                    border_style,
                )));
            } else {
                for segment in wrapped {
                    lines.push(Line::from(vec![Span::raw("  "), Span::styled(segment, style)]));
                }
            }
            if let Some(datalist) = datalist {
                let shown: Vec<&str> = datalist
                    .suggestions
                    .iter()
                    .take(MAX_SUGGESTIONS)
                    .map(String::as_str)
                    .collect();
                let mut hint = format!("  suggestions: {}", shown.join(", "));
                if datalist.suggestions.len() > MAX_SUGGESTIONS {
                    hint.push_str(&format!(" … ({} more)", datalist.suggestions.len() - MAX_SUGGESTIONS));
                }
                lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::Gray))));
            }
            lines
        }
    }
}

pub(crate) fn meta_line(view: &FieldView<'_>, is_selected: bool) -> Line<'static> {
    let type_style = if is_selected {
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut meta = vec![Span::styled(
        format!("  type: {}", kind_label(&view.spec.kind, view.spec.multiple)),
        type_style,
    )];
    if let Some(control) = view.control
        && !control.is_enabled()
    {
        meta.push(Span::styled("  • disabled", Style::default().fg(Color::DarkGray)));
    } else if let Some(report) = view.validation {
        let style = if report.is_acceptable() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        };
        meta.push(Span::styled(format!("  • {}", report.diagnosis), style));
    }
    Line::from(meta)
}

fn error_lines(view: &FieldView<'_>, max_width: u16) -> Vec<Line<'static>> {
    let Some(message) = view
        .validation
        .and_then(|report| report.error_message.as_deref())
    else {
        return Vec::new();
    };
    wrap(message, max_width.saturating_sub(4).max(8) as usize)
        .into_iter()
        .map(|line| {
            Line::from(Span::styled(
                format!("    {line}"),
                Style::default().fg(Color::Red),
            ))
        })
        .collect()
}

fn kind_label(kind: &ParamKind, multiple: bool) -> String {
    let base = match kind {
        ParamKind::Dropdown(_) => "dropdown",
        ParamKind::Text(options) => match options.validate_as {
            ValidateAs::String => "text",
            ValidateAs::Int => "int",
            ValidateAs::Float => "float",
        },
    };
    if multiple {
        format!("{base}[]")
    } else {
        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::cell::{CellOptions, ParameterCell};
    use crate::domain::{DropdownOption, MethodSpec, ParameterSpec, TextOptions};

    fn cell() -> ParameterCell {
        let method = MethodSpec::new(
            "m",
            vec![
                ParameterSpec::dropdown(
                    "mode",
                    vec![DropdownOption::new("a", "Alpha"), DropdownOption::new("b", "Beta")],
                )
                .with_defaults(vec![json!("b")]),
                ParameterSpec::text("count")
                    .with_required(true)
                    .with_text_options(TextOptions {
                        validate_as: ValidateAs::Int,
                        min: Some(3.0),
                        ..TextOptions::default()
                    }),
            ],
        );
        let mut cell = ParameterCell::new(method, CellOptions::default()).expect("cell");
        cell.start().expect("start");
        cell
    }

    fn text_of(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn meta_line_selected_uses_blue_bold() {
        let cell = cell();
        let views = cell.views();
        let line = meta_line(&views[0], true);
        let span = line.spans.first().expect("type span");
        assert_eq!(span.style.fg, Some(Color::Blue));
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn meta_line_unselected_uses_gray() {
        let cell = cell();
        let views = cell.views();
        let line = meta_line(&views[1], false);
        let span = line.spans.first().expect("type span");
        assert_eq!(span.style.fg, Some(Color::DarkGray));
        assert!(span.content.contains("int"));
    }

    #[test]
    fn selected_choice_is_marked() {
        let cell = cell();
        let views = cell.views();
        let rendered = text_of(&field_lines(&views[0], false, 60, false));
        assert!(rendered.contains("(•) Beta"));
        assert!(rendered.contains("( ) Alpha"));
    }

    #[test]
    fn validation_errors_are_listed_under_the_field() {
        let mut cell = cell();
        cell.user_input("count", json!("2")).expect("input");
        let views = cell.views();
        let rendered = text_of(&field_lines(&views[1], true, 60, false));
        assert!(rendered.contains("invalid-value"));
        assert!(rendered.contains("less than the minimum"));
        assert!(rendered.contains("┌"));
    }

    #[test]
    fn compact_layout_drops_the_meta_line() {
        let cell = cell();
        let views = cell.views();
        let full = field_lines(&views[1], false, 60, false);
        let compact = field_lines(&views[1], false, 60, true);
        assert_eq!(full.len(), compact.len() + 1);
    }
}
