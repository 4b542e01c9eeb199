use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use tracing::debug;

use crate::cell::ParameterCell;
use crate::presentation::{self, UiContext};

use super::{
    input::{HELP_TEXT, KeyCommand, classify},
    options::UiOptions,
    status::StatusLine,
    terminal::TerminalGuard,
};

pub(crate) struct App {
    cell: ParameterCell,
    title: String,
    options: UiOptions,
    status: StatusLine,
    focus: usize,
    edited: bool,
    exit_armed: bool,
    should_quit: bool,
    submitted: bool,
}

impl App {
    pub(crate) fn new(cell: ParameterCell, title: String, options: UiOptions) -> Self {
        Self {
            cell,
            title,
            options,
            status: StatusLine::default(),
            focus: 0,
            edited: false,
            exit_armed: false,
            should_quit: false,
            submitted: false,
        }
    }

    pub(crate) fn run(&mut self) -> Result<()> {
        let mut terminal = TerminalGuard::enter()?;
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if !event::poll(self.options.tick_rate)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => self.handle_key(key)?,
                Event::Resize(width, height) => {
                    terminal.resize(Rect::new(0, 0, width, height))?;
                }
                Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
            }
        }
        Ok(())
    }

    pub(crate) fn into_submission(self) -> Option<ParameterCell> {
        self.submitted.then_some(self.cell)
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        presentation::draw(
            frame,
            &self.cell,
            &UiContext {
                title: &self.title,
                status_message: self.status.message(),
                help: self.options.show_help.then_some(HELP_TEXT),
                focus: self.focus,
            },
        );
    }

    fn focused_id(&self) -> Option<String> {
        self.cell.field_ids().nth(self.focus).map(str::to_string)
    }

    fn focused_label(&self) -> String {
        self.cell
            .method()
            .parameters
            .get(self.focus)
            .map(|spec| spec.display_label())
            .unwrap_or_default()
    }

    fn move_focus(&mut self, forward: bool) {
        let len = self.cell.len();
        if len == 0 {
            return;
        }
        self.focus = if forward {
            (self.focus + 1) % len
        } else {
            (self.focus + len - 1) % len
        };
        let label = self.focused_label();
        self.status.editing(&label);
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        let command = classify(&key);
        if command != KeyCommand::Quit {
            self.exit_armed = false;
        }
        if matches!(
            command,
            KeyCommand::Submit | KeyCommand::NextField | KeyCommand::PrevField
        ) {
            self.leave_field()?;
        }
        match command {
            KeyCommand::Submit => self.submit(),
            KeyCommand::Quit => {
                if self.options.confirm_exit && self.edited && !self.exit_armed {
                    self.exit_armed = true;
                    self.status.pending_exit();
                } else {
                    debug!("parameter entry cancelled");
                    self.should_quit = true;
                }
            }
            KeyCommand::ResetDefaults => {
                self.cell.reset_to_defaults();
                self.edited = false;
                self.status.defaults_restored();
            }
            KeyCommand::NextField => self.move_focus(true),
            KeyCommand::PrevField => self.move_focus(false),
            KeyCommand::Edit => self.edit(&key)?,
        }
        Ok(())
    }

    fn edit(&mut self, key: &KeyEvent) -> Result<()> {
        let Some(id) = self.focused_id() else {
            return Ok(());
        };
        let before = self.cell.transcript().len();
        if !self.cell.handle_key(&id, key)? {
            return Ok(());
        }
        self.edited = true;
        if self.cell.transcript().len() == before {
            let label = self.focused_label();
            self.status.editing(&label);
            return Ok(());
        }
        self.report_field(&id);
        Ok(())
    }

    /// Focus is about to move away: commit what was typed but not confirmed.
    fn leave_field(&mut self) -> Result<()> {
        let Some(id) = self.focused_id() else {
            return Ok(());
        };
        if !self.cell.commit_pending(&id)?.is_empty() {
            self.report_field(&id);
        }
        Ok(())
    }

    fn report_field(&mut self, id: &str) {
        let label = self.focused_label();
        match self.cell.validation(id) {
            Some(report) if !report.is_acceptable() => {
                let message = report
                    .error_message
                    .clone()
                    .unwrap_or_else(|| report.diagnosis.to_string());
                self.status.set_raw(format!("{label}: {message}"));
            }
            _ => self.status.value_updated(&label),
        }
    }

    fn submit(&mut self) {
        if self.cell.is_valid() {
            debug!("parameters submitted");
            self.submitted = true;
            self.should_quit = true;
            return;
        }
        let remaining = self
            .cell
            .field_ids()
            .filter(|id| {
                !self
                    .cell
                    .validation(id)
                    .is_some_and(|report| report.is_acceptable())
            })
            .count();
        self.status.issues_remaining(remaining);
        if let Some(first) = self.cell.field_ids().position(|id| {
            !self
                .cell
                .validation(id)
                .is_some_and(|report| report.is_acceptable())
        }) {
            self.focus = first;
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use serde_json::json;

    use super::*;
    use crate::cell::CellOptions;
    use crate::domain::{DropdownOption, MethodSpec, ParameterSpec};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app() -> App {
        let method = MethodSpec::new(
            "m",
            vec![
                ParameterSpec::dropdown(
                    "mode",
                    vec![DropdownOption::new("a", "A"), DropdownOption::new("b", "B")],
                )
                .with_defaults(vec![json!("a")]),
                ParameterSpec::text("name").with_required(true),
            ],
        );
        let mut cell = ParameterCell::new(method, CellOptions::default()).expect("cell");
        cell.start().expect("start");
        App::new(cell, "m".to_string(), UiOptions::default())
    }

    #[test]
    fn submit_is_refused_while_a_field_is_invalid() {
        let mut app = app();
        app.handle_key(ctrl('s')).unwrap();
        assert!(!app.should_quit);
        assert_eq!(app.focus, 1);
        assert!(app.status.message().contains("1 parameter"));

        for c in "alice".chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
        app.handle_key(key(KeyCode::Enter)).unwrap();
        app.handle_key(ctrl('s')).unwrap();
        assert!(app.should_quit);
        let cell = app.into_submission().expect("submitted");
        assert_eq!(cell.parameters(), vec![json!("a"), json!("alice")]);
    }

    #[test]
    fn typed_text_survives_tab_and_submit_without_enter() {
        let mut app = app();
        app.handle_key(key(KeyCode::Tab)).unwrap();
        for c in "alice".chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
        app.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus, 0);
        assert_eq!(app.cell.parameters()[1], json!("alice"));
        app.handle_key(ctrl('s')).unwrap();
        assert!(app.should_quit);
        let cell = app.into_submission().expect("submitted");
        assert_eq!(cell.parameters(), vec![json!("a"), json!("alice")]);
    }

    #[test]
    fn submit_commits_the_focused_buffer() {
        let mut app = app();
        app.handle_key(key(KeyCode::Tab)).unwrap();
        for c in "bob".chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
        app.handle_key(ctrl('s')).unwrap();
        let cell = app.into_submission().expect("submitted");
        assert_eq!(cell.parameters()[1], json!("bob"));
    }

    #[test]
    fn tab_wraps_focus() {
        let mut app = app();
        app.handle_key(key(KeyCode::Tab)).unwrap();
        app.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus, 0);
        app.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT))
            .unwrap();
        assert_eq!(app.focus, 1);
    }

    #[test]
    fn quitting_after_edits_needs_confirmation() {
        let mut app = app();
        app.handle_key(key(KeyCode::Down)).unwrap();
        assert_eq!(app.cell.parameters()[0], json!("b"));
        app.handle_key(ctrl('q')).unwrap();
        assert!(!app.should_quit);
        app.handle_key(ctrl('q')).unwrap();
        assert!(app.should_quit);
        assert!(app.into_submission().is_none());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut app = app();
        app.handle_key(key(KeyCode::Down)).unwrap();
        app.handle_key(ctrl('r')).unwrap();
        assert_eq!(app.cell.parameters()[0], json!("a"));
        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(app.should_quit);
    }
}
