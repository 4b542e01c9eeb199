use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;
use ulid::Ulid;

use crate::bus::Bus;
use crate::control::{Datalist, InputControl, raw_items, text_for};
use crate::domain::{ParameterSpec, SpecError};

use super::field::ComponentKind;
use super::input::{InputKind, InputWidget, KeyOutcome, SuggestionChange};
use super::options::{DisplayOptions, WidgetOptions};

/// Free-text variant with an optional autocomplete list.
#[derive(Debug, Clone)]
pub struct TextKind {
    placeholder: Option<String>,
    suggestion_type: Option<String>,
    datalist: Option<Datalist>,
}

impl TextKind {
    pub fn datalist(&self) -> Option<&Datalist> {
        self.datalist.as_ref()
    }
}

impl InputWidget<TextKind> {
    pub fn new(
        spec: ParameterSpec,
        bus: Box<dyn Bus>,
        options: &WidgetOptions,
    ) -> Result<Self, SpecError> {
        let Some(text) = spec.text_options() else {
            return Err(SpecError::NotText { param: spec.id });
        };
        let placeholder = text
            .placeholder
            .clone()
            .or_else(|| spec.first_default().map(|value| raw_items(value).join(", ")));
        let kind = TextKind {
            placeholder,
            suggestion_type: text.suggestion_type.clone(),
            datalist: None,
        };
        Self::with_kind(spec, bus, options, kind)
    }
}

impl InputKind for TextKind {
    fn component(&self) -> ComponentKind {
        ComponentKind::TextInput
    }

    fn build_control(&self, model: Option<&Value>, display: &DisplayOptions) -> InputControl {
        InputControl::Text {
            multiple: display.multiple,
            enabled: display.enabled,
            value: model
                .map(|value| text_for(value, display.multiple))
                .unwrap_or_default(),
            placeholder: self.placeholder.clone(),
            datalist: self.datalist.clone(),
        }
    }

    fn handle_key(&self, control: &mut InputControl, key: &KeyEvent) -> KeyOutcome {
        let InputControl::Text { value, .. } = control else {
            return KeyOutcome::Ignored;
        };
        match key.code {
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return KeyOutcome::Ignored;
                }
                value.push(c);
                KeyOutcome::Edited
            }
            KeyCode::Backspace => {
                value.pop();
                KeyOutcome::Edited
            }
            KeyCode::Delete => {
                value.clear();
                KeyOutcome::Edited
            }
            KeyCode::Enter => KeyOutcome::Committed,
            _ => KeyOutcome::Ignored,
        }
    }

    fn suggestion_type(&self) -> Option<&str> {
        self.suggestion_type.as_deref()
    }

    fn set_suggestions(&mut self, mut suggestions: Vec<String>) -> SuggestionChange {
        suggestions.sort();
        suggestions.dedup();
        if suggestions.is_empty() {
            return match self.datalist.take() {
                Some(_) => SuggestionChange::Cleared,
                None => SuggestionChange::Unchanged,
            };
        }
        if let Some(datalist) = self.datalist.as_mut() {
            if datalist.suggestions == suggestions {
                return SuggestionChange::Unchanged;
            }
            datalist.suggestions = suggestions;
        } else {
            self.datalist = Some(Datalist {
                id: datalist_id(),
                suggestions,
            });
        }
        SuggestionChange::Updated
    }
}

fn datalist_id() -> String {
    format!("datalist-{}", Ulid::new().to_string().to_lowercase())
}
