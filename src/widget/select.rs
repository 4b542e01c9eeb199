use crossterm::event::{KeyCode, KeyEvent};
use serde_json::Value;

use crate::bus::Bus;
use crate::control::{Choice, InputControl, raw_items};
use crate::domain::{DropdownOption, ParameterSpec, SpecError};

use super::field::ComponentKind;
use super::input::{InputKind, InputWidget, KeyOutcome};
use super::options::{DisplayOptions, WidgetOptions};

/// Dropdown variant. `available` is fixed at construction.
#[derive(Debug, Clone)]
pub struct SelectKind {
    available: Vec<DropdownOption>,
}

impl SelectKind {
    pub fn available_values(&self) -> &[DropdownOption] {
        &self.available
    }
}

impl InputWidget<SelectKind> {
    pub fn new(
        spec: ParameterSpec,
        bus: Box<dyn Bus>,
        options: &WidgetOptions,
    ) -> Result<Self, SpecError> {
        let Some(available) = spec.options().map(<[DropdownOption]>::to_vec) else {
            return Err(SpecError::MissingOptions { param: spec.id });
        };
        spec.check()?;
        Self::with_kind(spec, bus, options, SelectKind { available })
    }
}

impl InputKind for SelectKind {
    fn component(&self) -> ComponentKind {
        ComponentKind::SingleSelect
    }

    fn build_control(&self, model: Option<&Value>, display: &DisplayOptions) -> InputControl {
        let wanted = model.map(raw_items).unwrap_or_default();
        let mut choices = Vec::with_capacity(self.available.len() + 1);
        choices.push(Choice {
            value: String::new(),
            display: String::new(),
            selected: false,
        });
        let mut any_selected = false;
        for option in &self.available {
            let selected = (display.multiple || !any_selected)
                && wanted.iter().any(|item| *item == option.value);
            any_selected |= selected;
            choices.push(Choice {
                value: option.value.clone(),
                display: option.display.clone(),
                selected,
            });
        }
        if !any_selected {
            choices[0].selected = true;
        }
        let highlighted = choices
            .iter()
            .position(|choice| choice.selected)
            .unwrap_or(0);
        InputControl::Select {
            multiple: display.multiple,
            enabled: display.enabled,
            choices,
            highlighted,
        }
    }

    fn handle_key(&self, control: &mut InputControl, key: &KeyEvent) -> KeyOutcome {
        let InputControl::Select {
            multiple,
            choices,
            highlighted,
            ..
        } = control
        else {
            return KeyOutcome::Ignored;
        };
        let len = choices.len();
        if len == 0 {
            return KeyOutcome::Ignored;
        }
        match key.code {
            KeyCode::Up | KeyCode::Left => {
                *highlighted = if *highlighted == 0 {
                    len - 1
                } else {
                    *highlighted - 1
                };
            }
            KeyCode::Down | KeyCode::Right => {
                *highlighted = (*highlighted + 1) % len;
            }
            KeyCode::Char(' ') if *multiple => {
                toggle(choices, *highlighted);
                return KeyOutcome::Committed;
            }
            _ => return KeyOutcome::Ignored,
        }
        if *multiple {
            return KeyOutcome::Edited;
        }
        for (idx, choice) in choices.iter_mut().enumerate() {
            choice.selected = idx == *highlighted;
        }
        KeyOutcome::Committed
    }
}

fn toggle(choices: &mut [Choice], index: usize) {
    if index == 0 {
        for choice in choices.iter_mut() {
            choice.selected = false;
        }
    } else if let Some(choice) = choices.get_mut(index) {
        choice.selected = !choice.selected;
    }
    let none_selected = choices.iter().skip(1).all(|choice| !choice.selected);
    if let Some(blank) = choices.first_mut() {
        blank.selected = none_selected;
    }
}
