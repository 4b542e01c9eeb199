//! Declarative description of what a widget wants on screen. Widgets build an
//! [`InputControl`] from their model and hand it to a [`Surface`]; turning it
//! into markup or terminal cells is the surface's business.

mod surface;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use surface::{RecordingSurface, SharedSurface, Slot, SlotId, Surface, shared};

/// Region names of the mounted container.
pub const MAIN_PANEL: &str = "main-panel";
pub const INPUT_CONTAINER: &str = "input-container";
pub const INPUT: &str = "input";

/// Host layout the widget lives in. Affects presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Environment {
    #[default]
    Standard,
    SidePanel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLayout {
    pub environment: Environment,
    pub regions: [&'static str; 2],
}

impl PanelLayout {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            regions: [MAIN_PANEL, INPUT_CONTAINER],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub display: String,
    pub selected: bool,
}

/// Autocomplete suggestions attached to a text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datalist {
    pub id: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputControl {
    /// The first choice is always the blank entry (`value == ""`).
    Select {
        multiple: bool,
        enabled: bool,
        choices: Vec<Choice>,
        highlighted: usize,
    },
    Text {
        multiple: bool,
        enabled: bool,
        value: String,
        placeholder: Option<String>,
        datalist: Option<Datalist>,
    },
}

impl InputControl {
    pub fn is_enabled(&self) -> bool {
        match self {
            InputControl::Select { enabled, .. } | InputControl::Text { enabled, .. } => *enabled,
        }
    }

    pub fn selected_values(&self) -> Vec<&str> {
        match self {
            InputControl::Select { choices, .. } => choices
                .iter()
                .filter(|choice| choice.selected && !choice.value.is_empty())
                .map(|choice| choice.value.as_str())
                .collect(),
            InputControl::Text { .. } => Vec::new(),
        }
    }

    /// What a host would read back from the control right now.
    pub fn raw_value(&self) -> Value {
        match self {
            InputControl::Select {
                multiple: true,
                ..
            } => Value::Array(
                self.selected_values()
                    .into_iter()
                    .map(|value| Value::String(value.to_string()))
                    .collect(),
            ),
            InputControl::Select { .. } => Value::String(
                self.selected_values()
                    .first()
                    .map(|value| value.to_string())
                    .unwrap_or_default(),
            ),
            InputControl::Text {
                multiple: true,
                value,
                ..
            } => Value::Array(split_items(value).into_iter().map(Value::String).collect()),
            InputControl::Text { value, .. } => Value::String(value.clone()),
        }
    }

    /// Puts a raw value into the control the way a user edit would.
    pub fn assign_raw(&mut self, raw: &Value) {
        match self {
            InputControl::Select {
                choices,
                highlighted,
                ..
            } => {
                let wanted = raw_items(raw);
                for choice in choices.iter_mut() {
                    choice.selected = wanted.iter().any(|item| *item == choice.value);
                }
                if choices.iter().all(|choice| !choice.selected)
                    && let Some(blank) = choices.first_mut()
                {
                    blank.selected = true;
                }
                *highlighted = choices
                    .iter()
                    .position(|choice| choice.selected)
                    .unwrap_or(0);
            }
            InputControl::Text {
                multiple, value, ..
            } => *value = text_for(raw, *multiple),
        }
    }
}

/// Flattens a raw value into its scalar text items.
pub(crate) fn raw_items(raw: &Value) -> Vec<String> {
    match raw {
        Value::Null => Vec::new(),
        Value::String(text) => vec![text.clone()],
        Value::Array(items) => items.iter().flat_map(raw_items).collect(),
        other => vec![other.to_string()],
    }
}

/// Text shown in a text control for `raw`. Items of a multiple control are
/// separated by commas, so commas and backslashes inside an item are escaped
/// with a backslash.
pub(crate) fn text_for(raw: &Value, multiple: bool) -> String {
    let items = raw_items(raw);
    if !multiple {
        return items.join(", ");
    }
    items
        .iter()
        .map(|item| item.replace('\\', "\\\\").replace(',', "\\,"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Splits multiple-control text on unescaped commas. Blank items are dropped.
pub(crate) fn split_items(text: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => current.push(chars.next().unwrap_or('\\')),
            ',' => {
                let item = current.trim();
                if !item.is_empty() {
                    items.push(item.to_string());
                }
                current.clear();
            }
            other => current.push(other),
        }
    }
    let item = current.trim();
    if !item.is_empty() {
        items.push(item.to_string());
    }
    items
}
