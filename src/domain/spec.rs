use std::collections::HashSet;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::SpecError;

/// One `{value, display}` pair offered by a dropdown parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub value: String,
    pub display: String,
}

impl DropdownOption {
    pub fn new(value: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            display: display.into(),
        }
    }
}

/// How a free-text parameter parses its trimmed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ValidateAs {
    #[default]
    String,
    Int,
    Float,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextOptions {
    pub regex_constraint: Vec<String>,
    pub validate_as: ValidateAs,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub placeholder: Option<String>,
    /// Object type whose names are offered as autocomplete suggestions.
    pub suggestion_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParamKind {
    Dropdown(Vec<DropdownOption>),
    Text(TextOptions),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub id: String,
    pub ui_name: String,
    pub description: Option<String>,
    pub required: bool,
    pub multiple: bool,
    pub default_values: Vec<Value>,
    pub kind: ParamKind,
}

impl ParameterSpec {
    pub fn dropdown(id: impl Into<String>, options: Vec<DropdownOption>) -> Self {
        Self::with_kind(id.into(), ParamKind::Dropdown(options))
    }

    pub fn text(id: impl Into<String>) -> Self {
        Self::with_kind(id.into(), ParamKind::Text(TextOptions::default()))
    }

    fn with_kind(id: String, kind: ParamKind) -> Self {
        Self {
            ui_name: id.clone(),
            id,
            description: None,
            required: false,
            multiple: false,
            default_values: Vec::new(),
            kind,
        }
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn with_defaults(mut self, defaults: Vec<Value>) -> Self {
        self.default_values = defaults;
        self
    }

    pub fn with_text_options(mut self, options: TextOptions) -> Self {
        if let ParamKind::Text(current) = &mut self.kind {
            *current = options;
        }
        self
    }

    pub fn display_label(&self) -> String {
        if self.ui_name.eq_ignore_ascii_case(&self.id) {
            self.ui_name.clone()
        } else {
            format!("{} ({})", self.ui_name, self.id)
        }
    }

    /// First declared default, skipping nulls.
    pub fn first_default(&self) -> Option<&Value> {
        self.default_values.first().filter(|value| !value.is_null())
    }

    pub fn options(&self) -> Option<&[DropdownOption]> {
        match &self.kind {
            ParamKind::Dropdown(options) => Some(options),
            ParamKind::Text(_) => None,
        }
    }

    pub fn text_options(&self) -> Option<&TextOptions> {
        match &self.kind {
            ParamKind::Text(options) => Some(options),
            ParamKind::Dropdown(_) => None,
        }
    }

    /// Structural checks shared by the document parser and the widget factory.
    pub fn check(&self) -> Result<(), SpecError> {
        match &self.kind {
            ParamKind::Dropdown(options) => {
                if options.is_empty() {
                    return Err(SpecError::EmptyOptions {
                        param: self.id.clone(),
                    });
                }
                let mut seen = HashSet::with_capacity(options.len());
                for option in options {
                    // the blank choice already stands for "nothing selected"
                    if option.value.trim().is_empty() {
                        return Err(SpecError::EmptyOptionValue {
                            param: self.id.clone(),
                        });
                    }
                    if !seen.insert(option.value.as_str()) {
                        return Err(SpecError::DuplicateOption {
                            param: self.id.clone(),
                            value: option.value.clone(),
                        });
                    }
                }
            }
            ParamKind::Text(options) => {
                compile_patterns(&self.id, &options.regex_constraint)?;
            }
        }
        Ok(())
    }
}

pub(crate) fn compile_patterns(param: &str, patterns: &[String]) -> Result<Vec<Regex>, SpecError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| SpecError::InvalidRegex {
                param: param.to_string(),
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodSpec {
    pub id: String,
    pub name: String,
    pub parameters: Vec<ParameterSpec>,
}

impl MethodSpec {
    pub fn new(id: impl Into<String>, parameters: Vec<ParameterSpec>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            parameters,
        }
    }

    pub fn check(&self) -> Result<(), SpecError> {
        let mut seen = HashSet::with_capacity(self.parameters.len());
        for parameter in &self.parameters {
            if !seen.insert(parameter.id.as_str()) {
                return Err(SpecError::DuplicateParameter {
                    method: self.id.clone(),
                    param: parameter.id.clone(),
                });
            }
            parameter.check()?;
        }
        Ok(())
    }

    pub fn parameter(&self, id: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|parameter| parameter.id == id)
    }
}
