//! Per-field validation: turns whatever the control currently holds into a
//! [`ValidationResult`]. Nothing in here has side effects, so widgets call it
//! both for user edits and for the automatic pass after every render.

mod select;
mod text;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{ParamKind, ParameterSpec, SpecError};

pub use select::SelectRules;
pub use text::TextRules;

/// Closed classification of a validation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Diagnosis {
    Valid,
    OptionalEmpty,
    RequiredMissing,
    InvalidType,
    InvalidValue,
    Disabled,
}

impl Diagnosis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Diagnosis::Valid => "valid",
            Diagnosis::OptionalEmpty => "optional-empty",
            Diagnosis::RequiredMissing => "required-missing",
            Diagnosis::InvalidType => "invalid-type",
            Diagnosis::InvalidValue => "invalid-value",
            Diagnosis::Disabled => "disabled",
        }
    }

    /// Whether a field in this state may be submitted.
    pub fn is_acceptable(&self) -> bool {
        matches!(
            self,
            Diagnosis::Valid | Diagnosis::OptionalEmpty | Diagnosis::Disabled
        )
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub validated: bool,
    pub diagnosis: Diagnosis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ValidationResult {
    pub fn disabled() -> Self {
        Self {
            is_valid: true,
            validated: false,
            diagnosis: Diagnosis::Disabled,
            error_message: None,
            value: None,
        }
    }

    pub fn valid(value: Value) -> Self {
        Self {
            is_valid: true,
            validated: true,
            diagnosis: Diagnosis::Valid,
            error_message: None,
            value: Some(value),
        }
    }

    pub fn optional_empty() -> Self {
        Self {
            is_valid: true,
            validated: true,
            diagnosis: Diagnosis::OptionalEmpty,
            error_message: None,
            value: None,
        }
    }

    pub fn invalid(diagnosis: Diagnosis, message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            validated: true,
            diagnosis,
            error_message: Some(message.into()),
            value: None,
        }
    }
}

/// A single item refused by the type-specific rules.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Rejection {
    pub diagnosis: Diagnosis,
    pub message: String,
}

impl Rejection {
    pub(crate) fn new(diagnosis: Diagnosis, message: impl Into<String>) -> Self {
        Self {
            diagnosis,
            message: message.into(),
        }
    }
}

impl From<Rejection> for ValidationResult {
    fn from(rejection: Rejection) -> Self {
        ValidationResult::invalid(rejection.diagnosis, rejection.message)
    }
}

#[derive(Debug, Clone)]
enum RuleKind {
    Text(TextRules),
    Select(SelectRules),
}

/// Everything needed to validate one parameter, compiled once per widget.
#[derive(Debug, Clone)]
pub struct FieldRules {
    pub enabled: bool,
    pub required: bool,
    pub multiple: bool,
    kind: RuleKind,
}

impl FieldRules {
    pub fn from_spec(spec: &ParameterSpec, enabled: bool) -> Result<Self, SpecError> {
        let kind = match &spec.kind {
            ParamKind::Dropdown(options) => RuleKind::Select(SelectRules::new(options)),
            ParamKind::Text(options) => RuleKind::Text(TextRules::from_options(&spec.id, options)?),
        };
        Ok(Self {
            enabled,
            required: spec.required,
            multiple: spec.multiple,
            kind,
        })
    }

    pub fn validate(&self, raw: &Value) -> ValidationResult {
        if !self.enabled {
            return ValidationResult::disabled();
        }

        let items = match collect_items(raw, self.multiple) {
            Ok(items) => items,
            Err(rejection) => return rejection.into(),
        };

        if items.is_empty() {
            return if self.required {
                ValidationResult::invalid(Diagnosis::RequiredMissing, "value is required")
            } else {
                ValidationResult::optional_empty()
            };
        }

        let mut parsed = Vec::with_capacity(items.len());
        for item in &items {
            let outcome = match &self.kind {
                RuleKind::Text(rules) => rules.parse(item),
                RuleKind::Select(rules) => rules.parse(item),
            };
            match outcome {
                Ok(value) => parsed.push(value),
                Err(rejection) => return rejection.into(),
            }
        }

        if self.multiple {
            ValidationResult::valid(Value::Array(parsed))
        } else {
            match parsed.into_iter().next() {
                Some(value) => ValidationResult::valid(value),
                None => ValidationResult::optional_empty(),
            }
        }
    }
}

/// Normalizes the raw control value into non-blank scalar items. Strings are
/// trimmed; blanks and nulls drop out.
fn collect_items(raw: &Value, multiple: bool) -> Result<Vec<Value>, Rejection> {
    match raw {
        Value::Array(items) if multiple => {
            let mut collected = Vec::with_capacity(items.len());
            for item in items {
                if let Some(item) = scalar_item(item)? {
                    collected.push(item);
                }
            }
            Ok(collected)
        }
        Value::Array(_) => Err(Rejection::new(
            Diagnosis::InvalidType,
            "expected a single value, not a list",
        )),
        other => Ok(scalar_item(other)?.into_iter().collect()),
    }
}

fn scalar_item(value: &Value) -> Result<Option<Value>, Rejection> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(Value::String(trimmed.to_string())))
            }
        }
        Value::Number(_) => Ok(Some(value.clone())),
        Value::Bool(_) => Err(Rejection::new(
            Diagnosis::InvalidType,
            "expected text, found a boolean",
        )),
        Value::Array(_) => Err(Rejection::new(
            Diagnosis::InvalidType,
            "nested lists are not supported",
        )),
        Value::Object(_) => Err(Rejection::new(
            Diagnosis::InvalidType,
            "expected text, found an object",
        )),
    }
}

/// Text form of a scalar item, shared by both rule kinds.
pub(crate) fn item_text(item: &Value) -> String {
    match item {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DropdownOption, TextOptions, ValidateAs};
    use serde_json::json;

    fn ab_spec() -> ParameterSpec {
        ParameterSpec::dropdown(
            "choice",
            vec![DropdownOption::new("a", "A"), DropdownOption::new("b", "B")],
        )
    }

    #[test]
    fn disabled_fields_are_vacuously_valid() {
        let spec = ab_spec().with_required(true);
        let rules = FieldRules::from_spec(&spec, false).expect("rules");
        for raw in [json!(null), json!(""), json!("zzz"), json!([1, 2]), json!({"x": 1})] {
            let result = rules.validate(&raw);
            assert!(result.is_valid);
            assert!(!result.validated);
            assert_eq!(result.diagnosis, Diagnosis::Disabled);
            assert!(result.error_message.is_none());
        }
    }

    #[test]
    fn required_fields_reject_blank_input() {
        let text = FieldRules::from_spec(&ParameterSpec::text("name").with_required(true), true)
            .expect("rules");
        let select = FieldRules::from_spec(&ab_spec().with_required(true), true).expect("rules");
        for rules in [&text, &select] {
            for raw in [json!(null), json!(""), json!("   ")] {
                let result = rules.validate(&raw);
                assert!(!result.is_valid);
                assert_eq!(result.diagnosis, Diagnosis::RequiredMissing);
                assert_eq!(result.error_message.as_deref(), Some("value is required"));
            }
        }
    }

    #[test]
    fn optional_blank_is_valid_without_value() {
        let rules = FieldRules::from_spec(&ParameterSpec::text("name"), true).expect("rules");
        let result = rules.validate(&json!("  "));
        assert!(result.is_valid);
        assert_eq!(result.diagnosis, Diagnosis::OptionalEmpty);
        assert!(result.value.is_none());
    }

    #[test]
    fn text_is_trimmed() {
        let rules = FieldRules::from_spec(&ParameterSpec::text("name"), true).expect("rules");
        let result = rules.validate(&json!("  contigs  "));
        assert_eq!(result.value, Some(json!("contigs")));
        assert_eq!(result.diagnosis, Diagnosis::Valid);
    }

    #[test]
    fn single_fields_refuse_lists() {
        let rules = FieldRules::from_spec(&ab_spec(), true).expect("rules");
        let result = rules.validate(&json!(["a"]));
        assert_eq!(result.diagnosis, Diagnosis::InvalidType);
        assert!(!result.is_valid);
    }

    #[test]
    fn multiple_fields_wrap_scalars_and_drop_blanks() {
        let rules = FieldRules::from_spec(&ab_spec().with_multiple(true), true).expect("rules");
        assert_eq!(rules.validate(&json!("a")).value, Some(json!(["a"])));
        assert_eq!(
            rules.validate(&json!(["a", "", "b"])).value,
            Some(json!(["a", "b"]))
        );
        let result = rules.validate(&json!(["a", "c"]));
        assert_eq!(result.diagnosis, Diagnosis::InvalidValue);
    }

    #[test]
    fn booleans_are_the_wrong_type() {
        let rules = FieldRules::from_spec(&ParameterSpec::text("name"), true).expect("rules");
        assert_eq!(rules.validate(&json!(true)).diagnosis, Diagnosis::InvalidType);
    }

    #[test]
    fn repeated_validation_is_stable() {
        let spec = ParameterSpec::text("k").with_text_options(TextOptions {
            validate_as: ValidateAs::Int,
            ..TextOptions::default()
        });
        let rules = FieldRules::from_spec(&spec, true).expect("rules");
        let first = rules.validate(&json!("31"));
        let second = rules.validate(&json!("31"));
        assert_eq!(first, second);
        assert_eq!(first.value, Some(json!(31)));
    }

    #[test]
    fn results_serialize_with_host_field_names() {
        let result = ValidationResult::invalid(Diagnosis::RequiredMissing, "value is required");
        let value = serde_json::to_value(&result).expect("serialize");
        assert_eq!(
            value,
            json!({
                "isValid": false,
                "validated": true,
                "diagnosis": "required-missing",
                "errorMessage": "value is required"
            })
        );
    }
}
