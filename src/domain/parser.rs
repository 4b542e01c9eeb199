use std::sync::OnceLock;

use jsonschema::Validator;
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::error::SpecError;
use super::spec::{
    DropdownOption, MethodSpec, ParamKind, ParameterSpec, TextOptions, ValidateAs,
};

#[derive(Debug, Deserialize, JsonSchema)]
struct RawMethod {
    id: String,
    #[serde(default)]
    name: Option<String>,
    parameters: Vec<RawParameter>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct RawParameter {
    id: String,
    #[serde(default)]
    ui_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    field_type: Option<String>,
    #[serde(default)]
    required: bool,
    #[serde(default, rename = "multipleItems", alias = "allow_multiple")]
    multiple_items: bool,
    #[serde(default)]
    default_values: Vec<Value>,
    #[serde(default)]
    dropdown_options: Option<RawDropdownOptions>,
    #[serde(default)]
    text_options: Option<RawTextOptions>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct RawDropdownOptions {
    #[serde(default)]
    options: Option<Vec<RawOption>>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct RawOption {
    value: String,
    #[serde(default)]
    display: Option<String>,
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
struct RawTextOptions {
    #[serde(default)]
    regex_constraint: Vec<String>,
    #[serde(default)]
    validate_as: Option<ValidateAs>,
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
    #[serde(default)]
    placeholder: Option<String>,
    #[serde(default)]
    suggestion_type: Option<String>,
}

/// Parse one host-provided parameter document.
pub fn parse_parameter(value: &Value) -> Result<ParameterSpec, SpecError> {
    check_structure(parameter_validator()?, value)?;
    let raw: RawParameter = serde_json::from_value(value.clone())?;
    let spec = build_parameter(raw)?;
    spec.check()?;
    Ok(spec)
}

/// Parse a method document: `{id, name, parameters: [...]}`.
pub fn parse_method(value: &Value) -> Result<MethodSpec, SpecError> {
    check_structure(method_validator()?, value)?;
    let raw: RawMethod = serde_json::from_value(value.clone())?;
    let parameters = raw
        .parameters
        .into_iter()
        .map(build_parameter)
        .collect::<Result<Vec<_>, _>>()?;
    let method = MethodSpec {
        name: raw.name.unwrap_or_else(|| raw.id.clone()),
        id: raw.id,
        parameters,
    };
    method.check()?;
    Ok(method)
}

fn build_parameter(raw: RawParameter) -> Result<ParameterSpec, SpecError> {
    let RawParameter {
        id,
        ui_name,
        description,
        field_type,
        required,
        multiple_items,
        default_values,
        dropdown_options,
        text_options,
    } = raw;

    let kind = match field_type.as_deref() {
        Some("dropdown") => dropdown_kind(&id, dropdown_options)?,
        Some("text") => text_kind(text_options),
        Some(other) => {
            return Err(SpecError::UnknownFieldType {
                param: id,
                field_type: other.to_string(),
            });
        }
        None if dropdown_options.is_some() => dropdown_kind(&id, dropdown_options)?,
        None => text_kind(text_options),
    };

    if let ParamKind::Dropdown(options) = &kind {
        for default in &default_values {
            if let Some(text) = default.as_str()
                && !options.iter().any(|option| option.value == text)
            {
                warn!(param = %id, default = %text, "default value is not among the dropdown options");
            }
        }
    }

    Ok(ParameterSpec {
        ui_name: ui_name.unwrap_or_else(|| id.clone()),
        id,
        description,
        required,
        multiple: multiple_items,
        default_values,
        kind,
    })
}

fn dropdown_kind(param: &str, raw: Option<RawDropdownOptions>) -> Result<ParamKind, SpecError> {
    let Some(options) = raw.and_then(|raw| raw.options) else {
        return Err(SpecError::MissingOptions {
            param: param.to_string(),
        });
    };
    let options = options
        .into_iter()
        .map(|option| DropdownOption {
            display: option.display.unwrap_or_else(|| option.value.clone()),
            value: option.value,
        })
        .collect();
    Ok(ParamKind::Dropdown(options))
}

fn text_kind(raw: Option<RawTextOptions>) -> ParamKind {
    let raw = raw.unwrap_or_default();
    ParamKind::Text(TextOptions {
        regex_constraint: raw.regex_constraint,
        validate_as: raw.validate_as.unwrap_or_default(),
        min: raw.min,
        max: raw.max,
        placeholder: raw.placeholder,
        suggestion_type: raw.suggestion_type,
    })
}

fn check_structure(validator: &Validator, value: &Value) -> Result<(), SpecError> {
    let errors = validator
        .iter_errors(value)
        .map(|error| (error.instance_path.to_string(), error.to_string()))
        .collect::<Vec<_>>();
    let issues = errors.len();
    match errors.into_iter().next() {
        None => Ok(()),
        Some((pointer, message)) => Err(SpecError::Structure {
            pointer: if pointer.is_empty() {
                "<root>".to_string()
            } else {
                pointer
            },
            message,
            issues,
        }),
    }
}

fn parameter_validator() -> Result<&'static Validator, SpecError> {
    static VALIDATOR: OnceLock<Result<Validator, String>> = OnceLock::new();
    VALIDATOR
        .get_or_init(compile_schema::<RawParameter>)
        .as_ref()
        .map_err(|message| SpecError::Schema(message.clone()))
}

fn method_validator() -> Result<&'static Validator, SpecError> {
    static VALIDATOR: OnceLock<Result<Validator, String>> = OnceLock::new();
    VALIDATOR
        .get_or_init(compile_schema::<RawMethod>)
        .as_ref()
        .map_err(|message| SpecError::Schema(message.clone()))
}

fn compile_schema<T: JsonSchema>() -> Result<Validator, String> {
    let schema = serde_json::to_value(schema_for!(T)).map_err(|err| err.to_string())?;
    jsonschema::validator_for(&schema).map_err(|err| err.to_string())
}
