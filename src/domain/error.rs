/// Fatal problems found while turning a parameter document into a widget.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("{pointer}: {message}")]
    Structure {
        pointer: String,
        message: String,
        issues: usize,
    },
    #[error("failed to decode parameter spec: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("parameter spec schema could not be compiled: {0}")]
    Schema(String),
    #[error("parameter '{param}' is a dropdown but declares no option list")]
    MissingOptions { param: String },
    #[error("parameter '{param}' has an empty option list")]
    EmptyOptions { param: String },
    #[error("parameter '{param}' has an option with an empty value")]
    EmptyOptionValue { param: String },
    #[error("parameter '{param}' lists option '{value}' more than once")]
    DuplicateOption { param: String, value: String },
    #[error("parameter '{param}' is not a free-text parameter")]
    NotText { param: String },
    #[error("parameter '{param}' has unknown field type '{field_type}'")]
    UnknownFieldType { param: String, field_type: String },
    #[error("parameter '{param}' has an invalid regex constraint '{pattern}': {source}")]
    InvalidRegex {
        param: String,
        pattern: String,
        source: regex::Error,
    },
    #[error("method '{method}' declares parameter '{param}' more than once")]
    DuplicateParameter { method: String, param: String },
}
