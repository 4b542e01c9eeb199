use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use serde_json::Value;

use crate::domain::{MethodSpec, parse_method};

use super::DocumentFormat;

/// Parse structured data in any supported format into a `serde_json::Value`.
pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(contents).with_context(|| "failed to parse JSON document")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(contents).with_context(|| "failed to parse YAML document")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => contents
            .parse::<toml::Value>()
            .with_context(|| "failed to parse TOML document")
            .and_then(|value| {
                serde_json::to_value(value).context("failed to convert TOML to JSON")
            }),
    }
}

/// Parse and check a method document.
pub fn load_method_str(contents: &str, format: DocumentFormat) -> Result<MethodSpec> {
    let document = parse_document_str(contents, format)?;
    let method = parse_method(&document).context("invalid method document")?;
    Ok(method)
}

/// Parse a saved cell state: an object keyed by parameter id.
pub fn load_state_str(contents: &str, format: DocumentFormat) -> Result<IndexMap<String, Value>> {
    let document = parse_document_str(contents, format)?;
    let Value::Object(map) = document else {
        bail!("saved state must be an object keyed by parameter id");
    };
    Ok(map.into_iter().collect())
}
