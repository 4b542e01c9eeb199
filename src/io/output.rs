use anyhow::{Context, Result};
use serde::Serialize;

use super::DocumentFormat;

/// Serialize a result document in the requested format.
pub fn render_document<T: Serialize>(value: &T, format: DocumentFormat, pretty: bool) -> Result<String> {
    match format {
        DocumentFormat::Json => {
            if pretty {
                serde_json::to_string_pretty(value).context("failed to serialize JSON")
            } else {
                serde_json::to_string(value).context("failed to serialize JSON")
            }
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => serde_yaml::to_string(value).context("failed to serialize YAML"),
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => {
            let value = serde_json::to_value(value).context("failed to serialize TOML")?;
            let value = without_nulls(value);
            if pretty {
                toml::to_string_pretty(&value).context("failed to serialize TOML")
            } else {
                toml::to_string(&value).context("failed to serialize TOML")
            }
        }
    }
}

/// TOML has no null. Unset table entries are left out; unset array items
/// keep their position as the empty string, the same raw value an empty
/// control reports.
#[cfg(feature = "toml")]
fn without_nulls(value: serde_json::Value) -> serde_json::Value {
    use serde_json::Value;

    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, item)| !item.is_null())
                .map(|(key, item)| (key, without_nulls(item)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Null => Value::String(String::new()),
                    other => without_nulls(other),
                })
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn compact_json_stays_on_one_line() {
        let payload = render_document(&json!({"valid": true}), DocumentFormat::Json, false).unwrap();
        assert_eq!(payload, r#"{"valid":true}"#);
        let pretty = render_document(&json!({"valid": true}), DocumentFormat::Json, true).unwrap();
        assert!(pretty.contains('\n'));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn toml_output_skips_unset_values() {
        let summary = json!({
            "method": "m",
            "parameters": ["a", null],
            "state": {"mode": "a", "label": null},
        });
        let payload = render_document(&summary, DocumentFormat::Toml, true).unwrap();
        assert!(payload.contains("method = \"m\""));
        assert!(!payload.contains("label"));
        let parsed: toml::Value = toml::from_str(&payload).unwrap();
        assert_eq!(parsed["parameters"][1].as_str(), Some(""));
        assert_eq!(parsed["state"]["mode"].as_str(), Some("a"));
    }
}
