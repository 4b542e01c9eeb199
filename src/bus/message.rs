use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::{Diagnosis, ValidationResult};

/// Messages a widget pushes up to its host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Outbound {
    Changed {
        #[serde(rename = "newValue")]
        new_value: Value,
    },
    Validation {
        diagnosis: Diagnosis,
        #[serde(
            rename = "errorMessage",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        error_message: Option<String>,
    },
    Sync,
}

impl Outbound {
    pub fn validation(result: &ValidationResult) -> Self {
        Outbound::Validation {
            diagnosis: result.diagnosis,
            error_message: result.error_message.clone(),
        }
    }
}

/// Commands a host sends down to a widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Inbound {
    Update { value: Value },
    ResetToDefaults,
}

impl Inbound {
    pub fn topic(&self) -> Topic {
        match self {
            Inbound::Update { .. } => Topic::Update,
            Inbound::ResetToDefaults => Topic::ResetToDefaults,
        }
    }
}

/// Inbound message kinds a widget can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Update,
    ResetToDefaults,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outbound_wire_shapes() {
        let changed = Outbound::Changed {
            new_value: json!("b"),
        };
        assert_eq!(
            serde_json::to_value(&changed).expect("serialize"),
            json!({"type": "changed", "newValue": "b"})
        );
        let validation = Outbound::Validation {
            diagnosis: Diagnosis::Valid,
            error_message: None,
        };
        assert_eq!(
            serde_json::to_value(&validation).expect("serialize"),
            json!({"type": "validation", "diagnosis": "valid"})
        );
        assert_eq!(
            serde_json::to_value(&Outbound::Sync).expect("serialize"),
            json!({"type": "sync"})
        );
    }

    #[test]
    fn inbound_parses_host_commands() {
        let reset: Inbound =
            serde_json::from_value(json!({"type": "reset-to-defaults"})).expect("reset");
        assert_eq!(reset, Inbound::ResetToDefaults);
        assert_eq!(reset.topic(), Topic::ResetToDefaults);

        let update: Inbound =
            serde_json::from_value(json!({"type": "update", "value": ["x", "y"]})).expect("update");
        assert_eq!(
            update,
            Inbound::Update {
                value: json!(["x", "y"])
            }
        );
    }

    #[test]
    fn unknown_message_types_do_not_parse() {
        assert!(serde_json::from_value::<Inbound>(json!({"type": "sync"})).is_err());
    }
}
