use serde_json::Value;

use crate::domain::DropdownOption;

use super::{Diagnosis, Rejection, item_text};

/// Membership check against the dropdown's option values.
#[derive(Debug, Clone)]
pub struct SelectRules {
    values: Vec<String>,
}

impl SelectRules {
    pub fn new(options: &[DropdownOption]) -> Self {
        Self {
            values: options.iter().map(|option| option.value.clone()).collect(),
        }
    }

    pub(crate) fn parse(&self, item: &Value) -> Result<Value, Rejection> {
        let text = item_text(item);
        if self.values.iter().any(|value| *value == text) {
            Ok(Value::String(text))
        } else {
            Err(Rejection::new(
                Diagnosis::InvalidValue,
                format!("'{text}' is not one of the available options"),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_listed_values_pass() {
        let rules = SelectRules::new(&[
            DropdownOption::new("a", "A"),
            DropdownOption::new("b", "B"),
        ]);
        assert_eq!(rules.parse(&json!("b")), Ok(json!("b")));
        let rejection = rules.parse(&json!("B")).expect_err("display is not a value");
        assert_eq!(rejection.diagnosis, Diagnosis::InvalidValue);
    }
}
