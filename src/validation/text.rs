use regex::Regex;
use serde_json::Value;

use crate::domain::{SpecError, TextOptions, ValidateAs, compile_patterns};

use super::{Diagnosis, Rejection, item_text};

#[derive(Debug, Clone)]
pub struct TextRules {
    patterns: Vec<Regex>,
    validate_as: ValidateAs,
    min: Option<f64>,
    max: Option<f64>,
}

impl TextRules {
    pub fn from_options(param: &str, options: &TextOptions) -> Result<Self, SpecError> {
        Ok(Self {
            patterns: compile_patterns(param, &options.regex_constraint)?,
            validate_as: options.validate_as,
            min: options.min,
            max: options.max,
        })
    }

    pub(crate) fn parse(&self, item: &Value) -> Result<Value, Rejection> {
        let text = item_text(item);
        if let Some(pattern) = self.patterns.iter().find(|pattern| !pattern.is_match(&text)) {
            return Err(Rejection::new(
                Diagnosis::InvalidValue,
                format!("'{text}' does not match the pattern {}", pattern.as_str()),
            ));
        }

        match self.validate_as {
            ValidateAs::String => Ok(Value::String(text)),
            ValidateAs::Int => {
                let number = match item.as_i64() {
                    Some(number) => number,
                    None => text.parse::<i64>().map_err(|_| {
                        Rejection::new(
                            Diagnosis::InvalidType,
                            format!("'{text}' is not a valid integer"),
                        )
                    })?,
                };
                self.check_bounds(number as f64)?;
                Ok(Value::from(number))
            }
            ValidateAs::Float => {
                let number = match item.as_f64() {
                    Some(number) => number,
                    None => text
                        .parse::<f64>()
                        .ok()
                        .filter(|number| number.is_finite())
                        .ok_or_else(|| {
                            Rejection::new(
                                Diagnosis::InvalidType,
                                format!("'{text}' is not a valid number"),
                            )
                        })?,
                };
                self.check_bounds(number)?;
                Ok(Value::from(number))
            }
        }
    }

    fn check_bounds(&self, number: f64) -> Result<(), Rejection> {
        if let Some(min) = self.min
            && number < min
        {
            return Err(Rejection::new(
                Diagnosis::InvalidValue,
                format!("{number} is less than the minimum of {min}"),
            ));
        }
        if let Some(max) = self.max
            && number > max
        {
            return Err(Rejection::new(
                Diagnosis::InvalidValue,
                format!("{number} is greater than the maximum of {max}"),
            ));
        }
        Ok(())
    }
}
