use crate::bus::Bus;
use crate::domain::{ParamKind, ParameterSpec, SpecError};

use super::field::FormField;
use super::options::WidgetOptions;
use super::{SingleSelectInput, TextInput};

/// Picks the widget variant for `spec`. Spec problems are fatal here.
pub fn make_widget(
    spec: ParameterSpec,
    bus: Box<dyn Bus>,
    options: &WidgetOptions,
) -> Result<Box<dyn FormField>, SpecError> {
    let widget: Box<dyn FormField> = if matches!(spec.kind, ParamKind::Dropdown(_)) {
        Box::new(SingleSelectInput::new(spec, bus, options)?)
    } else {
        Box::new(TextInput::new(spec, bus, options)?)
    };
    Ok(widget)
}
