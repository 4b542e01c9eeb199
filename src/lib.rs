#![deny(rust_2018_idioms)]

#[cfg(feature = "tui")]
mod app;
pub mod bus;
pub mod cell;
pub mod control;
mod domain;
mod io;
#[cfg(feature = "tui")]
pub mod presentation;
pub mod validation;
pub mod widget;

#[cfg(feature = "tui")]
pub use app::{CellUi, UiOptions};
pub use cell::{CellError, CellOptions, Envelope, ParameterCell, ValidationReport};
pub use domain::{
    DropdownOption, MethodSpec, ParamKind, ParameterSpec, SpecError, TextOptions, ValidateAs,
    parse_method, parse_parameter,
};
pub use io::{DocumentFormat, load_method_str, load_state_str, parse_document_str, render_document};
pub use validation::{Diagnosis, FieldRules, ValidationResult};
pub use widget::{FormField, LifecycleError, Phase, WidgetOptions};

pub mod prelude {
    pub use super::bus::{Bus, HostBus, Inbound, Outbound, WidgetBus};
    pub use super::widget::{FormField, SingleSelectInput, TextInput, make_widget};
    pub use super::{CellOptions, ParameterCell, ParameterSpec, WidgetOptions};
    #[cfg(feature = "tui")]
    pub use super::{CellUi, UiOptions};
}
