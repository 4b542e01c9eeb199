mod factory;
mod field;
mod input;
mod lifecycle;
mod options;
mod select;
mod text;

pub use factory::make_widget;
pub use field::{ComponentKind, FormField};
pub use input::InputWidget;
pub use lifecycle::{LifecycleError, Phase};
pub use options::{DisplayOptions, WidgetOptions};
pub use select::SelectKind;
pub use text::TextKind;

pub type SingleSelectInput = InputWidget<SelectKind>;
pub type TextInput = InputWidget<TextKind>;
