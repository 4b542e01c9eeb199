mod cell_ui;
mod input;
mod options;
mod runtime;
mod status;
mod terminal;

pub use cell_ui::CellUi;
pub use options::UiOptions;
