mod format;
mod input;
mod output;

pub use format::DocumentFormat;
pub use input::{load_method_str, load_state_str, parse_document_str};
pub use output::render_document;
