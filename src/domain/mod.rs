mod error;
mod parser;
mod spec;

pub use error::SpecError;
pub use parser::{parse_method, parse_parameter};
pub(crate) use spec::compile_patterns;
pub use spec::{DropdownOption, MethodSpec, ParamKind, ParameterSpec, TextOptions, ValidateAs};
