mod format;
mod input;
mod output;

pub use format::DocumentFormat;
pub use input::parse_values_str;
pub use output::{serialize_values, write_document};
