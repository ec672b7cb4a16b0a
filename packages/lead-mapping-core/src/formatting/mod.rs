//! Formatting functions applied to mapped lead values.

mod args;
mod builtin;
mod registry;

pub use args::parse_function_call;
pub use builtin::{register_builtin_functions, BUILTIN_FUNCTIONS, INVALID_PHONE_NUMBER};
pub use registry::{formatting_fn, FormattingFn, FormattingRegistry};
