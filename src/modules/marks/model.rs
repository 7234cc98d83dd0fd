//! Re-exports the marks models from the `spts-models` crate.

pub use spts_models::marks::*;
pub use spts_models::students::Student;
