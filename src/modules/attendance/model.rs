//! Re-exports the attendance models from the `spts-models` crate.

pub use spts_models::attendance::*;
