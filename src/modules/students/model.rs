//! Re-exports the students models from the `spts-models` crate.

pub use spts_models::students::*;
