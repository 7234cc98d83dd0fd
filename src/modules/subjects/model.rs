//! Re-exports the subjects models from the `spts-models` crate.

pub use spts_models::subjects::*;
