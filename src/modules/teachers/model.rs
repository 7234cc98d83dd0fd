//! Re-exports the teachers models from the `spts-models` crate.

pub use spts_models::teachers::*;
pub use spts_models::students::UpdatePermissionDto;
