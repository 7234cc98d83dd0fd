//! Authentication payloads.
//!
//! Re-exported from `spts-models`; the claim types come from `spts-auth`.

pub use spts_models::auth::*;
