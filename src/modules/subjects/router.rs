use axum::{Router, routing::get};

use crate::modules::subjects::controller::get_subjects;
use crate::state::AppState;

pub fn init_subjects_router() -> Router<AppState> {
    Router::new().route("/", get(get_subjects))
}
