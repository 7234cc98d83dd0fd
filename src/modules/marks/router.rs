use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::marks::controller::{create_marks, get_student_report};
use crate::state::AppState;

pub fn init_marks_router() -> Router<AppState> {
    Router::new()
        .route("/marks", post(create_marks))
        .route("/student/{id}", get(get_student_report))
}
