use axum::{
    Router,
    routing::{get, put},
};

use crate::modules::teachers::controller::{
    create_teacher, get_teacher, get_teachers, update_teacher, update_teacher_permission,
};
use crate::state::AppState;

pub fn init_teachers_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_teachers).post(create_teacher))
        .route("/{id}", get(get_teacher).put(update_teacher))
        .route("/remove/{emp_id}", put(update_teacher_permission))
}
