use axum::{
    Router,
    routing::{get, put},
};

use crate::modules::students::controller::{
    create_student, get_student, get_students, get_students_by_class, update_student,
    update_student_permission,
};
use crate::state::AppState;

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_students).post(create_student))
        .route("/{id}", get(get_student).put(update_student))
        .route("/remove/{index_number}", put(update_student_permission))
        .route("/class/{class_id}", get(get_students_by_class))
}
