use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use spts_core::AppError;

use crate::middleware::auth::{AuthUser, ManagementUser, StaffUser};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::modules::students::model::{
    ClassStudent, CreateStudentDto, Student, StudentCreatedResponse, StudentListItem,
    UpdatePermissionDto, UpdateStudentDto,
};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/students",
    responses(
        (status = 200, description = "All students with class and login permission", body = Vec<StudentListItem>),
        (status = 401, description = "Missing or expired token", body = ErrorResponse),
        (status = 403, description = "Staff only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _staff))]
pub async fn get_students(
    State(state): State<AppState>,
    StaffUser(_staff): StaffUser,
) -> Result<Json<Vec<StudentListItem>>, AppError> {
    let students = StudentService::get_students(&state.db).await?;
    Ok(Json(students))
}

#[utoipa::path(
    post,
    path = "/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = StudentCreatedResponse),
        (status = 400, description = "Duplicate index number or email", body = ErrorResponse),
        (status = 403, description = "Principal or admin only", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, manager, dto), fields(created_by = manager.user_id()))]
pub async fn create_student(
    State(state): State<AppState>,
    ManagementUser(manager): ManagementUser,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<StudentCreatedResponse>), AppError> {
    let student_id = StudentService::create_student(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(StudentCreatedResponse {
            message: "Student added successfully".to_string(),
            student_id,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/students/{id}",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student profile", body = Student),
        (status = 403, description = "Not staff and not the student", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Student>, AppError> {
    auth_user.ensure_can_access_student(id)?;
    let student = StudentService::get_student(&state.db, id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    put,
    path = "/students/{id}",
    params(("id" = i32, Path, description = "Student id")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 403, description = "Principal or admin only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _manager, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    ManagementUser(_manager): ManagementUser,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::update_student(&state.db, id, dto).await?;
    Ok(Json(student))
}

/// Enable or disable a student's login.
#[utoipa::path(
    put,
    path = "/students/remove/{index_number}",
    params(("index_number" = String, Path, description = "Student index number")),
    request_body = UpdatePermissionDto,
    responses(
        (status = 200, description = "Permission updated", body = MessageResponse),
        (status = 403, description = "Principal or admin only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _manager, dto))]
pub async fn update_student_permission(
    State(state): State<AppState>,
    ManagementUser(_manager): ManagementUser,
    Path(index_number): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdatePermissionDto>,
) -> Result<Json<MessageResponse>, AppError> {
    StudentService::set_permission(&state.db, &index_number, dto.permission).await?;
    Ok(Json(MessageResponse {
        message: "Student permission updated successfully".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/students/class/{class_id}",
    params(("class_id" = i32, Path, description = "Class id")),
    responses(
        (status = 200, description = "Class roster ordered by index number", body = Vec<ClassStudent>),
        (status = 403, description = "Staff only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _staff))]
pub async fn get_students_by_class(
    State(state): State<AppState>,
    StaffUser(_staff): StaffUser,
    Path(class_id): Path<i32>,
) -> Result<Json<Vec<ClassStudent>>, AppError> {
    let students = StudentService::get_students_by_class(&state.db, class_id).await?;
    Ok(Json(students))
}
