use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use spts_core::AppError;

use crate::middleware::auth::{ManagementUser, StaffUser};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::modules::teachers::model::{
    CreateTeacherDto, Teacher, TeacherCreatedResponse, TeacherListItem, UpdatePermissionDto,
    UpdateTeacherDto,
};
use crate::modules::teachers::service::TeacherService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/teachers",
    responses(
        (status = 200, description = "All staff with login permission", body = Vec<TeacherListItem>),
        (status = 401, description = "Missing or expired token", body = ErrorResponse),
        (status = 403, description = "Staff only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, _staff))]
pub async fn get_teachers(
    State(state): State<AppState>,
    StaffUser(_staff): StaffUser,
) -> Result<Json<Vec<TeacherListItem>>, AppError> {
    let teachers = TeacherService::get_teachers(&state.db).await?;
    Ok(Json(teachers))
}

#[utoipa::path(
    post,
    path = "/teachers",
    request_body = CreateTeacherDto,
    responses(
        (status = 201, description = "Teacher created", body = TeacherCreatedResponse),
        (status = 400, description = "Duplicate employee id or email", body = ErrorResponse),
        (status = 403, description = "Principal or admin only", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, manager, dto), fields(created_by = manager.user_id()))]
pub async fn create_teacher(
    State(state): State<AppState>,
    ManagementUser(manager): ManagementUser,
    ValidatedJson(dto): ValidatedJson<CreateTeacherDto>,
) -> Result<(StatusCode, Json<TeacherCreatedResponse>), AppError> {
    let teacher_id = TeacherService::create_teacher(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(TeacherCreatedResponse {
            message: "Teacher added successfully".to_string(),
            teacher_id,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/teachers/{id}",
    params(("id" = i32, Path, description = "Teacher id")),
    responses(
        (status = 200, description = "Teacher profile", body = Teacher),
        (status = 403, description = "Staff only", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, _staff))]
pub async fn get_teacher(
    State(state): State<AppState>,
    StaffUser(_staff): StaffUser,
    Path(id): Path<i32>,
) -> Result<Json<Teacher>, AppError> {
    let teacher = TeacherService::get_teacher(&state.db, id).await?;
    Ok(Json(teacher))
}

#[utoipa::path(
    put,
    path = "/teachers/{id}",
    params(("id" = i32, Path, description = "Teacher id")),
    request_body = UpdateTeacherDto,
    responses(
        (status = 200, description = "Teacher updated", body = Teacher),
        (status = 403, description = "Principal or admin only", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, _manager, dto))]
pub async fn update_teacher(
    State(state): State<AppState>,
    ManagementUser(_manager): ManagementUser,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateTeacherDto>,
) -> Result<Json<Teacher>, AppError> {
    let teacher = TeacherService::update_teacher(&state.db, id, dto).await?;
    Ok(Json(teacher))
}

/// Enable or disable a staff login.
#[utoipa::path(
    put,
    path = "/teachers/remove/{emp_id}",
    params(("emp_id" = String, Path, description = "Employee id")),
    request_body = UpdatePermissionDto,
    responses(
        (status = 200, description = "Permission updated", body = MessageResponse),
        (status = 403, description = "Principal or admin only", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, _manager, dto))]
pub async fn update_teacher_permission(
    State(state): State<AppState>,
    ManagementUser(_manager): ManagementUser,
    Path(emp_id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdatePermissionDto>,
) -> Result<Json<MessageResponse>, AppError> {
    TeacherService::set_permission(&state.db, &emp_id, dto.permission).await?;
    Ok(Json(MessageResponse {
        message: "Teacher permission updated successfully".to_string(),
    }))
}
