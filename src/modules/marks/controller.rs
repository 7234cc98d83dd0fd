use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use spts_core::AppError;

use crate::middleware::auth::{AuthUser, StaffUser};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::marks::model::{CreateMarksDto, MarksCreatedResponse, StudentReport};
use crate::modules::marks::service::MarksService;
use crate::state::AppState;
use crate::validator::{BadRequestJson, ValidatedJson};

/// Record a term mark. The caller is stored as the recording teacher.
#[utoipa::path(
    post,
    path = "/marks",
    request_body = CreateMarksDto,
    responses(
        (status = 201, description = "Marks recorded", body = MarksCreatedResponse),
        (status = 400, description = "Invalid marks or unknown student or subject", body = ErrorResponse),
        (status = 403, description = "Staff only", body = ErrorResponse),
        (status = 409, description = "Marks already recorded for this term", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Marks"
)]
#[instrument(skip(state, staff, dto), fields(teacher_id = staff.user_id()))]
pub async fn create_marks(
    State(state): State<AppState>,
    StaffUser(staff): StaffUser,
    ValidatedJson(dto): BadRequestJson<CreateMarksDto>,
) -> Result<(StatusCode, Json<MarksCreatedResponse>), AppError> {
    let marks = MarksService::create_marks(&state.db, staff.user_id(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(MarksCreatedResponse {
            message: "Marks added successfully".to_string(),
            marks_id: marks.marks_id,
            student_id: marks.student_id,
            subject_id: marks.subject_id,
            term_year: marks.term_year,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/student/{id}",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student profile with marks", body = StudentReport),
        (status = 403, description = "Not staff and not the student", body = ErrorResponse),
        (status = 404, description = "Student or marks not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Marks"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_student_report(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<StudentReport>, AppError> {
    auth_user.ensure_can_access_student(id)?;
    let report = MarksService::get_student_report(&state.db, id).await?;
    Ok(Json(report))
}
