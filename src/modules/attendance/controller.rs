use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use spts_core::AppError;

use crate::middleware::auth::StaffUser;
use crate::modules::attendance::model::{
    AttendanceDateQuery, AttendanceRecord, ClassAttendance, CreateAttendanceDto,
};
use crate::modules::attendance::service::AttendanceService;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/attendance",
    request_body = CreateAttendanceDto,
    responses(
        (status = 201, description = "Attendance marked", body = AttendanceRecord),
        (status = 403, description = "Staff only", body = ErrorResponse),
        (status = 409, description = "Already marked for this date", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, staff, dto), fields(marked_by = staff.user_id()))]
pub async fn mark_attendance(
    State(state): State<AppState>,
    StaffUser(staff): StaffUser,
    ValidatedJson(dto): ValidatedJson<CreateAttendanceDto>,
) -> Result<(StatusCode, Json<AttendanceRecord>), AppError> {
    let record = AttendanceService::mark_attendance(&state.db, staff.user_id(), dto).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/attendance/class/{class_id}",
    params(
        ("class_id" = i32, Path, description = "Class id"),
        AttendanceDateQuery
    ),
    responses(
        (status = 200, description = "Attendance of the class on the date", body = Vec<ClassAttendance>),
        (status = 403, description = "Staff only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, _staff))]
pub async fn get_class_attendance(
    State(state): State<AppState>,
    StaffUser(_staff): StaffUser,
    Path(class_id): Path<i32>,
    Query(query): Query<AttendanceDateQuery>,
) -> Result<Json<Vec<ClassAttendance>>, AppError> {
    let rows = AttendanceService::get_class_attendance(&state.db, class_id, query.date).await?;
    Ok(Json(rows))
}
