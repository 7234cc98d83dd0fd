use axum::{Json, extract::State};
use tracing::instrument;

use spts_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::subjects::model::{Subject, SubjectsByCategory};
use crate::modules::subjects::service::SubjectService;
use crate::state::AppState;

/// List every subject grouped by category.
#[utoipa::path(
    get,
    path = "/subjects",
    responses(
        (status = 200, description = "Subjects keyed by category", body = std::collections::BTreeMap<String, Vec<Subject>>),
        (status = 401, description = "Missing or expired token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_subjects(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<SubjectsByCategory>, AppError> {
    let subjects = SubjectService::get_subjects(&state.db).await?;
    Ok(Json(subjects))
}
