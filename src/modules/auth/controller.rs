use axum::Json;
use axum::extract::State;
use tracing::instrument;
use utoipa::ToSchema;

use spts_auth::AuthError;

use super::model::{LoginRequest, LoginResponse, VerifyTokenResponse};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Log in with a staff or student account and receive a session token.
///
/// Logging in again ends every earlier session of the same account.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "User name or password missing", body = ErrorResponse),
        (status = 401, description = "Invalid user name or password", body = ErrorResponse),
        (status = 403, description = "Account permission is off", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto), fields(username = %dto.username))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let outcome = state.auth.login(&dto.username, &dto.password).await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user: outcome.account,
        token: outcome.token,
    }))
}

/// Check a session token and return its claims.
#[utoipa::path(
    get,
    path = "/verify-token",
    responses(
        (status = 200, description = "Token is valid", body = VerifyTokenResponse),
        (status = 401, description = "Missing or expired token", body = ErrorResponse),
        (status = 403, description = "Invalid or superseded token", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn verify_token(auth_user: AuthUser) -> Json<VerifyTokenResponse> {
    Json(VerifyTokenResponse {
        message: "Token is valid".to_string(),
        decoded_token: auth_user.0,
    })
}
