use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::role::{require_auth, require_staff};
use crate::modules::attendance::router::init_attendance_router;
use crate::modules::auth::router::init_auth_router;
use crate::modules::marks::router::init_marks_router;
use crate::modules::students::router::init_students_router;
use crate::modules::subjects::router::init_subjects_router;
use crate::modules::teachers::router::init_teachers_router;
use crate::state::AppState;

/// Builds the application router.
///
/// `/login` and `/verify-token` sit at the root. Record routes are wrapped in
/// a token guard; finer role checks happen in the handlers' extractors.
pub fn init_router(state: AppState) -> Router {
    let authenticated = |router: Router<AppState>| {
        router.route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
    };
    let staff_only = |router: Router<AppState>| {
        router.route_layer(middleware::from_fn_with_state(state.clone(), require_staff))
    };

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(init_auth_router())
        .nest("/students", authenticated(init_students_router()))
        .nest("/teachers", staff_only(init_teachers_router()))
        .nest("/subjects", authenticated(init_subjects_router()))
        .nest("/attendance", staff_only(init_attendance_router()))
        .merge(authenticated(init_marks_router()))
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
