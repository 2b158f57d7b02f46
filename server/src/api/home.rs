use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::AppState;
use axum::routing::get;
use axum::{http::StatusCode, response::IntoResponse, Json, Router};
use beet_core::GenerationState;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HomePage {
    pub username: String,
    /// One of "not_started", "titles_ready", "methods_ready"
    pub generation_state: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home).post(home))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "home",
    responses(
        (status = 200, description = "Landing page for a signed-in user", body = HomePage),
        (status = 303, description = "No session, redirect to /login")
    ),
    security(("bearer_auth" = []))
)]
pub async fn home(AuthUser(user): AuthUser) -> impl IntoResponse {
    match GenerationState::from_flags(user.titles_generated, user.methods_generated) {
        Ok(state) => (
            StatusCode::OK,
            Json(HomePage {
                username: user.username,
                generation_state: state.as_str(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(user_id = %user.id, "Invalid generation flags: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Account is in an invalid state".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[derive(OpenApi)]
#[openapi(paths(home), components(schemas(HomePage)))]
pub struct ApiDoc;
