use crate::api::flash::{Flash, FlashLevel, FlashRedirect};
use crate::auth::{bearer_token, delete_session};
use crate::db::DbPool;
use axum::{extract::State, http::HeaderMap, response::IntoResponse};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 303, description = "Session cleared, redirect to /login", body = Flash)
    ),
    security((), ("bearer_auth" = []))
)]
pub async fn logout(State(pool): State<Arc<DbPool>>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = bearer_token(&headers) {
        match pool.get() {
            Ok(mut conn) => {
                if let Err(e) = delete_session(&mut conn, token) {
                    tracing::error!("Failed to delete session: {}", e);
                }
            }
            Err(e) => tracing::error!("Failed to get DB connection for logout: {}", e),
        }
    }

    FlashRedirect::new(
        "/login",
        FlashLevel::Info,
        "You have successfully been logged out",
    )
}
