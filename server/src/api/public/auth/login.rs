use crate::api::flash::{Flash, FlashLevel, FlashRedirect};
use crate::api::public::FormPage;
use crate::api::ErrorResponse;
use crate::auth::{create_session, verify_password, AuthUser};
use crate::db::DbPool;
use crate::get_conn;
use crate::models::User;
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

const INCORRECT_CREDENTIALS: &str = "Username or Password Incorrect";

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

#[utoipa::path(
    get,
    path = "/login",
    tag = "auth",
    responses(
        (status = 200, description = "Login form", body = FormPage),
        (status = 303, description = "Already logged in, redirect home")
    )
)]
pub async fn login_page(user: Option<AuthUser>) -> impl IntoResponse {
    if user.is_some() {
        return FlashRedirect::to("/").into_response();
    }

    (
        StatusCode::OK,
        Json(FormPage {
            action: "/login",
            fields: vec!["username", "password"],
        }),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body(content = LoginRequest, example = json!({"username": "user", "password": "password"})),
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 303, description = "Missing or incorrect credentials, back to /login", body = Flash)
    )
)]
pub async fn login(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if req.username.trim().is_empty() {
        return FlashRedirect::new("/login", FlashLevel::Error, "Username is required")
            .into_response();
    }
    if req.password.is_empty() {
        return FlashRedirect::new("/login", FlashLevel::Error, "Password is required")
            .into_response();
    }

    let mut conn = get_conn!(pool);

    let user: User = match users::table
        .filter(
            diesel::dsl::sql::<diesel::sql_types::Bool>("LOWER(username) = LOWER(")
                .bind::<diesel::sql_types::Text, _>(req.username.trim())
                .sql(")"),
        )
        .select(User::as_select())
        .first(&mut conn)
    {
        Ok(u) => u,
        Err(_) => {
            return FlashRedirect::new("/login", FlashLevel::Error, INCORRECT_CREDENTIALS)
                .into_response()
        }
    };

    if !verify_password(&req.password, &user.password_hash) {
        return FlashRedirect::new("/login", FlashLevel::Error, INCORRECT_CREDENTIALS)
            .into_response();
    }

    let token = match create_session(&mut conn, user.id) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Failed to create session: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create session".to_string(),
                }),
            )
                .into_response();
        }
    };

    tracing::info!(user_id = %user.id, "User logged in");

    (StatusCode::OK, Json(LoginResponse { token })).into_response()
}
