use crate::api::flash::{Flash, FlashLevel, FlashRedirect};
use crate::api::public::FormPage;
use crate::api::ErrorResponse;
use crate::auth::hash_password;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::NewUser;
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirmation: String,
}

impl RegisterRequest {
    /// Form-level checks that don't need the database.
    fn validate(&self) -> Result<(), &'static str> {
        if self.username.trim().is_empty() {
            return Err("Username is required");
        }
        if self.password.is_empty() || self.password != self.confirmation {
            return Err("Password Required / Passwords do not match");
        }
        Ok(())
    }
}

#[utoipa::path(
    get,
    path = "/register",
    tag = "auth",
    responses(
        (status = 200, description = "Registration form", body = FormPage)
    )
)]
pub async fn register_page() -> impl IntoResponse {
    Json(FormPage {
        action: "/register",
        fields: vec!["username", "password", "confirmation"],
    })
}

#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body(content = RegisterRequest, example = json!({"username": "user", "password": "password", "confirmation": "password"})),
    responses(
        (status = 303, description = "Registered (redirect to /login) or rejected (redirect to /register)", body = Flash),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
pub async fn register(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    if let Err(message) = req.validate() {
        return FlashRedirect::new("/register", FlashLevel::Error, message).into_response();
    }

    let mut conn = get_conn!(pool);

    let password_hash = match hash_password(&req.password) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!("Failed to hash password: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to hash password".to_string(),
                }),
            )
                .into_response();
        }
    };

    let new_user = NewUser {
        username: req.username.trim(),
        password_hash: &password_hash,
    };

    let user_id: Uuid = match diesel::insert_into(users::table)
        .values(&new_user)
        .returning(users::id)
        .get_result(&mut conn)
    {
        Ok(id) => id,
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => {
            return FlashRedirect::new("/register", FlashLevel::Error, "Username Already Taken")
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create user: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create user".to_string(),
                }),
            )
                .into_response();
        }
    };

    tracing::info!(%user_id, "User registered");

    FlashRedirect::new("/login", FlashLevel::Success, "Successfully Registered!").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, password: &str, confirmation: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            confirmation: confirmation.to_string(),
        }
    }

    #[test]
    fn test_validate() {
        assert_eq!(request("sam", "pw", "pw").validate(), Ok(()));
        assert_eq!(
            request("  ", "pw", "pw").validate(),
            Err("Username is required")
        );
        assert!(request("sam", "", "").validate().is_err());
        assert!(request("sam", "pw", "pW").validate().is_err());
    }
}
