pub mod auth;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Describes a form the client should render.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FormPage {
    /// Where the form posts to
    pub action: &'static str,
    pub fields: Vec<&'static str>,
}

/// Returns the router for the credential lifecycle (no session required)
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            get(auth::login::login_page).post(auth::login::login),
        )
        .route("/logout", get(auth::logout::logout))
        .route(
            "/register",
            get(auth::register::register_page).post(auth::register::register),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login::login_page,
        auth::login::login,
        auth::logout::logout,
        auth::register::register_page,
        auth::register::register,
    ),
    components(schemas(
        FormPage,
        auth::login::LoginRequest,
        auth::login::LoginResponse,
        auth::register::RegisterRequest,
    ))
)]
pub struct ApiDoc;
