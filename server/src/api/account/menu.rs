use crate::auth::AuthUser;
use axum::{response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountLink {
    pub label: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountPage {
    pub username: String,
    pub links: Vec<AccountLink>,
}

#[utoipa::path(
    get,
    path = "/account",
    tag = "account",
    responses(
        (status = 200, description = "Account options", body = AccountPage),
        (status = 303, description = "No session, redirect to /login")
    ),
    security(("bearer_auth" = []))
)]
pub async fn account_menu(AuthUser(user): AuthUser) -> impl IntoResponse {
    Json(AccountPage {
        username: user.username,
        links: vec![
            AccountLink {
                label: "Dietary survey",
                href: "/account/survey",
            },
            AccountLink {
                label: "Generate recipes",
                href: "/generate",
            },
            AccountLink {
                label: "Log out",
                href: "/logout",
            },
        ],
    })
}
