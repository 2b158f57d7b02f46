pub mod menu;
pub mod survey;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /account endpoints (mounted at /account)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(menu::account_menu).post(menu::account_menu))
        .route(
            "/survey",
            get(survey::get_survey).post(survey::submit_survey),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(menu::account_menu, survey::get_survey, survey::submit_survey),
    components(schemas(
        menu::AccountPage,
        menu::AccountLink,
        survey::SurveyPage,
        survey::SurveyAnswers,
        survey::SurveyRequest,
        survey::ServingsField,
    ))
)]
pub struct ApiDoc;
