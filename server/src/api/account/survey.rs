use crate::api::flash::{Flash, FlashLevel, FlashRedirect};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::store::DbPlannerStore;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use beet_core::{
    validate_survey, Cuisine, DietaryRequirement, PlannerStore, SurveyProfile, MAX_SERVINGS,
    MIN_SERVINGS,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

const SURVEY_PATH: &str = "/account/survey";
const INVALID_FORM_RESPONSE: &str = "Invalid Form Response";

/// A user's stored answers.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SurveyAnswers {
    pub cuisines: Vec<String>,
    pub dietary: Vec<String>,
    pub servings: u8,
}

impl From<&SurveyProfile> for SurveyAnswers {
    fn from(profile: &SurveyProfile) -> Self {
        Self {
            cuisines: profile.cuisine_labels(),
            dietary: profile.dietary_labels(),
            servings: profile.servings(),
        }
    }
}

/// Everything needed to render the survey form.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SurveyPage {
    /// The only accepted cuisine values
    pub cuisines: Vec<&'static str>,
    /// The only accepted dietary values
    pub dietary_requirements: Vec<&'static str>,
    pub min_servings: u8,
    pub max_servings: u8,
    /// Previously submitted answers, if any
    pub current: Option<SurveyAnswers>,
}

/// Servings as submitted; forms send strings, JSON clients send numbers.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ServingsField {
    Whole(i64),
    Fractional(f64),
    Text(String),
}

impl ServingsField {
    fn as_text(&self) -> String {
        match self {
            ServingsField::Whole(n) => n.to_string(),
            ServingsField::Fractional(n) => n.to_string(),
            ServingsField::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SurveyRequest {
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default)]
    pub dietary: Vec<String>,
    #[serde(default)]
    pub servings: Option<ServingsField>,
}

#[utoipa::path(
    get,
    path = "/account/survey",
    tag = "account",
    responses(
        (status = 200, description = "Survey options and current answers", body = SurveyPage),
        (status = 303, description = "No session, redirect to /login"),
        (status = 500, description = "Internal error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_survey(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let store = DbPlannerStore::new(&pool);

    let current = match store.survey_profile(user.id) {
        Ok(profile) => profile.as_ref().map(SurveyAnswers::from),
        Err(e) => {
            tracing::error!(user_id = %user.id, "Failed to load survey: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to load survey".to_string(),
                }),
            )
                .into_response();
        }
    };

    (
        StatusCode::OK,
        Json(SurveyPage {
            cuisines: Cuisine::labels(),
            dietary_requirements: DietaryRequirement::labels(),
            min_servings: MIN_SERVINGS,
            max_servings: MAX_SERVINGS,
            current,
        }),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/account/survey",
    tag = "account",
    request_body(content = SurveyRequest, example = json!({"cuisines": ["Italian", "Mexican"], "dietary": ["Vegetarian"], "servings": 4})),
    responses(
        (status = 303, description = "Saved or rejected (including malformed bodies); redirect back to the survey with a message", body = Flash),
        (status = 500, description = "Internal error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn submit_survey(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    payload: Result<Json<SurveyRequest>, JsonRejection>,
) -> impl IntoResponse {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(e) => {
            tracing::info!(user_id = %user.id, "Rejected malformed survey submission: {}", e);
            return FlashRedirect::new(SURVEY_PATH, FlashLevel::Error, INVALID_FORM_RESPONSE)
                .into_response();
        }
    };

    let servings = req
        .servings
        .as_ref()
        .map(ServingsField::as_text)
        .unwrap_or_default();

    let profile = match validate_survey(&req.cuisines, &req.dietary, &servings) {
        Ok(profile) => profile,
        Err(e) => {
            tracing::info!(user_id = %user.id, "Rejected survey submission: {}", e);
            return FlashRedirect::new(SURVEY_PATH, FlashLevel::Error, e.user_message())
                .into_response();
        }
    };

    let store = DbPlannerStore::new(&pool);
    if let Err(e) = store.upsert_survey_profile(user.id, &profile) {
        tracing::error!(user_id = %user.id, "Failed to save survey: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to save survey".to_string(),
            }),
        )
            .into_response();
    }

    FlashRedirect::new(
        SURVEY_PATH,
        FlashLevel::Info,
        "New survey information recorded",
    )
    .into_response()
}
