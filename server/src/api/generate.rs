use crate::api::flash::{Flash, FlashLevel, FlashRedirect};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::store::DbPlannerStore;
use crate::AppState;
use axum::routing::get;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use beet_core::{GenerateError, GenerateOutcome, GenerationState, GenerationWorkflow, RecipeRecord};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeItem {
    pub id: Uuid,
    pub title: String,
    pub cuisine: String,
    /// "breakfast", "lunch" or "dinner"
    pub meal_type: &'static str,
}

impl From<RecipeRecord> for RecipeItem {
    fn from(record: RecipeRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            cuisine: record.cuisine,
            meal_type: record.meal_type.as_str(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GeneratePage {
    /// One of "not_started", "titles_ready", "methods_ready"
    pub state: &'static str,
    pub recipes: Vec<RecipeItem>,
}

impl GeneratePage {
    fn new(state: GenerationState, recipes: Vec<RecipeRecord>) -> Self {
        Self {
            state: state.as_str(),
            recipes: recipes.into_iter().map(RecipeItem::from).collect(),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/generate", get(show_generate).post(run_generate))
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

fn generate_error_response(user_id: Uuid, err: GenerateError) -> Response {
    match err {
        GenerateError::Upstream(e) => {
            tracing::error!(%user_id, "Recipe generation request failed: {}", e);
            error_response(
                StatusCode::BAD_GATEWAY,
                "Recipe generation failed, please try again later",
            )
        }
        GenerateError::Parse(e) => {
            tracing::error!(%user_id, "Recipe generator returned an unusable batch: {}", e);
            error_response(
                StatusCode::BAD_GATEWAY,
                "The recipe generator returned an unreadable response, please try again later",
            )
        }
        GenerateError::Store(e) => {
            tracing::error!(%user_id, "Failed to load or save recipes: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load recipes")
        }
    }
}

#[utoipa::path(
    get,
    path = "/generate",
    tag = "generate",
    responses(
        (status = 200, description = "Current generation state and saved recipes", body = GeneratePage),
        (status = 303, description = "No session, redirect to /login"),
        (status = 500, description = "Internal error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn show_generate(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let store = DbPlannerStore::new(&state.pool);
    let workflow = GenerationWorkflow::new(&store, state.llm.as_ref());

    match workflow.overview(user.id) {
        Ok((generation_state, recipes)) => (
            StatusCode::OK,
            Json(GeneratePage::new(generation_state, recipes)),
        )
            .into_response(),
        Err(e) => generate_error_response(user.id, e.into()),
    }
}

#[utoipa::path(
    post,
    path = "/generate",
    tag = "generate",
    responses(
        (status = 201, description = "A new batch of recipe titles was generated", body = GeneratePage),
        (status = 200, description = "Titles already generated; saved recipes", body = GeneratePage),
        (status = 303, description = "Survey missing (redirect to /account/survey), methods already generated (redirect to /), or no session (redirect to /login)", body = Flash),
        (status = 502, description = "Recipe generator failed; nothing was saved", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn run_generate(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let store = DbPlannerStore::new(&state.pool);
    let workflow = GenerationWorkflow::new(&store, state.llm.as_ref());

    match workflow.advance(user.id).await {
        Ok(GenerateOutcome::NeedsSurvey) => FlashRedirect::new(
            "/account/survey",
            FlashLevel::Error,
            "Please complete the survey under /account/survey",
        )
        .into_response(),
        Ok(GenerateOutcome::TitlesGenerated(recipes)) => (
            StatusCode::CREATED,
            Json(GeneratePage::new(GenerationState::TitlesReady, recipes)),
        )
            .into_response(),
        Ok(GenerateOutcome::TitlesReady(recipes)) => (
            StatusCode::OK,
            Json(GeneratePage::new(GenerationState::TitlesReady, recipes)),
        )
            .into_response(),
        Ok(GenerateOutcome::MethodsReady) => FlashRedirect::to("/").into_response(),
        Err(e) => generate_error_response(user.id, e),
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(show_generate, run_generate),
    components(schemas(GeneratePage, RecipeItem))
)]
pub struct ApiDoc;
