//! The per-user recipe generation workflow.
//!
//! A user moves through three states:
//!
//! - `NotStarted`: nothing generated yet
//! - `TitlesReady`: a batch of recipe titles exists and awaits selection
//! - `MethodsReady`: full methods exist for the selected recipes
//!
//! Storage keeps these as two flags (`titles_generated`, `methods_generated`).
//! [`GenerationState`] is the only way flags are produced or interpreted, so the
//! "methods without titles" combination can't be written.
//!
//! Moving from `TitlesReady` to `MethodsReady` needs a selection step that
//! doesn't exist yet; the workflow leaves users in `TitlesReady`.

use thiserror::Error;
use uuid::Uuid;

use crate::llm::{LlmError, LlmProvider};
use crate::prompts::recipe_titles::{render_recipe_titles_prompt, RECIPE_TITLES_PROMPT_NAME};
use crate::recipes::{parse_recipe_batch, RecipeDraft, RecipeParseError, RecipeRecord};
use crate::store::{PlannerStore, StoreError};
use crate::survey::SurveyProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    NotStarted,
    TitlesReady,
    MethodsReady,
}

/// Stored flags that don't describe any state.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("methods_generated is set but titles_generated is not")]
pub struct InvalidFlags;

impl GenerationState {
    pub fn from_flags(titles_generated: bool, methods_generated: bool) -> Result<Self, InvalidFlags> {
        match (titles_generated, methods_generated) {
            (false, false) => Ok(GenerationState::NotStarted),
            (true, false) => Ok(GenerationState::TitlesReady),
            (true, true) => Ok(GenerationState::MethodsReady),
            (false, true) => Err(InvalidFlags),
        }
    }

    pub fn titles_generated(&self) -> bool {
        !matches!(self, GenerationState::NotStarted)
    }

    pub fn methods_generated(&self) -> bool {
        matches!(self, GenerationState::MethodsReady)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationState::NotStarted => "not_started",
            GenerationState::TitlesReady => "titles_ready",
            GenerationState::MethodsReady => "methods_ready",
        }
    }
}

/// What a generate request resulted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The user has no survey profile; nothing was generated.
    NeedsSurvey,
    /// A new batch was generated and saved.
    TitlesGenerated(Vec<RecipeRecord>),
    /// Titles already existed; these are the stored recipes.
    TitlesReady(Vec<RecipeRecord>),
    /// Nothing left to generate.
    MethodsReady,
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Recipe generator failed: {0}")]
    Upstream(#[from] LlmError),

    #[error("Recipe generator returned an unusable batch: {0}")]
    Parse(#[from] RecipeParseError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Ask the LLM for a batch of recipe titles matching a profile.
///
/// One request, no retries. Nothing is persisted here.
pub async fn generate_recipe_batch(
    llm: &dyn LlmProvider,
    profile: &SurveyProfile,
) -> Result<Vec<RecipeDraft>, GenerateError> {
    let prompt = render_recipe_titles_prompt(profile);

    tracing::info!(
        prompt_name = RECIPE_TITLES_PROMPT_NAME,
        provider = llm.provider_name(),
        model = llm.model_name(),
        "Requesting recipe batch"
    );

    let content = llm.complete(&prompt).await?;
    Ok(parse_recipe_batch(&content)?)
}

/// Drives one user's generation state machine.
pub struct GenerationWorkflow<'a> {
    store: &'a dyn PlannerStore,
    llm: &'a dyn LlmProvider,
}

impl<'a> GenerationWorkflow<'a> {
    pub fn new(store: &'a dyn PlannerStore, llm: &'a dyn LlmProvider) -> Self {
        Self { store, llm }
    }

    /// Current state and stored recipes, without side effects.
    pub fn overview(
        &self,
        user_id: Uuid,
    ) -> Result<(GenerationState, Vec<RecipeRecord>), StoreError> {
        let state = self.store.generation_state(user_id)?;
        let recipes = self.store.recipes(user_id)?;
        Ok((state, recipes))
    }

    /// Handle a generate request.
    ///
    /// From `NotStarted` with a survey profile this calls the LLM once and
    /// saves the batch. Failures leave the state and recipe rows untouched.
    pub async fn advance(&self, user_id: Uuid) -> Result<GenerateOutcome, GenerateError> {
        let state = self.store.generation_state(user_id)?;

        match state {
            GenerationState::MethodsReady => Ok(GenerateOutcome::MethodsReady),
            GenerationState::TitlesReady => {
                let recipes = self.store.recipes(user_id)?;
                Ok(GenerateOutcome::TitlesReady(recipes))
            }
            GenerationState::NotStarted => {
                let Some(profile) = self.store.survey_profile(user_id)? else {
                    tracing::info!(%user_id, "Generation requested before survey was completed");
                    return Ok(GenerateOutcome::NeedsSurvey);
                };

                let drafts = generate_recipe_batch(self.llm, &profile).await?;
                let saved = self.store.save_title_batch(user_id, &drafts)?;

                tracing::info!(%user_id, count = saved.len(), "Saved generated recipe titles");
                Ok(GenerateOutcome::TitlesGenerated(saved))
            }
        }
    }
}
