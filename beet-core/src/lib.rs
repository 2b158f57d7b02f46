pub mod generation;
pub mod llm;
pub mod prompts;
pub mod recipes;
pub mod store;
pub mod survey;

pub use generation::{
    generate_recipe_batch, GenerateError, GenerateOutcome, GenerationState, GenerationWorkflow,
    InvalidFlags,
};
pub use llm::{create_provider_from_env, FakeProvider, LlmError, LlmProvider, OpenAiProvider};
pub use recipes::{
    parse_recipe_batch, MealType, RecipeDraft, RecipeParseError, RecipeRecord, MAX_FIELD_CHARS,
    RECIPE_BATCH_SIZE,
};
pub use store::{MemoryStore, PlannerStore, StoreError};
pub use survey::{
    validate_survey, Cuisine, DietaryRequirement, SurveyError, SurveyProfile, MAX_SERVINGS,
    MIN_SERVINGS,
};
