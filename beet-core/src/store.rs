//! Persistence seam for the planner.
//!
//! The server implements [`PlannerStore`] on top of Postgres; [`MemoryStore`]
//! backs tests and local experiments.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;
use uuid::Uuid;

use crate::generation::GenerationState;
use crate::recipes::{RecipeDraft, RecipeRecord};
use crate::survey::SurveyProfile;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Stored data is invalid: {0}")]
    Corrupt(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Reads and writes everything the generation workflow touches.
pub trait PlannerStore: Send + Sync {
    /// Current workflow state for a user, derived from the stored flags.
    fn generation_state(&self, user_id: Uuid) -> Result<GenerationState, StoreError>;

    fn survey_profile(&self, user_id: Uuid) -> Result<Option<SurveyProfile>, StoreError>;

    /// Insert the user's profile, or replace all of its fields if one exists.
    fn upsert_survey_profile(
        &self,
        user_id: Uuid,
        profile: &SurveyProfile,
    ) -> Result<(), StoreError>;

    /// All recipes owned by the user, oldest first.
    fn recipes(&self, user_id: Uuid) -> Result<Vec<RecipeRecord>, StoreError>;

    /// Insert a generated batch and move the user to `TitlesReady`.
    ///
    /// Both writes happen together or not at all. Records come back, and are
    /// later listed by [`PlannerStore::recipes`], in the order of `drafts`.
    ///
    /// This does not re-check the current state. Two requests that both read
    /// `NotStarted` before either saves will store two batches; callers
    /// accept that race rather than serialize generation per user.
    fn save_title_batch(
        &self,
        user_id: Uuid,
        drafts: &[RecipeDraft],
    ) -> Result<Vec<RecipeRecord>, StoreError>;
}

#[derive(Debug, Default)]
struct MemoryState {
    users: HashMap<Uuid, GenerationState>,
    surveys: HashMap<Uuid, SurveyProfile>,
    recipes: Vec<RecipeRecord>,
}

/// In-memory [`PlannerStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user in `NotStarted`.
    pub fn add_user(&self) -> Uuid {
        let user_id = Uuid::new_v4();
        if let Ok(mut state) = self.state.lock() {
            state.users.insert(user_id, GenerationState::NotStarted);
        }
        user_id
    }

    /// Force a user into a given state, for setting up scenarios.
    pub fn set_state(&self, user_id: Uuid, next: GenerationState) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        match state.users.get_mut(&user_id) {
            Some(current) => {
                *current = next;
                Ok(())
            }
            None => Err(StoreError::UserNotFound(user_id)),
        }
    }

    /// Number of survey profiles stored for a user (0 or 1).
    pub fn survey_count(&self, user_id: Uuid) -> usize {
        self.lock()
            .map(|state| usize::from(state.surveys.contains_key(&user_id)))
            .unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StoreError> {
        self.state
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

impl PlannerStore for MemoryStore {
    fn generation_state(&self, user_id: Uuid) -> Result<GenerationState, StoreError> {
        self.lock()?
            .users
            .get(&user_id)
            .copied()
            .ok_or(StoreError::UserNotFound(user_id))
    }

    fn survey_profile(&self, user_id: Uuid) -> Result<Option<SurveyProfile>, StoreError> {
        Ok(self.lock()?.surveys.get(&user_id).cloned())
    }

    fn upsert_survey_profile(
        &self,
        user_id: Uuid,
        profile: &SurveyProfile,
    ) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        if !state.users.contains_key(&user_id) {
            return Err(StoreError::UserNotFound(user_id));
        }
        state.surveys.insert(user_id, profile.clone());
        Ok(())
    }

    fn recipes(&self, user_id: Uuid) -> Result<Vec<RecipeRecord>, StoreError> {
        Ok(self
            .lock()?
            .recipes
            .iter()
            .filter(|recipe| recipe.user_id == user_id)
            .cloned()
            .collect())
    }

    fn save_title_batch(
        &self,
        user_id: Uuid,
        drafts: &[RecipeDraft],
    ) -> Result<Vec<RecipeRecord>, StoreError> {
        let mut state = self.lock()?;
        if !state.users.contains_key(&user_id) {
            return Err(StoreError::UserNotFound(user_id));
        }

        let saved: Vec<RecipeRecord> = drafts
            .iter()
            .map(|draft| RecipeRecord {
                id: Uuid::new_v4(),
                user_id,
                title: draft.title.clone(),
                cuisine: draft.cuisine.clone(),
                meal_type: draft.meal_type,
                method: None,
                ingredients: None,
            })
            .collect();

        state.recipes.extend(saved.iter().cloned());
        state.users.insert(user_id, GenerationState::TitlesReady);
        Ok(saved)
    }
}
