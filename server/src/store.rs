//! Postgres-backed planner store.

use beet_core::{
    GenerationState, MealType, PlannerStore, RecipeDraft, RecipeRecord, StoreError, SurveyProfile,
};
use diesel::prelude::*;
use diesel::upsert::excluded;
use uuid::Uuid;

use crate::db::DbPool;
use crate::models::{NewRecipe, NewSurvey, Recipe, Survey};
use crate::schema::{recipes, surveys, users};

fn backend<E: std::fmt::Display>(err: E) -> StoreError {
    StoreError::Backend(err.to_string())
}

/// Planner store reading and writing the users, surveys and recipes tables.
pub struct DbPlannerStore<'a> {
    pool: &'a DbPool,
}

impl<'a> DbPlannerStore<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }
}

impl TryFrom<Recipe> for RecipeRecord {
    type Error = StoreError;

    fn try_from(row: Recipe) -> Result<Self, Self::Error> {
        let meal_type = MealType::from_str(&row.meal_type).ok_or_else(|| {
            StoreError::Corrupt(format!(
                "recipe {} has meal type {:?}",
                row.id, row.meal_type
            ))
        })?;

        Ok(RecipeRecord {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            cuisine: row.cuisine,
            meal_type,
            method: row.method,
            ingredients: row.ingredients,
        })
    }
}

impl PlannerStore for DbPlannerStore<'_> {
    fn generation_state(&self, user_id: Uuid) -> Result<GenerationState, StoreError> {
        let mut conn = self.pool.get().map_err(backend)?;

        let (titles_generated, methods_generated): (bool, bool) = users::table
            .find(user_id)
            .select((users::titles_generated, users::methods_generated))
            .first(&mut conn)
            .optional()
            .map_err(backend)?
            .ok_or(StoreError::UserNotFound(user_id))?;

        GenerationState::from_flags(titles_generated, methods_generated)
            .map_err(|e| StoreError::Corrupt(format!("user {}: {}", user_id, e)))
    }

    fn survey_profile(&self, user_id: Uuid) -> Result<Option<SurveyProfile>, StoreError> {
        let mut conn = self.pool.get().map_err(backend)?;

        let Some(survey) = surveys::table
            .find(user_id)
            .select(Survey::as_select())
            .first(&mut conn)
            .optional()
            .map_err(backend)?
        else {
            return Ok(None);
        };

        let cuisines: Vec<String> = survey.cuisines.into_iter().flatten().collect();
        let dietary: Vec<String> = survey.dietary.into_iter().flatten().collect();

        SurveyProfile::from_stored(&cuisines, &dietary, survey.servings)
            .map(Some)
            .map_err(|e| StoreError::Corrupt(format!("survey for user {}: {}", user_id, e)))
    }

    fn upsert_survey_profile(
        &self,
        user_id: Uuid,
        profile: &SurveyProfile,
    ) -> Result<(), StoreError> {
        let mut conn = self.pool.get().map_err(backend)?;

        let cuisines: Vec<Option<String>> = profile.cuisine_labels().into_iter().map(Some).collect();
        let dietary: Vec<Option<String>> = profile.dietary_labels().into_iter().map(Some).collect();

        diesel::insert_into(surveys::table)
            .values(NewSurvey {
                user_id,
                cuisines: &cuisines,
                dietary: &dietary,
                servings: i32::from(profile.servings()),
            })
            .on_conflict(surveys::user_id)
            .do_update()
            .set((
                surveys::cuisines.eq(excluded(surveys::cuisines)),
                surveys::dietary.eq(excluded(surveys::dietary)),
                surveys::servings.eq(excluded(surveys::servings)),
                surveys::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .map_err(backend)?;

        Ok(())
    }

    fn recipes(&self, user_id: Uuid) -> Result<Vec<RecipeRecord>, StoreError> {
        let mut conn = self.pool.get().map_err(backend)?;

        recipes::table
            .filter(recipes::user_id.eq(user_id))
            .order((recipes::created_at.asc(), recipes::batch_index.asc()))
            .select(Recipe::as_select())
            .load(&mut conn)
            .map_err(backend)?
            .into_iter()
            .map(RecipeRecord::try_from)
            .collect()
    }

    fn save_title_batch(
        &self,
        user_id: Uuid,
        drafts: &[RecipeDraft],
    ) -> Result<Vec<RecipeRecord>, StoreError> {
        let mut conn = self.pool.get().map_err(backend)?;

        let rows: Vec<NewRecipe> = drafts
            .iter()
            .enumerate()
            .map(|(index, draft)| {
                Ok(NewRecipe {
                    user_id,
                    title: &draft.title,
                    cuisine: &draft.cuisine,
                    meal_type: draft.meal_type.as_str(),
                    batch_index: i16::try_from(index).map_err(backend)?,
                })
            })
            .collect::<Result<_, StoreError>>()?;

        let next = GenerationState::TitlesReady;

        let saved: Vec<Recipe> = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                let updated = diesel::update(users::table.find(user_id))
                    .set((
                        users::titles_generated.eq(next.titles_generated()),
                        users::methods_generated.eq(next.methods_generated()),
                    ))
                    .execute(conn)?;

                if updated == 0 {
                    return Err(diesel::result::Error::NotFound);
                }

                diesel::insert_into(recipes::table)
                    .values(&rows)
                    .returning(Recipe::as_returning())
                    .get_results(conn)
            })
            .map_err(|e| match e {
                diesel::result::Error::NotFound => StoreError::UserNotFound(user_id),
                other => backend(other),
            })?;

        saved.into_iter().map(RecipeRecord::try_from).collect()
    }
}
