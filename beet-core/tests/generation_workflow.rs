//! End-to-end workflow tests against the in-memory store and fake provider.
//!
//! These cover the user-facing scenarios: generating before the survey is
//! done, a first successful generation, upstream failures, revisiting the
//! page, and tampered survey input.

use beet_core::llm::sample_week_json;
use beet_core::{
    validate_survey, FakeProvider, GenerateError, GenerateOutcome, GenerationState,
    GenerationWorkflow, LlmError, MealType, MemoryStore, PlannerStore, RecipeParseError,
    SurveyError, RECIPE_BATCH_SIZE,
};

fn store_with_survey() -> (MemoryStore, uuid::Uuid) {
    let store = MemoryStore::new();
    let user = store.add_user();
    let profile = validate_survey(&["Italian", "Mexican"], &["Vegetarian"], "4").unwrap();
    store.upsert_survey_profile(user, &profile).unwrap();
    (store, user)
}

fn assert_flags_consistent(store: &MemoryStore, user: uuid::Uuid) {
    let state = store.generation_state(user).unwrap();
    assert!(!state.methods_generated() || state.titles_generated());
}

#[tokio::test]
async fn generate_without_survey_asks_for_survey() {
    let store = MemoryStore::new();
    let user = store.add_user();
    let llm = FakeProvider::with_sample_week();

    let outcome = GenerationWorkflow::new(&store, &llm)
        .advance(user)
        .await
        .unwrap();

    assert_eq!(outcome, GenerateOutcome::NeedsSurvey);
    assert!(store.recipes(user).unwrap().is_empty());
    assert_eq!(
        store.generation_state(user).unwrap(),
        GenerationState::NotStarted
    );
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn first_generation_saves_a_full_batch() {
    let (store, user) = store_with_survey();
    let llm = FakeProvider::with_response("Generate 14 unique recipe titles", &sample_week_json());

    let outcome = GenerationWorkflow::new(&store, &llm)
        .advance(user)
        .await
        .unwrap();

    let GenerateOutcome::TitlesGenerated(saved) = outcome else {
        panic!("expected a new batch, got {:?}", outcome);
    };
    assert_eq!(saved.len(), RECIPE_BATCH_SIZE);
    assert!(saved.iter().all(|recipe| recipe.user_id == user));
    assert!(saved.iter().all(|recipe| recipe.method.is_none()));
    assert_eq!(saved[0].meal_type, MealType::Breakfast);

    assert_eq!(store.recipes(user).unwrap().len(), RECIPE_BATCH_SIZE);
    assert_eq!(
        store.generation_state(user).unwrap(),
        GenerationState::TitlesReady
    );
    assert_eq!(llm.call_count(), 1);
    assert_flags_consistent(&store, user);
}

#[tokio::test]
async fn upstream_failure_leaves_state_untouched() {
    let (store, user) = store_with_survey();
    let llm = FakeProvider::failing(500);

    let err = GenerationWorkflow::new(&store, &llm)
        .advance(user)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GenerateError::Upstream(LlmError::ApiError { status: 500, .. })
    ));
    assert!(store.recipes(user).unwrap().is_empty());
    assert_eq!(
        store.generation_state(user).unwrap(),
        GenerationState::NotStarted
    );
}

#[tokio::test]
async fn malformed_batch_is_rejected_without_partial_writes() {
    let (store, user) = store_with_survey();
    let llm = FakeProvider::new()
        .with_default_response(r#"[{"title": "Only One", "cuisine": "Italian", "meal_type": "lunch"}]"#);

    let err = GenerationWorkflow::new(&store, &llm)
        .advance(user)
        .await
        .unwrap_err();

    assert!(matches!(err, GenerateError::Parse(_)));
    assert!(store.recipes(user).unwrap().is_empty());
    assert_eq!(
        store.generation_state(user).unwrap(),
        GenerationState::NotStarted
    );
}

#[tokio::test]
async fn overlong_title_is_a_parse_error() {
    let (store, user) = store_with_survey();
    let long_title = "Mushroom Risotto with ".repeat(14);
    let batch = sample_week_json().replacen("Mushroom Risotto", long_title.trim(), 1);
    let llm = FakeProvider::new().with_default_response(&batch);

    let err = GenerationWorkflow::new(&store, &llm)
        .advance(user)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GenerateError::Parse(RecipeParseError::FieldTooLong {
            index: 2,
            field: "title",
            ..
        })
    ));
    assert!(store.recipes(user).unwrap().is_empty());
    assert_eq!(
        store.generation_state(user).unwrap(),
        GenerationState::NotStarted
    );
}

#[tokio::test]
async fn revisiting_shows_existing_titles_without_calling_the_api() {
    let (store, user) = store_with_survey();
    let llm = FakeProvider::with_sample_week();
    let workflow = GenerationWorkflow::new(&store, &llm);

    workflow.advance(user).await.unwrap();
    let outcome = workflow.advance(user).await.unwrap();

    let GenerateOutcome::TitlesReady(recipes) = outcome else {
        panic!("expected stored titles, got {:?}", outcome);
    };
    assert_eq!(recipes.len(), RECIPE_BATCH_SIZE);
    assert_eq!(recipes[0].title, "Ricotta Pancakes with Lemon");
    assert_eq!(recipes[13].title, "Eggplant Parmigiana (Week Two)");
    assert_eq!(llm.call_count(), 1);
    assert_eq!(store.recipes(user).unwrap().len(), RECIPE_BATCH_SIZE);
}

#[tokio::test]
async fn methods_ready_does_nothing() {
    let (store, user) = store_with_survey();
    store
        .set_state(user, GenerationState::MethodsReady)
        .unwrap();
    let llm = FakeProvider::with_sample_week();

    let outcome = GenerationWorkflow::new(&store, &llm)
        .advance(user)
        .await
        .unwrap();

    assert_eq!(outcome, GenerateOutcome::MethodsReady);
    assert_eq!(llm.call_count(), 0);
    assert_flags_consistent(&store, user);
}

#[tokio::test]
async fn overview_has_no_side_effects() {
    let (store, user) = store_with_survey();
    let llm = FakeProvider::with_sample_week();

    let (state, recipes) = GenerationWorkflow::new(&store, &llm)
        .overview(user)
        .unwrap();

    assert_eq!(state, GenerationState::NotStarted);
    assert!(recipes.is_empty());
    assert_eq!(llm.call_count(), 0);
}

#[test]
fn tampered_cuisine_leaves_survey_unchanged() {
    let (store, user) = store_with_survey();
    let before = store.survey_profile(user).unwrap();

    let result = validate_survey(&["Italian", "Klingon"], &["Vegetarian"], "4");
    assert_eq!(
        result.unwrap_err(),
        SurveyError::UnknownCuisine("Klingon".to_string())
    );

    assert_eq!(store.survey_profile(user).unwrap(), before);
    assert_eq!(store.survey_count(user), 1);
}

#[test]
fn resubmitting_a_survey_keeps_one_profile() {
    let (store, user) = store_with_survey();
    let profile = validate_survey(&["Italian", "Mexican"], &["Vegetarian"], "4").unwrap();

    store.upsert_survey_profile(user, &profile).unwrap();
    store.upsert_survey_profile(user, &profile).unwrap();

    assert_eq!(store.survey_count(user), 1);
    assert_eq!(store.survey_profile(user).unwrap(), Some(profile));
}
