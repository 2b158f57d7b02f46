//! Prompt asking for a week of recipe titles that fit a survey profile.

use crate::recipes::RECIPE_BATCH_SIZE;
use crate::survey::SurveyProfile;

/// Prompt name used in logs.
pub const RECIPE_TITLES_PROMPT_NAME: &str = "recipe_titles";

/// Render the title-generation prompt for a user's survey answers.
pub fn render_recipe_titles_prompt(profile: &SurveyProfile) -> String {
    let dietary = profile.dietary_labels().join(", ");
    let cuisines = profile.cuisine_labels().join(", ");
    let servings = profile.servings();

    format!(
        r#"Generate {count} unique recipe titles that adhere to the following criteria:

The recipes should match the following dietary requirements: {dietary}.
The recipes should be based on the following cuisine(s): {cuisines}.
Each recipe should be designed to serve {servings} people.
For each recipe, indicate whether it is best suited for breakfast, lunch, or dinner.

Respond with ONLY a JSON array of exactly {count} objects, no other text and no code fences. Each object contains three fields:
- "title": the recipe title
- "cuisine": the meal's cuisine
- "meal_type": one of "breakfast", "lunch" or "dinner"

Example format:
[
  {{"title": "Shakshuka with Feta", "cuisine": "Mediterranean", "meal_type": "breakfast"}}
]"#,
        count = RECIPE_BATCH_SIZE,
    )
}
