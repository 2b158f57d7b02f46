//! Recipe drafts produced by the generator and the records they become.

use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

/// Number of recipe titles requested per generation (two a day for a week).
pub const RECIPE_BATCH_SIZE: usize = 14;

/// Longest title or cuisine, in characters, that a recipe row can hold.
pub const MAX_FIELD_CHARS: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Some(MealType::Breakfast),
            "lunch" => Some(MealType::Lunch),
            "dinner" => Some(MealType::Dinner),
            _ => None,
        }
    }
}

/// A recipe suggestion that hasn't been saved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub title: String,
    pub cuisine: String,
    pub meal_type: MealType,
}

/// A saved recipe belonging to one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub cuisine: String,
    pub meal_type: MealType,
    /// Filled in once full methods are generated.
    pub method: Option<String>,
    pub ingredients: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecipeParseError {
    #[error("Recipe payload is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Expected {expected} recipes, got {actual}")]
    WrongCount { expected: usize, actual: usize },

    #[error("Recipe {index} has an empty {field}")]
    EmptyField { index: usize, field: &'static str },

    #[error("Recipe {index} has a {field} longer than {max} characters")]
    FieldTooLong {
        index: usize,
        field: &'static str,
        max: usize,
    },

    #[error("Recipe {index} has unknown meal type {value:?}")]
    UnknownMealType { index: usize, value: String },
}

/// Shape of one recipe object as the model writes it.
#[derive(Debug, Deserialize)]
struct RecipeJson {
    title: String,
    cuisine: String,
    meal_type: String,
}

/// Parse the model's completion text into exactly [`RECIPE_BATCH_SIZE`] drafts.
///
/// Any missing, empty or overlong field, unknown meal type or wrong count
/// fails the whole batch, so callers never persist a partial week.
pub fn parse_recipe_batch(content: &str) -> Result<Vec<RecipeDraft>, RecipeParseError> {
    let payload = strip_code_fence(content);

    let parsed: Vec<RecipeJson> = serde_json::from_str(payload)
        .map_err(|e| RecipeParseError::InvalidJson(e.to_string()))?;

    if parsed.len() != RECIPE_BATCH_SIZE {
        return Err(RecipeParseError::WrongCount {
            expected: RECIPE_BATCH_SIZE,
            actual: parsed.len(),
        });
    }

    parsed
        .into_iter()
        .enumerate()
        .map(|(index, recipe)| {
            let title = checked_field(index, "title", &recipe.title)?;
            let cuisine = checked_field(index, "cuisine", &recipe.cuisine)?;
            let meal_type = MealType::from_str(&recipe.meal_type).ok_or_else(|| {
                RecipeParseError::UnknownMealType {
                    index,
                    value: recipe.meal_type.clone(),
                }
            })?;

            Ok(RecipeDraft {
                title: title.to_string(),
                cuisine: cuisine.to_string(),
                meal_type,
            })
        })
        .collect()
}

fn checked_field<'a>(
    index: usize,
    field: &'static str,
    value: &'a str,
) -> Result<&'a str, RecipeParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(RecipeParseError::EmptyField { index, field });
    }
    if value.chars().count() > MAX_FIELD_CHARS {
        return Err(RecipeParseError::FieldTooLong {
            index,
            field,
            max: MAX_FIELD_CHARS,
        });
    }
    Ok(value)
}

/// Models sometimes wrap JSON in a markdown fence despite being told not to.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch_json(count: usize) -> String {
        let meals = ["breakfast", "lunch", "dinner"];
        let items: Vec<String> = (0..count)
            .map(|i| {
                format!(
                    r#"{{"title": "Dish {i}", "cuisine": "Italian", "meal_type": "{}"}}"#,
                    meals[i % 3]
                )
            })
            .collect();
        format!("[{}]", items.join(","))
    }

    #[test]
    fn test_meal_type_from_str() {
        assert_eq!(MealType::from_str("Breakfast"), Some(MealType::Breakfast));
        assert_eq!(MealType::from_str(" dinner "), Some(MealType::Dinner));
        assert_eq!(MealType::from_str("snack"), None);
    }

    #[test]
    fn test_parse_full_batch() {
        let drafts = parse_recipe_batch(&batch_json(14)).unwrap();
        assert_eq!(drafts.len(), RECIPE_BATCH_SIZE);
        assert_eq!(drafts[0].title, "Dish 0");
        assert_eq!(drafts[1].meal_type, MealType::Lunch);
        assert_eq!(drafts[13].cuisine, "Italian");
    }

    #[test]
    fn test_parse_fenced_batch() {
        let fenced = format!("```json\n{}\n```", batch_json(14));
        assert_eq!(parse_recipe_batch(&fenced).unwrap().len(), 14);
    }

    #[test]
    fn test_wrong_count() {
        assert_eq!(
            parse_recipe_batch(&batch_json(13)).unwrap_err(),
            RecipeParseError::WrongCount {
                expected: 14,
                actual: 13
            }
        );
    }

    #[test]
    fn test_missing_field_is_a_parse_error() {
        let err = parse_recipe_batch(r#"[{"title": "Soup", "cuisine": "Greek"}]"#).unwrap_err();
        assert!(matches!(err, RecipeParseError::InvalidJson(_)));
    }

    #[test]
    fn test_not_json() {
        let err = parse_recipe_batch("Here are your recipes!").unwrap_err();
        assert!(matches!(err, RecipeParseError::InvalidJson(_)));
    }

    #[test]
    fn test_unknown_meal_type() {
        let json = batch_json(14).replacen("breakfast", "brunch", 1);
        assert_eq!(
            parse_recipe_batch(&json).unwrap_err(),
            RecipeParseError::UnknownMealType {
                index: 0,
                value: "brunch".to_string()
            }
        );
    }

    #[test]
    fn test_empty_title() {
        let json = batch_json(14).replacen("Dish 4", " ", 1);
        assert_eq!(
            parse_recipe_batch(&json).unwrap_err(),
            RecipeParseError::EmptyField {
                index: 4,
                field: "title"
            }
        );
    }

    #[test]
    fn test_overlong_title() {
        let long_title = "Slow-Braised Short Rib ".repeat(12);
        assert!(long_title.trim().chars().count() > MAX_FIELD_CHARS);

        let json = batch_json(14).replacen("Dish 9", &long_title, 1);
        assert_eq!(
            parse_recipe_batch(&json).unwrap_err(),
            RecipeParseError::FieldTooLong {
                index: 9,
                field: "title",
                max: MAX_FIELD_CHARS
            }
        );
    }

    #[test]
    fn test_overlong_cuisine() {
        let json = batch_json(14).replacen("Italian", &"x".repeat(MAX_FIELD_CHARS + 1), 1);
        assert!(matches!(
            parse_recipe_batch(&json).unwrap_err(),
            RecipeParseError::FieldTooLong {
                index: 0,
                field: "cuisine",
                ..
            }
        ));
    }

    #[test]
    fn test_field_limit_counts_characters() {
        let title = "é".repeat(MAX_FIELD_CHARS);
        let json = batch_json(14).replacen("Dish 0", &title, 1);
        assert_eq!(parse_recipe_batch(&json).unwrap()[0].title, title);
    }
}
