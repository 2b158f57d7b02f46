//! Survey catalogue and validation.
//!
//! The survey form only ever offers the values listed here. Submissions are
//! re-checked against the same lists so a tampered payload can't store a
//! cuisine or restriction the form never rendered.

use std::collections::BTreeSet;
use thiserror::Error;

/// Smallest household the planner will generate for.
pub const MIN_SERVINGS: u8 = 2;

/// Largest household the planner will generate for.
pub const MAX_SERVINGS: u8 = 8;

/// Declares a closed list of survey options backed by display strings.
macro_rules! survey_options {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every option, in the order the survey presents them.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Exact match against the display label.
            pub fn from_label(label: &str) -> Option<Self> {
                match label {
                    $($label => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn labels() -> Vec<&'static str> {
                Self::ALL.iter().map(|option| option.as_str()).collect()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

survey_options! {
    /// Cuisines a user can ask recipes to be based on.
    Cuisine {
        Italian => "Italian",
        Mexican => "Mexican",
        Chinese => "Chinese",
        Indian => "Indian",
        Japanese => "Japanese",
        Greek => "Greek",
        Lebanese => "Lebanese",
        Vietnamese => "Vietnamese",
        Turkish => "Turkish",
        Korean => "Korean",
        MiddleEastern => "Middle Eastern",
        American => "American",
        Australian => "Australian",
        Moroccan => "Moroccan",
        Spanish => "Spanish",
        Caribbean => "Caribbean",
        Mediterranean => "Mediterranean",
    }
}

survey_options! {
    /// Dietary restrictions every generated recipe must respect.
    DietaryRequirement {
        Vegetarian => "Vegetarian",
        Vegan => "Vegan",
        Pescatarian => "Pescatarian",
        GlutenFree => "Gluten-Free",
        DairyFree => "Dairy-Free",
        NutFree => "Nut-Free",
        EggFree => "Egg-Free",
        Keto => "Keto",
        Paleo => "Paleo",
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SurveyError {
    #[error("Unknown cuisine: {0}")]
    UnknownCuisine(String),

    #[error("Unknown dietary requirement: {0}")]
    UnknownDietary(String),

    #[error("Servings must be a whole number from 2 to 8, got {0:?}")]
    InvalidServings(String),

    #[error("At least one option is required for each question")]
    MissingSelection,
}

impl SurveyError {
    /// Message shown back to the person filling in the form.
    ///
    /// Tampered values get a deliberately vague message; a missing answer
    /// tells the user what to fix.
    pub fn user_message(&self) -> &'static str {
        match self {
            SurveyError::UnknownCuisine(_)
            | SurveyError::UnknownDietary(_)
            | SurveyError::InvalidServings(_) => "Invalid Form Response",
            SurveyError::MissingSelection => "Please list at least one option for each question",
        }
    }
}

/// A user's validated survey answers.
///
/// Only obtainable through [`validate_survey`] or [`SurveyProfile::from_stored`],
/// so every instance satisfies the membership, non-empty and range rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyProfile {
    cuisines: BTreeSet<Cuisine>,
    dietary: BTreeSet<DietaryRequirement>,
    servings: u8,
}

impl SurveyProfile {
    pub fn cuisines(&self) -> &BTreeSet<Cuisine> {
        &self.cuisines
    }

    pub fn dietary(&self) -> &BTreeSet<DietaryRequirement> {
        &self.dietary
    }

    pub fn servings(&self) -> u8 {
        self.servings
    }

    pub fn cuisine_labels(&self) -> Vec<String> {
        self.cuisines.iter().map(|c| c.as_str().to_string()).collect()
    }

    pub fn dietary_labels(&self) -> Vec<String> {
        self.dietary.iter().map(|d| d.as_str().to_string()).collect()
    }

    /// Rebuild a profile from persisted columns, re-checking every rule.
    pub fn from_stored(
        cuisines: &[String],
        dietary: &[String],
        servings: i32,
    ) -> Result<Self, SurveyError> {
        validate_survey(cuisines, dietary, &servings.to_string())
    }
}

/// Validate a survey submission.
///
/// Rejects the whole submission on the first bad value. Duplicate selections
/// collapse into one.
pub fn validate_survey<C, D>(
    cuisines: &[C],
    dietary: &[D],
    servings: &str,
) -> Result<SurveyProfile, SurveyError>
where
    C: AsRef<str>,
    D: AsRef<str>,
{
    let dietary = dietary
        .iter()
        .map(|value| {
            DietaryRequirement::from_label(value.as_ref())
                .ok_or_else(|| SurveyError::UnknownDietary(value.as_ref().to_string()))
        })
        .collect::<Result<BTreeSet<_>, _>>()?;

    let cuisines = cuisines
        .iter()
        .map(|value| {
            Cuisine::from_label(value.as_ref())
                .ok_or_else(|| SurveyError::UnknownCuisine(value.as_ref().to_string()))
        })
        .collect::<Result<BTreeSet<_>, _>>()?;

    let servings = parse_servings(servings)?;

    if cuisines.is_empty() || dietary.is_empty() {
        return Err(SurveyError::MissingSelection);
    }

    Ok(SurveyProfile {
        cuisines,
        dietary,
        servings,
    })
}

fn parse_servings(raw: &str) -> Result<u8, SurveyError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SurveyError::MissingSelection);
    }

    let value: i64 = trimmed
        .parse()
        .map_err(|_| SurveyError::InvalidServings(raw.to_string()))?;

    if !(i64::from(MIN_SERVINGS)..=i64::from(MAX_SERVINGS)).contains(&value) {
        return Err(SurveyError::InvalidServings(raw.to_string()));
    }

    // Range checked above
    Ok(value as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_sizes() {
        assert_eq!(Cuisine::ALL.len(), 17);
        assert_eq!(DietaryRequirement::ALL.len(), 9);
    }

    #[test]
    fn test_labels_round_trip_through_lookup() {
        for cuisine in Cuisine::ALL {
            assert_eq!(Cuisine::from_label(cuisine.as_str()), Some(*cuisine));
        }
        for requirement in DietaryRequirement::ALL {
            assert_eq!(
                DietaryRequirement::from_label(requirement.as_str()),
                Some(*requirement)
            );
        }
    }

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(Cuisine::from_label("italian"), None);
        assert_eq!(Cuisine::from_label("Middle Eastern"), Some(Cuisine::MiddleEastern));
        assert_eq!(DietaryRequirement::from_label("Gluten Free"), None);
    }

    #[test]
    fn test_valid_submission() {
        let profile = validate_survey(&["Italian", "Mexican"], &["Vegetarian"], "4").unwrap();
        assert_eq!(profile.cuisine_labels(), vec!["Italian", "Mexican"]);
        assert_eq!(profile.dietary_labels(), vec!["Vegetarian"]);
        assert_eq!(profile.servings(), 4);
    }

    #[test]
    fn test_unknown_cuisine_rejects_whole_submission() {
        let err = validate_survey(&["Italian", "Klingon"], &["Vegan"], "4").unwrap_err();
        assert_eq!(err, SurveyError::UnknownCuisine("Klingon".to_string()));
        assert_eq!(err.user_message(), "Invalid Form Response");
    }

    #[test]
    fn test_unknown_dietary_rejected() {
        let err = validate_survey(&["Greek"], &["Vegan", "Carnivore"], "4").unwrap_err();
        assert_eq!(err, SurveyError::UnknownDietary("Carnivore".to_string()));
    }

    #[test]
    fn test_servings_bounds() {
        for servings in -3..=12 {
            let result = validate_survey(&["Korean"], &["Keto"], &servings.to_string());
            assert_eq!(
                result.is_ok(),
                (2..=8).contains(&servings),
                "servings = {servings}"
            );
        }
    }

    #[test]
    fn test_servings_must_be_an_integer() {
        let err = validate_survey(&["Korean"], &["Keto"], "4.5").unwrap_err();
        assert_eq!(err, SurveyError::InvalidServings("4.5".to_string()));

        let err = validate_survey(&["Korean"], &["Keto"], "four").unwrap_err();
        assert!(matches!(err, SurveyError::InvalidServings(_)));
    }

    #[test]
    fn test_missing_selections() {
        let none: [&str; 0] = [];
        assert_eq!(
            validate_survey(&none, &["Vegan"], "4").unwrap_err(),
            SurveyError::MissingSelection
        );
        assert_eq!(
            validate_survey(&["Spanish"], &none, "4").unwrap_err(),
            SurveyError::MissingSelection
        );
        assert_eq!(
            validate_survey(&["Spanish"], &["Vegan"], "  ").unwrap_err(),
            SurveyError::MissingSelection
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        let profile = validate_survey(&["Indian", "Indian"], &["Vegan", "Vegan"], "2").unwrap();
        assert_eq!(profile.cuisines().len(), 1);
        assert_eq!(profile.dietary().len(), 1);
    }

    #[test]
    fn test_from_stored_revalidates() {
        let profile = SurveyProfile::from_stored(
            &["Japanese".to_string()],
            &["Pescatarian".to_string()],
            6,
        )
        .unwrap();
        assert_eq!(profile.servings(), 6);

        assert!(SurveyProfile::from_stored(&["Japanese".to_string()], &[], 6).is_err());
        assert!(
            SurveyProfile::from_stored(&["Japanese".to_string()], &["Vegan".to_string()], 9)
                .is_err()
        );
    }
}
