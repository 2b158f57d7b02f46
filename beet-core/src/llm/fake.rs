//! Fake LLM provider for testing.
//!
//! Returns canned responses matched against the prompt so tests and local
//! development run without network access or API costs.

use super::{LlmError, LlmProvider};
use crate::recipes::RECIPE_BATCH_SIZE;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

/// A fake LLM provider.
///
/// Responses are matched by checking if the prompt contains a registered
/// substring. With no match it falls back to the default response, then to
/// the configured failure status, then to an error.
#[derive(Debug)]
pub struct FakeProvider {
    /// Map of prompt substring -> response
    responses: RwLock<HashMap<String, String>>,
    default_response: Option<String>,
    /// When set, every call fails as if the API returned this status.
    fail_with_status: Option<u16>,
    calls: AtomicUsize,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeProvider {
    /// Create a FakeProvider with no registered responses.
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: None,
            fail_with_status: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Return `response` for prompts containing `prompt_contains`.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let provider = Self::new();
        provider.add_response(prompt_contains, response);
        provider
    }

    pub fn add_response(&self, prompt_contains: &str, response: &str) {
        if let Ok(mut responses) = self.responses.write() {
            responses.insert(prompt_contains.to_string(), response.to_string());
        }
    }

    /// Set the response used when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Fail every call with an API error carrying `status`.
    pub fn failing(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::new()
        }
    }

    /// A provider that answers every prompt with a plausible week of recipes.
    pub fn with_sample_week() -> Self {
        Self::new().with_default_response(&sample_week_json())
    }

    /// How many times `complete` has been called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// A valid recipe batch payload, as the model would return it.
pub fn sample_week_json() -> String {
    const DISHES: [(&str, &str, &str); 7] = [
        ("Ricotta Pancakes with Lemon", "Italian", "breakfast"),
        ("Black Bean Tostadas", "Mexican", "lunch"),
        ("Mushroom Risotto", "Italian", "dinner"),
        ("Huevos Rancheros", "Mexican", "breakfast"),
        ("Caprese Panini", "Italian", "lunch"),
        ("Sweet Potato Enchiladas", "Mexican", "dinner"),
        ("Eggplant Parmigiana", "Italian", "dinner"),
    ];

    let recipes: Vec<serde_json::Value> = (0..RECIPE_BATCH_SIZE)
        .map(|i| {
            let (title, cuisine, meal_type) = DISHES[i % DISHES.len()];
            let title = if i < DISHES.len() {
                title.to_string()
            } else {
                format!("{} (Week Two)", title)
            };
            serde_json::json!({
                "title": title,
                "cuisine": cuisine,
                "meal_type": meal_type,
            })
        })
        .collect();

    serde_json::Value::Array(recipes).to_string()
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(status) = self.fail_with_status {
            return Err(LlmError::ApiError {
                status,
                message: "FakeProvider configured to fail".to_string(),
            });
        }

        let responses = self
            .responses
            .read()
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        // Find first matching pattern (case-insensitive)
        let prompt_lower = prompt.to_lowercase();
        for (pattern, response) in responses.iter() {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return Ok(response.clone());
            }
        }

        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(LlmError::RequestFailed(format!(
                "FakeProvider: No response configured for prompt (first 100 chars): {}",
                prompt.chars().take(100).collect::<String>()
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::parse_recipe_batch;

    #[tokio::test]
    async fn test_fake_provider_matching() {
        let provider = FakeProvider::with_response("hello", "world");
        let result = provider.complete("Say hello to the user").await.unwrap();
        assert_eq!(result, "world");
    }

    #[tokio::test]
    async fn test_fake_provider_case_insensitive() {
        let provider = FakeProvider::with_response("HELLO", "world");
        let result = provider.complete("hello there").await.unwrap();
        assert_eq!(result, "world");
    }

    #[tokio::test]
    async fn test_fake_provider_no_match() {
        let provider = FakeProvider::new();
        let result = provider.complete("random prompt").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fake_provider_failing() {
        let provider = FakeProvider::failing(500);
        let result = provider.complete("anything").await;
        assert!(matches!(result, Err(LlmError::ApiError { status: 500, .. })));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_sample_week_is_a_valid_batch() {
        let provider = FakeProvider::with_sample_week();
        let content = provider.complete("Generate 14 unique recipe titles").await.unwrap();
        let drafts = parse_recipe_batch(&content).unwrap();
        assert_eq!(drafts.len(), RECIPE_BATCH_SIZE);
        assert_eq!(drafts[7].title, "Ricotta Pancakes with Lemon (Week Two)");
    }
}
