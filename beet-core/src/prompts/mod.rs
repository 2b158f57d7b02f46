//! LLM prompt templates.

pub mod recipe_titles;

pub use recipe_titles::render_recipe_titles_prompt;
