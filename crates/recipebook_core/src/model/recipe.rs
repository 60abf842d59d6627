//! Recipe domain model.
//!
//! # Responsibility
//! - Define the stored `Recipe` record and its `RecipeDraft` payload.
//! - Provide the title matching rule shared by every storage backend.
//!
//! # Invariants
//! - `id` is assigned by storage and never mutated afterwards.
//! - `ingredients` and `steps` keep caller-provided order.
//! - Free-text fields (`prep_time`, `cook_time`, `difficulty`, `cuisine`) are
//!   stored verbatim, never parsed.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned recipe identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type RecipeId = i64;

/// Validation errors for caller-provided drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeValidationError {
    /// `title` is the empty string.
    EmptyTitle,
}

impl Display for RecipeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
        }
    }
}

impl Error for RecipeValidationError {}

/// Creation and full-replace payload: every recipe field except `id`.
///
/// Serialized with camelCase names (`prepTime`, `cookTime`) to match the
/// external schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    /// Free-text duration, e.g. `10 minutes`.
    pub prep_time: String,
    /// Free-text duration, e.g. `15 minutes`.
    pub cook_time: String,
    pub difficulty: String,
    pub cuisine: String,
}

impl RecipeDraft {
    /// Checks the draft shape invariants not expressible in the type.
    ///
    /// Storage backends assume validated drafts; transport callers run this
    /// before handing a draft to the service.
    pub fn validate(&self) -> Result<(), RecipeValidationError> {
        if self.title.is_empty() {
            return Err(RecipeValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Combines this draft with a storage-assigned id.
    pub fn into_recipe(self, id: RecipeId) -> Recipe {
        Recipe {
            id,
            title: self.title,
            ingredients: self.ingredients,
            steps: self.steps,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            difficulty: self.difficulty,
            cuisine: self.cuisine,
        }
    }
}

/// Canonical stored recipe record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique, monotonically assigned per store instance.
    pub id: RecipeId,
    pub title: String,
    /// Ordered ingredient lines.
    pub ingredients: Vec<String>,
    /// Ordered preparation steps.
    pub steps: Vec<String>,
    pub prep_time: String,
    pub cook_time: String,
    pub difficulty: String,
    pub cuisine: String,
}

impl Recipe {
    /// Returns the draft shape of this recipe (all fields except `id`).
    pub fn to_draft(&self) -> RecipeDraft {
        RecipeDraft {
            title: self.title.clone(),
            ingredients: self.ingredients.clone(),
            steps: self.steps.clone(),
            prep_time: self.prep_time.clone(),
            cook_time: self.cook_time.clone(),
            difficulty: self.difficulty.clone(),
            cuisine: self.cuisine.clone(),
        }
    }

    /// Replaces every field except `id` with the draft's fields.
    pub fn apply_draft(&mut self, draft: &RecipeDraft) {
        self.title = draft.title.clone();
        self.ingredients = draft.ingredients.clone();
        self.steps = draft.steps.clone();
        self.prep_time = draft.prep_time.clone();
        self.cook_time = draft.cook_time.clone();
        self.difficulty = draft.difficulty.clone();
        self.cuisine = draft.cuisine.clone();
    }
}

/// Title search rule shared by all backends.
///
/// Case-insensitive substring match on `title` only. An empty query never
/// matches, so search stays opt-in.
pub fn title_matches(title: &str, query: &str) -> bool {
    if query.is_empty() {
        return false;
    }
    title.to_lowercase().contains(&query.to_lowercase())
}
