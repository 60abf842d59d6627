//! Recipe use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD and search entry points for transport callers.
//! - Delegate persistence to an injected repository.
//!
//! # Invariants
//! - Service layer remains storage-agnostic and stateless.
//! - A missing or empty search query returns no recipes without touching
//!   the repository.

use crate::model::recipe::{Recipe, RecipeDraft, RecipeId};
use crate::repo::recipe_repo::{RecipeRepository, RepoResult};

/// Use-case service wrapper for recipe operations.
pub struct RecipeService<R: RecipeRepository> {
    repo: R,
}

impl<R: RecipeRepository> RecipeService<R> {
    /// Creates a service using the provided repository handle.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every recipe.
    pub fn list_recipes(&self) -> RepoResult<Vec<Recipe>> {
        self.repo.list_all()
    }

    /// Gets one recipe by id; `None` maps to not-found at the transport edge.
    pub fn get_recipe(&self, id: RecipeId) -> RepoResult<Option<Recipe>> {
        self.repo.get(id)
    }

    /// Creates a recipe from a validated draft.
    pub fn create_recipe(&self, draft: &RecipeDraft) -> RepoResult<Recipe> {
        self.repo.create(draft)
    }

    /// Fully replaces recipe `id`.
    ///
    /// Returns `None` unchanged from the repository when the id is unknown.
    pub fn update_recipe(&self, id: RecipeId, draft: &RecipeDraft) -> RepoResult<Option<Recipe>> {
        self.repo.update(id, draft)
    }

    /// Deletes recipe `id`; returns whether it existed.
    pub fn delete_recipe(&self, id: RecipeId) -> RepoResult<bool> {
        self.repo.delete(id)
    }

    /// Searches recipe titles.
    ///
    /// # Contract
    /// - `None` or `""` returns an empty list; the repository is not called.
    /// - Otherwise case-insensitive substring match on `title`.
    pub fn search_recipes(&self, query: Option<&str>) -> RepoResult<Vec<Recipe>> {
        match query {
            Some(query) if !query.is_empty() => self.repo.search(query),
            _ => Ok(Vec::new()),
        }
    }
}
