//! Volatile in-process recipe repository.
//!
//! # Responsibility
//! - Keep the catalog in an ordered `Vec` plus a next-id counter.
//! - Serve readers in parallel and writers exclusively.
//!
//! # Invariants
//! - `next_id` only grows; deleted ids are never handed out again.
//! - Returned recipes are clones; callers cannot reach internal state.
//! - Every operation holds the lock for its whole duration.

use crate::model::baseline::baseline_recipes;
use crate::model::recipe::{title_matches, Recipe, RecipeDraft, RecipeId};
use crate::repo::recipe_repo::{RecipeRepository, RepoError, RepoResult};
use log::debug;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

const STORE_NAME: &str = "memory";

#[derive(Debug)]
struct MemoryState {
    recipes: Vec<Recipe>,
    next_id: RecipeId,
}

impl MemoryState {
    fn empty() -> Self {
        Self {
            recipes: Vec::new(),
            next_id: 1,
        }
    }

    fn insert(&mut self, draft: RecipeDraft) -> Recipe {
        let recipe = draft.into_recipe(self.next_id);
        self.next_id += 1;
        self.recipes.push(recipe.clone());
        recipe
    }
}

/// In-memory recipe repository.
#[derive(Debug)]
pub struct MemoryRecipeRepository {
    state: RwLock<MemoryState>,
}

impl MemoryRecipeRepository {
    /// Creates a store seeded with the baseline catalog (ids 1-3).
    pub fn new() -> Self {
        let mut state = MemoryState::empty();
        for draft in baseline_recipes() {
            state.insert(draft);
        }
        Self {
            state: RwLock::new(state),
        }
    }

    /// Creates a store with no recipes whose first assigned id is 1.
    #[cfg(test)]
    fn empty() -> Self {
        Self {
            state: RwLock::new(MemoryState::empty()),
        }
    }

    fn read(&self) -> RepoResult<RwLockReadGuard<'_, MemoryState>> {
        self.state
            .read()
            .map_err(|_| RepoError::LockPoisoned(STORE_NAME))
    }

    fn write(&self) -> RepoResult<RwLockWriteGuard<'_, MemoryState>> {
        self.state
            .write()
            .map_err(|_| RepoError::LockPoisoned(STORE_NAME))
    }
}

impl Default for MemoryRecipeRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeRepository for MemoryRecipeRepository {
    fn list_all(&self) -> RepoResult<Vec<Recipe>> {
        Ok(self.read()?.recipes.clone())
    }

    fn get(&self, id: RecipeId) -> RepoResult<Option<Recipe>> {
        let state = self.read()?;
        Ok(state.recipes.iter().find(|recipe| recipe.id == id).cloned())
    }

    fn create(&self, draft: &RecipeDraft) -> RepoResult<Recipe> {
        let recipe = self.write()?.insert(draft.clone());
        debug!(
            "event=recipe_create module=repo status=ok backend={} id={}",
            STORE_NAME, recipe.id
        );
        Ok(recipe)
    }

    fn update(&self, id: RecipeId, draft: &RecipeDraft) -> RepoResult<Option<Recipe>> {
        let mut state = self.write()?;
        let Some(recipe) = state.recipes.iter_mut().find(|recipe| recipe.id == id) else {
            return Ok(None);
        };
        recipe.apply_draft(draft);
        debug!(
            "event=recipe_update module=repo status=ok backend={} id={}",
            STORE_NAME, id
        );
        Ok(Some(recipe.clone()))
    }

    fn delete(&self, id: RecipeId) -> RepoResult<bool> {
        let mut state = self.write()?;
        let Some(index) = state.recipes.iter().position(|recipe| recipe.id == id) else {
            return Ok(false);
        };
        state.recipes.remove(index);
        debug!(
            "event=recipe_delete module=repo status=ok backend={} id={}",
            STORE_NAME, id
        );
        Ok(true)
    }

    fn search(&self, query: &str) -> RepoResult<Vec<Recipe>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let state = self.read()?;
        Ok(state
            .recipes
            .iter()
            .filter(|recipe| title_matches(&recipe.title, query))
            .cloned()
            .collect())
    }
}
