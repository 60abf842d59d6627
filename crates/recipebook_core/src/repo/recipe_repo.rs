//! Recipe repository contract and error types.
//!
//! # Responsibility
//! - Define the six storage operations every backend implements.
//! - Separate "absent" outcomes from storage faults at the type level.
//!
//! # Invariants
//! - `create` assigns ids strictly greater than any id assigned before by the
//!   same store instance.
//! - `update` replaces every field except `id`.
//! - `search` matches case-insensitively on `title` only; an empty query
//!   yields no results.

use crate::db::DbError;
use crate::model::recipe::{Recipe, RecipeDraft, RecipeId};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage fault raised by a repository backend.
///
/// Not-found is intentionally absent from this enum: it is modelled as
/// `Option::None` or `false` by the repository contract.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    LockPoisoned(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted recipe data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::LockPoisoned(store) => write!(f, "{store} store lock poisoned"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for the recipe catalog.
///
/// Implementations must be safe to share across threads: every operation is
/// atomic with respect to every other operation on the same instance.
pub trait RecipeRepository: Send + Sync {
    /// Returns every stored recipe ordered by ascending id.
    fn list_all(&self) -> RepoResult<Vec<Recipe>>;
    /// Returns the recipe with `id`, or `None` when no such recipe exists.
    fn get(&self, id: RecipeId) -> RepoResult<Option<Recipe>>;
    /// Stores the draft under the next unused id and returns the stored recipe.
    fn create(&self, draft: &RecipeDraft) -> RepoResult<Recipe>;
    /// Replaces all fields of recipe `id`; `None` when the recipe is absent.
    fn update(&self, id: RecipeId, draft: &RecipeDraft) -> RepoResult<Option<Recipe>>;
    /// Removes recipe `id`; returns whether a removal happened.
    fn delete(&self, id: RecipeId) -> RepoResult<bool>;
    /// Case-insensitive title substring search. Empty query returns nothing.
    fn search(&self, query: &str) -> RepoResult<Vec<Recipe>>;
}

/// Shared, type-erased repository handle.
pub type SharedRepository = Arc<dyn RecipeRepository>;

impl<T: RecipeRepository + ?Sized> RecipeRepository for Arc<T> {
    fn list_all(&self) -> RepoResult<Vec<Recipe>> {
        (**self).list_all()
    }

    fn get(&self, id: RecipeId) -> RepoResult<Option<Recipe>> {
        (**self).get(id)
    }

    fn create(&self, draft: &RecipeDraft) -> RepoResult<Recipe> {
        (**self).create(draft)
    }

    fn update(&self, id: RecipeId, draft: &RecipeDraft) -> RepoResult<Option<Recipe>> {
        (**self).update(id, draft)
    }

    fn delete(&self, id: RecipeId) -> RepoResult<bool> {
        (**self).delete(id)
    }

    fn search(&self, query: &str) -> RepoResult<Vec<Recipe>> {
        (**self).search(query)
    }
}
