//! Core domain logic for the recipe catalog.
//! This crate is the single source of truth for storage invariants.

pub mod binding;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use binding::{
    configure_shared_binding, reset_shared_repository, shared_binding, BackendKind, BindingError,
    RepositoryBinding,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::baseline::baseline_recipes;
pub use model::recipe::{Recipe, RecipeDraft, RecipeId, RecipeValidationError};
pub use repo::memory_repo::MemoryRecipeRepository;
pub use repo::recipe_repo::{RecipeRepository, RepoError, RepoResult, SharedRepository};
pub use repo::sqlite_repo::SqliteRecipeRepository;
pub use service::recipe_service::RecipeService;

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
