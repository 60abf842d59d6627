//! Recipe catalog domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Own the baseline catalog every fresh store starts with.
//!
//! # Invariants
//! - Every stored recipe is identified by a storage-assigned `RecipeId`.
//! - Deletion is a hard removal; ids are never handed out twice.

pub mod baseline;
pub mod recipe;
