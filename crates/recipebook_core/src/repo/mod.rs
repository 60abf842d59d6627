//! Repository layer abstractions and storage backends.
//!
//! # Responsibility
//! - Define the recipe storage contract shared by every backend.
//! - Provide the volatile in-memory backend and the SQLite backend.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Missing ids are reported as `None`/`false`, never as errors.
//! - Storage faults are reported as `RepoError`, never as missing ids.

mod codec;
pub mod memory_repo;
pub mod recipe_repo;
pub mod sqlite_repo;
