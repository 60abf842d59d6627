//! Storage backend selection and process-wide repository binding.
//!
//! # Responsibility
//! - Resolve which backend serves the process from static configuration.
//! - Construct the repository lazily and hand out one shared instance.
//! - Allow tests to drop the instance so the next access builds a fresh one.
//!
//! # Invariants
//! - A binding holds at most one live repository at a time.
//! - The backend of a binding never changes after construction.
//! - The process-wide binding is configured at most once per process.

use crate::repo::memory_repo::MemoryRecipeRepository;
use crate::repo::recipe_repo::{RepoResult, SharedRepository};
use crate::repo::sqlite_repo::SqliteRecipeRepository;
use crate::service::recipe_service::RecipeService;
use log::info;
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Environment variable selecting the backend kind.
pub const BACKEND_ENV: &str = "RECIPEBOOK_BACKEND";
/// Environment variable holding the SQLite database path.
pub const DB_PATH_ENV: &str = "RECIPEBOOK_DB_PATH";
/// Database file used when no path is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "recipes.db";

static SHARED_BINDING: OnceCell<RepositoryBinding> = OnceCell::new();

/// Configuration errors for backend selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// Backend name is not one of `memory|sqlite|sqlite-memory`.
    UnknownBackend(String),
    /// The process-wide binding already serves a different backend.
    AlreadyConfigured { active: String, requested: String },
}

impl Display for BindingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownBackend(value) => write!(
                f,
                "unsupported backend `{value}`; expected memory|sqlite|sqlite-memory"
            ),
            Self::AlreadyConfigured { active, requested } => write!(
                f,
                "repository binding already configured for `{active}`; refusing to switch to `{requested}`"
            ),
        }
    }
}

impl Error for BindingError {}

/// Storage backend served by a binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendKind {
    /// Volatile in-process store.
    Memory,
    /// SQLite database file at `path`.
    Sqlite { path: PathBuf },
    /// Private in-memory SQLite database.
    SqliteInMemory,
}

impl BackendKind {
    /// Resolves the backend from `RECIPEBOOK_BACKEND` and `RECIPEBOOK_DB_PATH`.
    pub fn from_env() -> Result<Self, BindingError> {
        let backend = std::env::var(BACKEND_ENV).ok();
        let db_path = std::env::var(DB_PATH_ENV).ok();
        Self::parse(backend.as_deref(), db_path.as_deref())
    }

    /// Resolves the backend from raw setting values.
    ///
    /// - `backend`: `memory|sqlite|sqlite-memory`, case-insensitive; blank or
    ///   missing selects `sqlite`.
    /// - `db_path`: used by `sqlite` only; blank or missing selects
    ///   `recipes.db` in the working directory.
    pub fn parse(backend: Option<&str>, db_path: Option<&str>) -> Result<Self, BindingError> {
        let name = backend
            .map(|value| value.trim().to_ascii_lowercase())
            .unwrap_or_default();

        match name.as_str() {
            "memory" => Ok(Self::Memory),
            "sqlite-memory" => Ok(Self::SqliteInMemory),
            "" | "sqlite" => {
                let path = db_path
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .unwrap_or(DEFAULT_DB_FILE_NAME);
                Ok(Self::Sqlite {
                    path: PathBuf::from(path),
                })
            }
            _ => Err(BindingError::UnknownBackend(name)),
        }
    }

    /// Short label used in logs and messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Sqlite { .. } => "sqlite",
            Self::SqliteInMemory => "sqlite-memory",
        }
    }

    /// Constructs a fresh repository for this backend.
    pub fn open(&self) -> RepoResult<SharedRepository> {
        let repo: SharedRepository = match self {
            Self::Memory => Arc::new(MemoryRecipeRepository::new()),
            Self::Sqlite { path } => Arc::new(SqliteRecipeRepository::open(path)?),
            Self::SqliteInMemory => Arc::new(SqliteRecipeRepository::open_in_memory()?),
        };
        Ok(repo)
    }
}

impl Display for BackendKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite { path } => write!(f, "sqlite:{}", path.display()),
            other => write!(f, "{}", other.label()),
        }
    }
}

/// Lazily constructed, resettable repository handle for one backend.
///
/// Threaded explicitly through callers that need storage; the process-wide
/// instance returned by [`shared_binding`] is just one of these.
pub struct RepositoryBinding {
    backend: BackendKind,
    slot: Mutex<Option<SharedRepository>>,
}

impl RepositoryBinding {
    pub fn new(backend: BackendKind) -> Self {
        Self {
            backend,
            slot: Mutex::new(None),
        }
    }

    pub fn backend(&self) -> &BackendKind {
        &self.backend
    }

    /// Returns the live repository, constructing it on first access.
    ///
    /// Concurrent first accesses construct exactly one instance.
    pub fn repository(&self) -> RepoResult<SharedRepository> {
        let mut slot = self.slot();
        if let Some(repo) = slot.as_ref() {
            return Ok(Arc::clone(repo));
        }

        let repo = self.backend.open()?;
        info!(
            "event=repo_bind module=binding status=ok backend={}",
            self.backend.label()
        );
        *slot = Some(Arc::clone(&repo));
        Ok(repo)
    }

    /// Returns a service over the live repository.
    pub fn service(&self) -> RepoResult<RecipeService<SharedRepository>> {
        Ok(RecipeService::new(self.repository()?))
    }

    /// Whether a repository instance is currently live.
    pub fn is_bound(&self) -> bool {
        self.slot().is_some()
    }

    /// Drops the live repository; the next access constructs a fresh one.
    ///
    /// Handles already given out keep working against the old instance.
    pub fn reset(&self) {
        let previous = self.slot().take();
        if previous.is_some() {
            info!(
                "event=repo_reset module=binding status=ok backend={}",
                self.backend.label()
            );
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<SharedRepository>> {
        // The slot holds a plain Option, so a panicking holder cannot leave it
        // half-updated.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Debug for RepositoryBinding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryBinding")
            .field("backend", &self.backend)
            .field("bound", &self.is_bound())
            .finish()
    }
}

/// Returns the process-wide binding, configuring it from the environment on
/// first access.
pub fn shared_binding() -> Result<&'static RepositoryBinding, BindingError> {
    SHARED_BINDING.get_or_try_init(|| BackendKind::from_env().map(RepositoryBinding::new))
}

/// Configures the process-wide binding with an explicit backend.
///
/// Repeating the same backend is idempotent; asking for a different one
/// after configuration is rejected.
pub fn configure_shared_binding(
    backend: BackendKind,
) -> Result<&'static RepositoryBinding, BindingError> {
    let requested = backend.to_string();
    let binding = SHARED_BINDING.get_or_init(|| RepositoryBinding::new(backend.clone()));
    if binding.backend() != &backend {
        return Err(BindingError::AlreadyConfigured {
            active: binding.backend().to_string(),
            requested,
        });
    }
    Ok(binding)
}

/// Drops the process-wide repository instance, if any.
///
/// Intended for test harnesses that need a fresh store without restarting
/// the process.
pub fn reset_shared_repository() {
    if let Some(binding) = SHARED_BINDING.get() {
        binding.reset();
    }
}
