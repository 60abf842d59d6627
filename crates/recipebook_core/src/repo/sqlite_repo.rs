//! SQLite-backed recipe repository.
//!
//! # Responsibility
//! - Provide the repository contract over the `recipes` table.
//! - Seed the baseline catalog into an empty table on first use.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - All access goes through one connection guarded by one mutex.
//! - Ids come from `AUTOINCREMENT` and are never reused.
//! - Read paths reject malformed persisted lists instead of masking them.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::{open_db, open_db_in_memory};
use crate::model::baseline::baseline_recipes;
use crate::model::recipe::{title_matches, Recipe, RecipeDraft, RecipeId};
use crate::repo::codec::{decode_text_list, encode_text_list};
use crate::repo::recipe_repo::{RecipeRepository, RepoError, RepoResult};
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const STORE_NAME: &str = "sqlite";

const RECIPE_SELECT_SQL: &str = "SELECT
    id,
    title,
    ingredients,
    steps,
    prep_time,
    cook_time,
    difficulty,
    cuisine
FROM recipes";

const RECIPE_INSERT_SQL: &str = "INSERT INTO recipes (
    title,
    ingredients,
    steps,
    prep_time,
    cook_time,
    difficulty,
    cuisine
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);";

/// SQLite-backed recipe repository.
pub struct SqliteRecipeRepository {
    conn: Mutex<Connection>,
}

impl SqliteRecipeRepository {
    /// Wraps a migrated connection, seeding the baseline catalog when the
    /// `recipes` table is empty.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` when `recipes` does not exist.
    pub fn try_new(mut conn: Connection) -> RepoResult<Self> {
        ensure_connection_ready(&conn)?;
        seed_if_empty(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens (or creates) a database file and wraps it.
    ///
    /// Existing data is kept; a non-empty table is never reseeded.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens a private in-memory database.
    ///
    /// State lives exactly as long as the returned repository, which makes
    /// this the isolated variant for tests.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| RepoError::LockPoisoned(STORE_NAME))
    }
}

impl RecipeRepository for SqliteRecipeRepository {
    fn list_all(&self) -> RepoResult<Vec<Recipe>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{RECIPE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut recipes = Vec::new();

        while let Some(row) = rows.next()? {
            recipes.push(parse_recipe_row(row)?);
        }

        Ok(recipes)
    }

    fn get(&self, id: RecipeId) -> RepoResult<Option<Recipe>> {
        let conn = self.lock()?;
        fetch_recipe(&conn, id)
    }

    fn create(&self, draft: &RecipeDraft) -> RepoResult<Recipe> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let id = insert_recipe(&tx, draft)?;
        let recipe = fetch_recipe(&tx, id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("created recipe {id} missing in read-back"))
        })?;
        tx.commit()?;

        debug!(
            "event=recipe_create module=repo status=ok backend={} id={}",
            STORE_NAME, id
        );
        Ok(recipe)
    }

    fn update(&self, id: RecipeId, draft: &RecipeDraft) -> RepoResult<Option<Recipe>> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let changed = tx.execute(
            "UPDATE recipes
             SET
                title = ?1,
                ingredients = ?2,
                steps = ?3,
                prep_time = ?4,
                cook_time = ?5,
                difficulty = ?6,
                cuisine = ?7
             WHERE id = ?8;",
            params![
                draft.title.as_str(),
                encode_text_list(&draft.ingredients)?,
                encode_text_list(&draft.steps)?,
                draft.prep_time.as_str(),
                draft.cook_time.as_str(),
                draft.difficulty.as_str(),
                draft.cuisine.as_str(),
                id,
            ],
        )?;

        if changed == 0 {
            return Ok(None);
        }

        let recipe = fetch_recipe(&tx, id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("updated recipe {id} missing in read-back"))
        })?;
        tx.commit()?;

        debug!(
            "event=recipe_update module=repo status=ok backend={} id={}",
            STORE_NAME, id
        );
        Ok(Some(recipe))
    }

    fn delete(&self, id: RecipeId) -> RepoResult<bool> {
        let conn = self.lock()?;
        let changed = conn.execute("DELETE FROM recipes WHERE id = ?1;", [id])?;
        if changed > 0 {
            debug!(
                "event=recipe_delete module=repo status=ok backend={} id={}",
                STORE_NAME, id
            );
        }
        Ok(changed > 0)
    }

    fn search(&self, query: &str) -> RepoResult<Vec<Recipe>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        // SQLite LIKE folds ASCII only; matching in Rust keeps both backends
        // on the same Unicode-aware rule.
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{RECIPE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut recipes = Vec::new();

        while let Some(row) = rows.next()? {
            let title: String = row.get("title")?;
            if title_matches(&title, query) {
                recipes.push(parse_recipe_row(row)?);
            }
        }

        Ok(recipes)
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let has_table: bool = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'recipes'
        );",
        [],
        |row| row.get(0),
    )?;
    if !has_table {
        return Err(RepoError::MissingRequiredTable("recipes"));
    }

    Ok(())
}

fn seed_if_empty(conn: &mut Connection) -> RepoResult<()> {
    let tx = conn.transaction()?;
    let count: i64 = tx.query_row("SELECT COUNT(*) FROM recipes;", [], |row| row.get(0))?;
    if count > 0 {
        return Ok(());
    }

    let baseline = baseline_recipes();
    for draft in &baseline {
        insert_recipe(&tx, draft)?;
    }
    tx.commit()?;

    info!(
        "event=recipe_seed module=repo status=ok backend={} count={}",
        STORE_NAME,
        baseline.len()
    );
    Ok(())
}

fn insert_recipe(conn: &Connection, draft: &RecipeDraft) -> RepoResult<RecipeId> {
    conn.execute(
        RECIPE_INSERT_SQL,
        params![
            draft.title.as_str(),
            encode_text_list(&draft.ingredients)?,
            encode_text_list(&draft.steps)?,
            draft.prep_time.as_str(),
            draft.cook_time.as_str(),
            draft.difficulty.as_str(),
            draft.cuisine.as_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn fetch_recipe(conn: &Connection, id: RecipeId) -> RepoResult<Option<Recipe>> {
    let mut stmt = conn.prepare(&format!("{RECIPE_SELECT_SQL} WHERE id = ?1;"))?;
    let raw = stmt.query_row([id], RawRecipeRow::read).optional()?;
    raw.map(RawRecipeRow::into_recipe).transpose()
}

fn parse_recipe_row(row: &Row<'_>) -> RepoResult<Recipe> {
    RawRecipeRow::read(row)?.into_recipe()
}

/// Column values before list decoding.
struct RawRecipeRow {
    id: RecipeId,
    title: String,
    ingredients: String,
    steps: String,
    prep_time: String,
    cook_time: String,
    difficulty: String,
    cuisine: String,
}

impl RawRecipeRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            ingredients: row.get("ingredients")?,
            steps: row.get("steps")?,
            prep_time: row.get("prep_time")?,
            cook_time: row.get("cook_time")?,
            difficulty: row.get("difficulty")?,
            cuisine: row.get("cuisine")?,
        })
    }

    fn into_recipe(self) -> RepoResult<Recipe> {
        Ok(Recipe {
            id: self.id,
            title: self.title,
            ingredients: decode_text_list(&self.ingredients, "ingredients")?,
            steps: decode_text_list(&self.steps, "steps")?,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            difficulty: self.difficulty,
            cuisine: self.cuisine,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteRecipeRepository;
    use crate::repo::recipe_repo::{RecipeRepository, RepoError};

    #[test]
    fn poisoned_connection_lock_is_reported_as_a_fault() {
        let repo = SqliteRecipeRepository::open_in_memory().unwrap();
        std::thread::scope(|scope| {
            let holder = scope.spawn(|| {
                let _conn = repo.conn.lock().unwrap();
                panic!("holder died with the connection");
            });
            assert!(holder.join().is_err());
        });

        assert!(matches!(repo.get(1), Err(RepoError::LockPoisoned("sqlite"))));
        assert!(matches!(
            repo.list_all(),
            Err(RepoError::LockPoisoned("sqlite"))
        ));
    }
}
