use recipebook_core::{
    MemoryRecipeRepository, Recipe, RecipeDraft, RecipeId, RecipeRepository, RecipeService,
    RepoResult, SqliteRecipeRepository,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Delegating repository that counts `search` calls.
struct CountingRepository {
    inner: MemoryRecipeRepository,
    searches: AtomicUsize,
}

impl CountingRepository {
    fn new() -> Self {
        Self {
            inner: MemoryRecipeRepository::new(),
            searches: AtomicUsize::new(0),
        }
    }
}

impl RecipeRepository for CountingRepository {
    fn list_all(&self) -> RepoResult<Vec<Recipe>> {
        self.inner.list_all()
    }

    fn get(&self, id: RecipeId) -> RepoResult<Option<Recipe>> {
        self.inner.get(id)
    }

    fn create(&self, draft: &RecipeDraft) -> RepoResult<Recipe> {
        self.inner.create(draft)
    }

    fn update(&self, id: RecipeId, draft: &RecipeDraft) -> RepoResult<Option<Recipe>> {
        self.inner.update(id, draft)
    }

    fn delete(&self, id: RecipeId) -> RepoResult<bool> {
        self.inner.delete(id)
    }

    fn search(&self, query: &str) -> RepoResult<Vec<Recipe>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        self.inner.search(query)
    }
}

fn draft(title: &str) -> RecipeDraft {
    RecipeDraft {
        title: title.to_string(),
        ingredients: vec!["Ingredient 1".to_string(), "Ingredient 2".to_string()],
        steps: vec!["Step 1".to_string(), "Step 2".to_string()],
        prep_time: "10 minutes".to_string(),
        cook_time: "20 minutes".to_string(),
        difficulty: "Easy".to_string(),
        cuisine: "Test".to_string(),
    }
}

#[test]
fn empty_or_missing_query_short_circuits_before_repository() {
    let repo = Arc::new(CountingRepository::new());
    let service = RecipeService::new(Arc::clone(&repo));

    assert!(service.search_recipes(None).unwrap().is_empty());
    assert!(service.search_recipes(Some("")).unwrap().is_empty());
    assert_eq!(repo.searches.load(Ordering::SeqCst), 0);

    let hits = service.search_recipes(Some("toast")).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Avocado Toast");
    assert_eq!(repo.searches.load(Ordering::SeqCst), 1);
}

#[test]
fn service_passes_crud_through_unchanged() {
    let service = RecipeService::new(SqliteRecipeRepository::open_in_memory().unwrap());

    assert_eq!(service.list_recipes().unwrap().len(), 3);
    assert_eq!(
        service.get_recipe(3).unwrap().map(|recipe| recipe.title),
        Some("Avocado Toast".to_string())
    );
    assert_eq!(service.get_recipe(42).unwrap(), None);
    assert_eq!(service.update_recipe(42, &draft("missing")).unwrap(), None);
    assert!(!service.delete_recipe(42).unwrap());
}

#[test]
fn end_to_end_create_update_delete_through_service() {
    let repo: Arc<dyn RecipeRepository> = Arc::new(MemoryRecipeRepository::new());
    let service = RecipeService::new(repo);

    let created = service.create_recipe(&draft("Test Recipe")).unwrap();
    assert!(created.id > 0);
    assert_eq!(created.to_draft(), draft("Test Recipe"));
    assert_eq!(service.get_recipe(created.id).unwrap(), Some(created.clone()));

    let updated = service
        .update_recipe(created.id, &draft("Updated Test Recipe"))
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(
        service.get_recipe(created.id).unwrap().unwrap().title,
        "Updated Test Recipe"
    );

    assert!(service.delete_recipe(created.id).unwrap());
    assert_eq!(service.get_recipe(created.id).unwrap(), None);
}
