use recipebook_core::{
    baseline_recipes, MemoryRecipeRepository, RecipeDraft, RecipeRepository,
    SqliteRecipeRepository,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

fn memory_repo() -> MemoryRecipeRepository {
    MemoryRecipeRepository::new()
}

fn sqlite_repo() -> SqliteRecipeRepository {
    SqliteRecipeRepository::open_in_memory().unwrap()
}

fn test_draft(title: &str) -> RecipeDraft {
    RecipeDraft {
        title: title.to_string(),
        ingredients: vec![
            "Ingredient 1".to_string(),
            "Ingredient 2".to_string(),
            "Ingredient, with comma".to_string(),
        ],
        steps: vec!["Step 1".to_string(), "Step 2".to_string()],
        prep_time: "10 minutes".to_string(),
        cook_time: "20 minutes".to_string(),
        difficulty: "Easy".to_string(),
        cuisine: "Test".to_string(),
    }
}

fn seeds_baseline_catalog(repo: &impl RecipeRepository) {
    let recipes = repo.list_all().unwrap();
    assert_eq!(recipes.len(), 3);

    let expected = baseline_recipes();
    for (index, recipe) in recipes.iter().enumerate() {
        assert_eq!(recipe.id, index as i64 + 1);
        assert_eq!(recipe.to_draft(), expected[index]);
    }
}

fn create_then_get_roundtrip(repo: &impl RecipeRepository) {
    let draft = test_draft("Test Recipe");
    let created = repo.create(&draft).unwrap();

    assert!(created.id > 0);
    assert_eq!(created.to_draft(), draft);
    assert_eq!(repo.get(created.id).unwrap(), Some(created));
}

fn ids_strictly_increase_and_are_not_reused(repo: &impl RecipeRepository) {
    let first = repo.create(&test_draft("first")).unwrap();
    let second = repo.create(&test_draft("second")).unwrap();
    assert!(first.id > 3);
    assert!(second.id > first.id);

    assert!(repo.delete(second.id).unwrap());
    let third = repo.create(&test_draft("third")).unwrap();
    assert!(third.id > second.id);
}

fn update_replaces_every_field_but_id(repo: &impl RecipeRepository) {
    let created = repo.create(&test_draft("Test Recipe")).unwrap();
    let replacement = RecipeDraft {
        title: "Updated Test Recipe".to_string(),
        ingredients: vec!["Only one".to_string()],
        steps: Vec::new(),
        prep_time: "1 hour".to_string(),
        cook_time: "none".to_string(),
        difficulty: "Expert".to_string(),
        cuisine: "Fusion".to_string(),
    };

    let updated = repo.update(created.id, &replacement).unwrap().unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.to_draft(), replacement);
    assert_eq!(repo.get(created.id).unwrap(), Some(updated));
}

fn update_missing_is_absent_without_mutation(repo: &impl RecipeRepository) {
    let before = repo.list_all().unwrap();
    assert_eq!(repo.update(999, &test_draft("ghost")).unwrap(), None);
    assert_eq!(repo.list_all().unwrap(), before);
}

fn delete_removes_and_reports(repo: &impl RecipeRepository) {
    assert!(repo.delete(2).unwrap());
    assert_eq!(repo.get(2).unwrap(), None);
    assert!(!repo.delete(2).unwrap());
    assert!(!repo.delete(999).unwrap());

    let ids: Vec<_> = repo.list_all().unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

fn search_matches_title_case_insensitively(repo: &impl RecipeRepository) {
    let chicken = repo.search("CHICKEN").unwrap();
    assert_eq!(chicken.len(), 1);
    assert_eq!(chicken[0].title, "Chicken Tikka Masala");

    let spaghetti = repo.search("spagh").unwrap();
    assert_eq!(spaghetti.len(), 1);
    assert_eq!(spaghetti[0].title, "Spaghetti Carbonara");

    assert!(repo.search("pizza").unwrap().is_empty());
    assert!(repo.search("").unwrap().is_empty());
}

fn search_ignores_non_title_fields(repo: &impl RecipeRepository) {
    // "eggs" and "Italian" only appear outside titles.
    assert!(repo.search("eggs").unwrap().is_empty());
    assert!(repo.search("Italian").unwrap().is_empty());
    assert_eq!(repo.search("avocado").unwrap().len(), 1);
}

fn search_reflects_updates(repo: &impl RecipeRepository) {
    let created = repo.create(&test_draft("Plain Porridge")).unwrap();
    repo.update(created.id, &test_draft("Spiced Oats")).unwrap();

    assert!(repo.search("porridge").unwrap().is_empty());
    let hits = repo.search("oats").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, created.id);
}

fn end_to_end_lifecycle(repo: &impl RecipeRepository) {
    let draft = test_draft("Test Recipe");
    let created = repo.create(&draft).unwrap();
    assert!(created.id > 0);
    assert_eq!(created.title, "Test Recipe");
    assert_eq!(created.ingredients, draft.ingredients);

    assert_eq!(repo.get(created.id).unwrap().as_ref(), Some(&created));

    let mut changed = draft.clone();
    changed.title = "Updated Test Recipe".to_string();
    let updated = repo.update(created.id, &changed).unwrap().unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Updated Test Recipe");
    assert_eq!(repo.get(created.id).unwrap(), Some(updated));

    assert!(repo.delete(created.id).unwrap());
    assert_eq!(repo.get(created.id).unwrap(), None);
}

fn concurrent_creates_get_distinct_ids<R: RecipeRepository + 'static>(repo: R) {
    let repo = Arc::new(repo);
    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let repo = Arc::clone(&repo);
            thread::spawn(move || {
                (0..25)
                    .map(|n| {
                        repo.create(&test_draft(&format!("worker {worker} recipe {n}")))
                            .unwrap()
                            .id
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(ids.insert(id), "duplicate id {id}");
        }
    }
    assert_eq!(ids.len(), 200);
    assert_eq!(repo.list_all().unwrap().len(), 203);
}

macro_rules! contract_tests {
    ($backend:ident, $make:expr) => {
        mod $backend {
            use super::*;

            #[test]
            fn seeds_baseline_catalog() {
                super::seeds_baseline_catalog(&$make);
            }

            #[test]
            fn create_then_get_roundtrip() {
                super::create_then_get_roundtrip(&$make);
            }

            #[test]
            fn ids_strictly_increase_and_are_not_reused() {
                super::ids_strictly_increase_and_are_not_reused(&$make);
            }

            #[test]
            fn update_replaces_every_field_but_id() {
                super::update_replaces_every_field_but_id(&$make);
            }

            #[test]
            fn update_missing_is_absent_without_mutation() {
                super::update_missing_is_absent_without_mutation(&$make);
            }

            #[test]
            fn delete_removes_and_reports() {
                super::delete_removes_and_reports(&$make);
            }

            #[test]
            fn search_matches_title_case_insensitively() {
                super::search_matches_title_case_insensitively(&$make);
            }

            #[test]
            fn search_ignores_non_title_fields() {
                super::search_ignores_non_title_fields(&$make);
            }

            #[test]
            fn search_reflects_updates() {
                super::search_reflects_updates(&$make);
            }

            #[test]
            fn end_to_end_lifecycle() {
                super::end_to_end_lifecycle(&$make);
            }

            #[test]
            fn concurrent_creates_get_distinct_ids() {
                super::concurrent_creates_get_distinct_ids($make);
            }
        }
    };
}

contract_tests!(memory, memory_repo());
contract_tests!(sqlite, sqlite_repo());
