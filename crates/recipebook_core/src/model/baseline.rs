//! Baseline catalog seeded into every fresh store.
//!
//! Both backends insert these drafts in order, so a fresh store holds them
//! under ids 1, 2 and 3.

use crate::model::recipe::RecipeDraft;

/// Returns the three baseline recipe drafts in seeding order.
pub fn baseline_recipes() -> Vec<RecipeDraft> {
    vec![
        draft(
            "Spaghetti Carbonara",
            &["spaghetti", "eggs", "pancetta", "parmesan", "black pepper"],
            &[
                "Cook pasta",
                "Fry pancetta",
                "Mix eggs and cheese",
                "Combine all with pasta",
            ],
            ("10 minutes", "15 minutes"),
            "Medium",
            "Italian",
        ),
        draft(
            "Chicken Tikka Masala",
            &["chicken", "yogurt", "tomato sauce", "spices"],
            &[
                "Marinate chicken",
                "Grill chicken",
                "Simmer in sauce",
                "Serve with rice",
            ],
            ("30 minutes", "25 minutes"),
            "Hard",
            "Indian",
        ),
        draft(
            "Avocado Toast",
            &["bread", "avocado", "lemon", "salt", "pepper"],
            &[
                "Toast bread",
                "Mash avocado with lemon, salt, pepper",
                "Spread and serve",
            ],
            ("5 minutes", "2 minutes"),
            "Easy",
            "American",
        ),
    ]
}

fn draft(
    title: &str,
    ingredients: &[&str],
    steps: &[&str],
    (prep_time, cook_time): (&str, &str),
    difficulty: &str,
    cuisine: &str,
) -> RecipeDraft {
    RecipeDraft {
        title: title.to_string(),
        ingredients: ingredients.iter().map(|item| item.to_string()).collect(),
        steps: steps.iter().map(|step| step.to_string()).collect(),
        prep_time: prep_time.to_string(),
        cook_time: cook_time.to_string(),
        difficulty: difficulty.to_string(),
        cuisine: cuisine.to_string(),
    }
}
