//! Column encoding for ordered text lists.
//!
//! `recipes.ingredients` and `recipes.steps` store a JSON array of strings,
//! e.g. `["eggs","flour"]`. Element order and text are preserved exactly.

use crate::repo::recipe_repo::{RepoError, RepoResult};

pub(crate) fn encode_text_list(items: &[String]) -> RepoResult<String> {
    serde_json::to_string(items)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode text list: {err}")))
}

pub(crate) fn decode_text_list(raw: &str, column: &str) -> RepoResult<Vec<String>> {
    serde_json::from_str(raw).map_err(|err| {
        RepoError::InvalidData(format!("invalid text list in recipes.{column}: {err}"))
    })
}
