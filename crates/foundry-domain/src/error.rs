//! Error types for the `foundry-domain` crate.
//!
//! Malformed rule tables are rejected at compile time -- a recipe citing an
//! undeclared item must never reach the search engine. These are the only
//! hard errors in the planner; everything that can go wrong during search
//! is expressed as backtracking instead.

use foundry_types::{ItemId, RecipeId};

/// Errors raised while compiling or instantiating a domain.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// A recipe cites an item name missing from the declared items/tools.
    #[error("recipe '{recipe}' cites undeclared item '{item}'")]
    UndeclaredItem {
        /// The recipe containing the bad reference.
        recipe: RecipeId,
        /// The undeclared item name.
        item: ItemId,
    },

    /// A recipe produces nothing, so it could never be selected.
    #[error("recipe '{recipe}' produces nothing")]
    NoProduct {
        /// The productless recipe.
        recipe: RecipeId,
    },

    /// An initial resource assignment cites an undeclared item name.
    #[error("initial assignment cites undeclared item '{item}'")]
    UndeclaredInitial {
        /// The undeclared item name.
        item: ItemId,
    },
}
