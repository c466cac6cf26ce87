//! Error types for planning calls.
//!
//! Branch-level failures (inapplicable operators, exhausted method lists,
//! pruned expansions) never surface here -- they drive backtracking inside
//! the engine. A planning call fails in exactly two ways: the search space
//! is exhausted, or the inputs reference names the domain never declared.

use foundry_domain::DomainError;
use foundry_types::{ItemId, RecipeId};

/// Errors returned by a planning call.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Every alternative in the explored search space failed.
    ///
    /// Distinct from an empty plan, which is a success meaning all goals
    /// already held.
    #[error("no plan satisfies the goals within the explored search space")]
    Unsolvable,

    /// A goal task cites an item the domain never declared.
    #[error("goal cites undeclared item '{item}'")]
    UndeclaredGoal {
        /// The undeclared item name.
        item: ItemId,
    },

    /// A goal task cites a recipe with no registered operator.
    #[error("goal cites unknown recipe '{recipe}'")]
    UnknownRecipe {
        /// The unknown recipe name.
        recipe: RecipeId,
    },

    /// The domain rejected the planning instance (malformed initial
    /// assignment).
    #[error(transparent)]
    Domain(#[from] DomainError),
}
