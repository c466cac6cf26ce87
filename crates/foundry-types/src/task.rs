//! Tasks: the units of work the decomposition engine operates on.
//!
//! A task is either *compound* (resolved by trying method alternatives) or
//! *primitive* (resolved by exactly one operator). The engine's work list
//! and the heuristic calling stack are both sequences of [`Task`] values.

use serde::{Deserialize, Serialize};

use crate::ids::{AgentId, ItemId, RecipeId};

/// A single task in the decomposition work list.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Task {
    /// Compound goal check: ensure the agent holds at least `amount` of
    /// `item`, producing more if necessary.
    HaveEnough {
        /// The agent whose inventory is checked.
        agent: AgentId,
        /// The item being checked.
        item: ItemId,
        /// The minimum quantity required.
        amount: u32,
    },

    /// Compound production dispatch: obtain one batch of `item` via the
    /// registered method alternatives for that item.
    Produce {
        /// The agent doing the producing.
        agent: AgentId,
        /// The item to produce.
        item: ItemId,
    },

    /// Primitive operator invocation: execute the named recipe.
    Apply {
        /// The agent executing the recipe.
        agent: AgentId,
        /// The recipe to execute.
        recipe: RecipeId,
    },
}

impl Task {
    /// The agent this task belongs to.
    pub const fn agent(&self) -> &AgentId {
        match self {
            Self::HaveEnough { agent, .. } | Self::Produce { agent, .. } | Self::Apply { agent, .. } => agent,
        }
    }

    /// Whether this task is primitive (resolved by a single operator).
    pub const fn is_primitive(&self) -> bool {
        matches!(self, Self::Apply { .. })
    }

    /// The item a `Produce` task targets, if this is one.
    ///
    /// Used by the cycle guard, which only inspects production dispatch
    /// tasks on the calling stack.
    pub const fn production_item(&self) -> Option<&ItemId> {
        match self {
            Self::Produce { item, .. } => Some(item),
            Self::HaveEnough { .. } | Self::Apply { .. } => None,
        }
    }
}

impl core::fmt::Display for Task {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::HaveEnough { agent, item, amount } => {
                write!(f, "have_enough({agent}, {item}, {amount})")
            }
            Self::Produce { agent, item } => write!(f, "produce({agent}, {item})"),
            Self::Apply { agent, recipe } => write!(f, "op_{recipe}({agent})"),
        }
    }
}
