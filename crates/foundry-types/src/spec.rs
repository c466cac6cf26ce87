//! Declarative domain input: the rule table the compiler consumes.
//!
//! These types mirror the external rule-table format section for section
//! (`Items`, `Tools`, `Recipes` with `Requires`/`Consumes`/`Produces`/`Time`,
//! and a `Problem` with `Initial`/`Goal`/`Time`). Loading the table from
//! storage is the caller's concern; this crate only defines the shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::{AgentId, ItemId, RecipeId};
use crate::task::Task;

/// A single declarative recipe rule.
///
/// `requires` entries are checked but not deducted (tools, workstations);
/// `consumes` entries are checked and deducted; `produces` entries are
/// added; `time` is deducted from the agent's remaining budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecipeSpec {
    /// Items that must be present but are not consumed.
    #[serde(default)]
    pub requires: BTreeMap<ItemId, u32>,

    /// Items deducted when the recipe runs.
    #[serde(default)]
    pub consumes: BTreeMap<ItemId, u32>,

    /// Items added when the recipe runs.
    pub produces: BTreeMap<ItemId, u32>,

    /// Time cost deducted from the agent's budget (defaults to 1).
    #[serde(default = "default_time")]
    pub time: u32,
}

const fn default_time() -> u32 {
    1
}

/// The full declarative domain: declared names plus the recipe table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DomainSpec {
    /// All material item names in the domain.
    pub items: Vec<ItemId>,

    /// All tool names (durable single-unit goods) in the domain.
    pub tools: Vec<ItemId>,

    /// The recipe rules, keyed by recipe name.
    pub recipes: BTreeMap<RecipeId, RecipeSpec>,
}

/// One planning instance: starting inventory, goals, and time budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProblemSpec {
    /// Initial item quantities (items not listed start at 0).
    #[serde(default)]
    pub initial: BTreeMap<ItemId, u32>,

    /// Goal quantities the final state must meet or exceed.
    #[serde(default)]
    pub goal: BTreeMap<ItemId, u32>,

    /// The consumable time budget for this instance.
    pub time: u32,
}

impl ProblemSpec {
    /// Build the ordered goal task list for an agent: one `have_enough`
    /// per goal entry, in the goal map's order.
    pub fn goal_tasks(&self, agent: &AgentId) -> Vec<Task> {
        self.goal
            .iter()
            .map(|(item, amount)| Task::HaveEnough {
                agent: agent.clone(),
                item: item.clone(),
                amount: *amount,
            })
            .collect()
    }
}
