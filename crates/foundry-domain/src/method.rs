//! Methods: compiled decompositions of a production task into subtasks.
//!
//! A method is an immutable value object paired with a stateless expansion
//! function -- no hidden captured state, trivially cloneable and comparable.
//! Two kinds exist:
//!
//! - **Recipe methods** expand into `have_enough` subtasks for the rule's
//!   requirements (declared order) and consumables (dependency order),
//!   followed by the primitive operator invocation. They are structurally
//!   always applicable; runtime infeasibility is discovered when the
//!   generated subtasks are themselves expanded.
//! - **Gather methods** are the deterministic tool-selection policy for
//!   raw resources: check owned gathering tools from the highest tier
//!   downward and emit exactly one operator invocation for the best tier
//!   held, falling back to the most primitive alternative (first acquiring
//!   its tool if it needs one). This collapses several competing recipe
//!   alternatives into one deterministic choice.
//!
//! Each method carries a compiled [`PriorityKey`] used to order
//! alternatives: cheaper, lower-tier, simpler recipes are tried first.

use foundry_types::{AgentId, ItemId, RecipeId, State, Task};

use crate::tier::ToolTier;

/// The compiled ordering key for a method alternative.
///
/// Ordering is lexicographic over (tool tier, time cost, subtask count),
/// ascending -- a deliberate bias toward the fast, primitive path before
/// slower or tool-gated alternatives. The key determines which branch the
/// search explores first but never removes an alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PriorityKey {
    /// The maximum material tier among the rule's required tools.
    pub tier: ToolTier,
    /// The rule's time cost.
    pub time: u32,
    /// The number of subtasks the method expands into.
    pub subtasks: usize,
}

/// One rung of a gather ladder: a single gathering recipe and the tool
/// that gates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatherRung {
    /// The gathering recipe this rung invokes.
    pub recipe: RecipeId,
    /// The tier of the gating tool (`Unranked` for bare-handed rungs).
    pub tier: ToolTier,
    /// The recipe's time cost.
    pub time: u32,
    /// All required items of the recipe, in declared order.
    pub requires: Vec<(ItemId, u32)>,
    /// The highest-tier required tool, if the rung needs one.
    pub tool: Option<(ItemId, u32)>,
}

impl GatherRung {
    /// Whether `agent` currently holds everything this rung requires.
    pub fn satisfied(&self, state: &State, agent: &AgentId) -> bool {
        self.requires
            .iter()
            .all(|(item, amount)| state.meets(agent, item, *amount))
    }
}

/// The deterministic tool-selection method for one raw resource.
///
/// Rungs are ordered from the highest tool tier down to the most
/// primitive alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatherMethod {
    rungs: Vec<GatherRung>,
}

impl GatherMethod {
    /// The ladder rungs, best tier first.
    pub fn rungs(&self) -> &[GatherRung] {
        &self.rungs
    }

    fn expand(&self, state: &State, agent: &AgentId) -> Vec<Task> {
        for rung in &self.rungs {
            if rung.satisfied(state, agent) {
                return vec![Task::Apply {
                    agent: agent.clone(),
                    recipe: rung.recipe.clone(),
                }];
            }
        }

        // Nothing owned: take the most primitive rung, acquiring whatever
        // it requires first.
        let Some(fallback) = self.rungs.last() else {
            return Vec::new();
        };
        let mut tasks: Vec<Task> = fallback
            .requires
            .iter()
            .map(|(item, amount)| Task::HaveEnough {
                agent: agent.clone(),
                item: item.clone(),
                amount: *amount,
            })
            .collect();
        tasks.push(Task::Apply {
            agent: agent.clone(),
            recipe: fallback.recipe.clone(),
        });
        tasks
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RecipeMethod {
    recipe: RecipeId,
    requires: Vec<(ItemId, u32)>,
    consumes: Vec<(ItemId, u32)>,
}

impl RecipeMethod {
    fn expand(&self, agent: &AgentId) -> Vec<Task> {
        let mut tasks: Vec<Task> =
            Vec::with_capacity(self.requires.len().saturating_add(self.consumes.len()).saturating_add(1));
        for (item, amount) in &self.requires {
            tasks.push(Task::HaveEnough {
                agent: agent.clone(),
                item: item.clone(),
                amount: *amount,
            });
        }
        for (item, amount) in &self.consumes {
            tasks.push(Task::HaveEnough {
                agent: agent.clone(),
                item: item.clone(),
                amount: *amount,
            });
        }
        tasks.push(Task::Apply {
            agent: agent.clone(),
            recipe: self.recipe.clone(),
        });
        tasks
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum MethodKind {
    Recipe(RecipeMethod),
    Gather(GatherMethod),
}

/// A compiled method alternative for a production task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    kind: MethodKind,
    priority: PriorityKey,
}

impl Method {
    /// Build a recipe method with the given pre-ordered subtask sources.
    pub const fn for_recipe(
        recipe: RecipeId,
        requires: Vec<(ItemId, u32)>,
        consumes: Vec<(ItemId, u32)>,
        priority: PriorityKey,
    ) -> Self {
        Self {
            kind: MethodKind::Recipe(RecipeMethod {
                recipe,
                requires,
                consumes,
            }),
            priority,
        }
    }

    /// Build a gather method from a descending tool ladder.
    ///
    /// The priority key is taken from the fallback (most primitive) rung.
    pub fn for_gathering(rungs: Vec<GatherRung>) -> Self {
        let priority = rungs.last().map_or(
            PriorityKey {
                tier: ToolTier::Unranked,
                time: 0,
                subtasks: 1,
            },
            |fallback| PriorityKey {
                tier: fallback.tier,
                time: fallback.time,
                subtasks: fallback.requires.len().saturating_add(1),
            },
        );
        Self {
            kind: MethodKind::Gather(GatherMethod { rungs }),
            priority,
        }
    }

    /// The compiled ordering key.
    pub const fn priority(&self) -> &PriorityKey {
        &self.priority
    }

    /// The recipe a recipe method invokes (gather methods pick at
    /// expansion time).
    pub const fn recipe(&self) -> Option<&RecipeId> {
        match &self.kind {
            MethodKind::Recipe(method) => Some(&method.recipe),
            MethodKind::Gather(_) => None,
        }
    }

    /// Downcast to the gather ladder, if this is a gather method.
    pub const fn as_gather(&self) -> Option<&GatherMethod> {
        match &self.kind {
            MethodKind::Gather(method) => Some(method),
            MethodKind::Recipe(_) => None,
        }
    }

    /// Expand into the ordered subtask list for `agent`.
    pub fn expand(&self, state: &State, agent: &AgentId) -> Vec<Task> {
        match &self.kind {
            MethodKind::Recipe(method) => method.expand(agent),
            MethodKind::Gather(method) => method.expand(state, agent),
        }
    }
}
