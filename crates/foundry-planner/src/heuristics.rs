//! Heuristic hooks: the pruning predicate and method-ordering function.
//!
//! Both hooks are consulted by the engine at every decomposition step and
//! receive the full search context as explicit parameters -- state, current
//! task, remaining work list, plan so far, depth, and the calling stack of
//! unresolved compound expansions. They read the state but never mutate it.
//!
//! The pruning predicate keeps the search tractable in domains with cyclic
//! production dependencies (wood is needed for the axe that gathers wood);
//! the ordering function lets a caller permute method alternatives without
//! being able to add or remove any.

use std::collections::BTreeSet;

use foundry_domain::{Domain, Method, ToolTier, kind_of, tier_of};
use foundry_types::{ItemId, Plan, State, Task};

/// One unresolved compound expansion on the calling stack.
///
/// The frame records the length of the work list *behind* the expansion's
/// spliced subtasks; once the list shrinks back to that length, every
/// subtask has been consumed and the frame no longer counts as an
/// ancestor of the current task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFrame {
    task: Task,
    tail: usize,
}

impl CallFrame {
    /// Create a frame for a compound task expanded with `tail` work-list
    /// entries behind its subtasks.
    pub const fn new(task: Task, tail: usize) -> Self {
        Self { task, tail }
    }

    /// The compound task being expanded.
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// The work-list length recorded at expansion time.
    pub const fn tail(&self) -> usize {
        self.tail
    }
}

/// Everything the heuristic hooks may inspect at one decomposition step.
#[derive(Debug, Clone, Copy)]
pub struct SearchContext<'a> {
    /// The current planning state (read-only).
    pub state: &'a State,
    /// The compound task whose alternative is about to be expanded.
    pub task: &'a Task,
    /// The work list behind the current task.
    pub remaining: &'a [Task],
    /// The plan accumulated so far.
    pub plan: &'a Plan,
    /// The current decomposition depth.
    pub depth: usize,
    /// Unresolved ancestor expansions, outermost first.
    pub calling_stack: &'a [CallFrame],
}

/// A predicate that can forbid expansion of a method alternative.
///
/// Returning `true` aborts the alternative exactly as if it were
/// inapplicable; the engine moves on to the next one.
pub trait PruneHeuristic {
    /// Whether to prune the alternative about to be expanded.
    fn prune(&self, ctx: &SearchContext<'_>) -> bool;
}

/// A function that may permute method alternatives before enumeration.
///
/// Implementations must return the same alternatives in a new order --
/// never adding or removing any. The engine verifies this and ignores
/// orderings that violate the contract.
pub trait MethodOrdering {
    /// Reorder the alternatives for the current task.
    fn reorder<'m>(&self, ctx: &SearchContext<'_>, methods: Vec<&'m Method>) -> Vec<&'m Method>;
}

/// The identity ordering: alternatives stay in compiled priority order.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityOrdering;

impl IdentityOrdering {
    /// Create the identity ordering.
    pub const fn new() -> Self {
        Self
    }
}

impl MethodOrdering for IdentityOrdering {
    fn reorder<'m>(&self, _ctx: &SearchContext<'_>, methods: Vec<&'m Method>) -> Vec<&'m Method> {
        methods
    }
}

/// The default pruning heuristic.
///
/// Implements the four cuts the search needs to stay tractable:
///
/// 1. Depth-ceiling cutoff.
/// 2. Never re-produce a durable single-unit good (tool or workstation)
///    already owned.
/// 3. Never produce a lower-tier tool when a strictly higher tier of the
///    same kind is already owned.
/// 4. Cycle guard: a production task for an item already unresolved on
///    the calling stack is self-referential and cannot make progress.
#[derive(Debug, Clone)]
pub struct DefaultPrune {
    max_depth: usize,
    durable: BTreeSet<ItemId>,
    tools: Vec<ItemId>,
}

impl DefaultPrune {
    /// Build the default heuristic from a compiled domain's metadata.
    pub fn for_domain(domain: &Domain, max_depth: usize) -> Self {
        Self {
            max_depth,
            durable: domain.durable_items().cloned().collect(),
            tools: domain.tools().cloned().collect(),
        }
    }
}

impl PruneHeuristic for DefaultPrune {
    fn prune(&self, ctx: &SearchContext<'_>) -> bool {
        if ctx.depth > self.max_depth {
            return true;
        }

        let Some(item) = ctx.task.production_item() else {
            return false;
        };
        let agent = ctx.task.agent();

        // A durable good is only ever needed once.
        if self.durable.contains(item) && ctx.state.meets(agent, item, 1) {
            return true;
        }

        // A lower tier of an owned tool kind is never worth making.
        let tier = tier_of(item);
        if tier > ToolTier::Unranked {
            let kind = kind_of(item);
            for tool in &self.tools {
                if kind_of(tool) == kind
                    && tier_of(tool) > tier
                    && ctx.state.meets(agent, tool, 1)
                {
                    return true;
                }
            }
        }

        // Producing an item whose production is already in progress above
        // us can only recurse forever.
        ctx.calling_stack
            .iter()
            .any(|frame| frame.task().production_item() == Some(item) && frame.task().agent() == agent)
    }
}
