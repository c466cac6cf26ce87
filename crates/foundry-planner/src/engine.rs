//! The decomposition engine: depth-first backtracking over task lists.
//!
//! The engine walks a work list of tasks against the compiled domain.
//! Primitive tasks apply their operator to the current state; compound
//! tasks enumerate method alternatives in priority order, splice the
//! chosen expansion in front of the remaining work, and recurse. Failure
//! anywhere abandons the alternative and restores the previous view --
//! operators return fresh states and expansions never mutate in place, so
//! a sibling alternative always observes exactly the state that existed
//! before the failed one was tried.
//!
//! The goal-check pseudo-task `have_enough` carries a built-in dispatch:
//! a zero-cost check that succeeds with no subtasks when the quantity
//! already meets the threshold, an optional tool-investment alternative
//! for large raw-resource deficits, and the production alternative that
//! produces one batch and re-checks.
//!
//! The first sequence of choices that completes the work list wins; the
//! engine performs no cost comparison across successful plans.

use tracing::{debug, info, warn};

use foundry_domain::{Domain, Method};
use foundry_types::{AgentId, ItemId, Plan, PlanStep, ProblemSpec, State, Task};

use crate::config::SearchConfig;
use crate::error::PlanError;
use crate::heuristics::{
    CallFrame, DefaultPrune, IdentityOrdering, MethodOrdering, PruneHeuristic, SearchContext,
};

/// The planning engine for one compiled domain.
pub struct Planner<'d> {
    domain: &'d Domain,
    config: SearchConfig,
    prune: Box<dyn PruneHeuristic>,
    ordering: Box<dyn MethodOrdering>,
}

impl<'d> Planner<'d> {
    /// Create a planner with the default configuration and heuristics.
    pub fn new(domain: &'d Domain) -> Self {
        Self::with_config(domain, SearchConfig::default())
    }

    /// Create a planner with an explicit configuration.
    pub fn with_config(domain: &'d Domain, config: SearchConfig) -> Self {
        Self {
            domain,
            config,
            prune: Box::new(DefaultPrune::for_domain(domain, config.max_depth)),
            ordering: Box::new(IdentityOrdering::new()),
        }
    }

    /// Replace the pruning heuristic.
    #[must_use]
    pub fn with_prune(mut self, prune: Box<dyn PruneHeuristic>) -> Self {
        self.prune = prune;
        self
    }

    /// Replace the method-ordering hook.
    #[must_use]
    pub fn with_ordering(mut self, ordering: Box<dyn MethodOrdering>) -> Self {
        self.ordering = ordering;
        self
    }

    /// Plan for one problem instance: build the initial state from the
    /// domain, derive the goal tasks, and search.
    pub fn solve_problem(&self, agent: &AgentId, problem: &ProblemSpec) -> Result<Plan, PlanError> {
        let state = self.domain.initial_state(agent, problem)?;
        let goals = problem.goal_tasks(agent);
        self.solve(&state, &goals)
    }

    /// Search for a plan that completes `goals` from `state`.
    ///
    /// Returns the first complete plan found under the compiled (and
    /// optionally reordered) alternative order. An empty plan is a valid
    /// success: every goal already held.
    ///
    /// # Errors
    ///
    /// [`PlanError::Unsolvable`] when the explored search space contains
    /// no complete plan; [`PlanError::UndeclaredGoal`] /
    /// [`PlanError::UnknownRecipe`] when a goal cites names the domain
    /// does not know.
    pub fn solve(&self, state: &State, goals: &[Task]) -> Result<Plan, PlanError> {
        self.validate_goals(goals)?;

        info!(goals = goals.len(), "planning started");
        let mut plan = Plan::new();
        let mut stack: Vec<CallFrame> = Vec::new();
        if self.seek(state, goals, &mut plan, 0, &mut stack) {
            info!(steps = plan.len(), "plan found");
            Ok(plan)
        } else {
            info!("search exhausted without a plan");
            Err(PlanError::Unsolvable)
        }
    }

    fn validate_goals(&self, goals: &[Task]) -> Result<(), PlanError> {
        for task in goals {
            match task {
                Task::HaveEnough { item, .. } | Task::Produce { item, .. } => {
                    if !self.domain.declares(item) {
                        return Err(PlanError::UndeclaredGoal { item: item.clone() });
                    }
                }
                Task::Apply { recipe, .. } => {
                    if self.domain.registry().operator(recipe).is_none() {
                        return Err(PlanError::UnknownRecipe {
                            recipe: recipe.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// The recursive search. Returns `true` when the work list was fully
    /// resolved; `plan` then holds the accumulated steps. On `false`, the
    /// plan and calling stack are restored to their entry values.
    fn seek(
        &self,
        state: &State,
        tasks: &[Task],
        plan: &mut Plan,
        depth: usize,
        stack: &mut Vec<CallFrame>,
    ) -> bool {
        // Termination backstop, independent of the pruning hook.
        if depth > self.config.max_depth {
            return false;
        }

        // A frame whose recorded tail has caught up with the work list has
        // had all its spliced subtasks consumed: it is no longer an
        // ancestor of the head task. Drop such frames for the duration of
        // this call and restore them on failure, since backtracking can
        // rewind to alternatives that predate the resolution.
        let mut resolved: Vec<CallFrame> = Vec::new();
        while stack.last().is_some_and(|frame| frame.tail() >= tasks.len()) {
            if let Some(frame) = stack.pop() {
                resolved.push(frame);
            }
        }
        let found = self.seek_head(state, tasks, plan, depth, stack);
        if !found {
            while let Some(frame) = resolved.pop() {
                stack.push(frame);
            }
        }
        found
    }

    fn seek_head(
        &self,
        state: &State,
        tasks: &[Task],
        plan: &mut Plan,
        depth: usize,
        stack: &mut Vec<CallFrame>,
    ) -> bool {
        let Some((task, rest)) = tasks.split_first() else {
            return true;
        };

        match task {
            Task::Apply { agent, recipe } => {
                let Some(operator) = self.domain.registry().operator(recipe) else {
                    debug!(%task, "no operator registered");
                    return false;
                };
                let Some(next) = operator.apply(state, agent) else {
                    debug!(%task, "operator inapplicable");
                    return false;
                };
                plan.steps.push(PlanStep {
                    agent: agent.clone(),
                    recipe: recipe.clone(),
                });
                if self.seek(&next, rest, plan, depth.saturating_add(1), stack) {
                    true
                } else {
                    plan.steps.pop();
                    false
                }
            }
            Task::HaveEnough {
                agent,
                item,
                amount,
            } => self.expand_have_enough(state, task, agent, item, *amount, rest, plan, depth, stack),
            Task::Produce { agent, item } => {
                self.expand_produce(state, task, agent, item, rest, plan, depth, stack)
            }
        }
    }

    /// Built-in dispatch for the `have_enough` goal check.
    #[allow(clippy::too_many_arguments)]
    fn expand_have_enough(
        &self,
        state: &State,
        task: &Task,
        agent: &AgentId,
        item: &ItemId,
        amount: u32,
        rest: &[Task],
        plan: &mut Plan,
        depth: usize,
        stack: &mut Vec<CallFrame>,
    ) -> bool {
        // Check alternative: already satisfied, expand to nothing.
        if state.meets(agent, item, amount)
            && !self.pruned(state, task, rest, plan, depth, stack)
            && self.try_expansion(state, task, Vec::new(), rest, plan, depth, stack)
        {
            return true;
        }

        // Investment alternative: a large deficit of a raw-gathered item
        // is worth a better tool first.
        let deficit = amount.saturating_sub(state.get(agent, item));
        if self.config.invest_threshold > 0
            && deficit >= self.config.invest_threshold
            && self.domain.is_raw(item)
            && let Some((tool, need)) = self.domain.gather_upgrade(item, state, agent)
            && !self.pruned(state, task, rest, plan, depth, stack)
        {
            let subtasks = vec![
                Task::HaveEnough {
                    agent: agent.clone(),
                    item: tool,
                    amount: need,
                },
                Task::Produce {
                    agent: agent.clone(),
                    item: item.clone(),
                },
                task.clone(),
            ];
            if self.try_expansion(state, task, subtasks, rest, plan, depth, stack) {
                return true;
            }
        }

        // Production alternative: produce one batch, then re-check.
        if !self.pruned(state, task, rest, plan, depth, stack) {
            let subtasks = vec![
                Task::Produce {
                    agent: agent.clone(),
                    item: item.clone(),
                },
                task.clone(),
            ];
            if self.try_expansion(state, task, subtasks, rest, plan, depth, stack) {
                return true;
            }
        }

        false
    }

    /// Enumerate the registered method alternatives for a production task.
    #[allow(clippy::too_many_arguments)]
    fn expand_produce(
        &self,
        state: &State,
        task: &Task,
        agent: &AgentId,
        item: &ItemId,
        rest: &[Task],
        plan: &mut Plan,
        depth: usize,
        stack: &mut Vec<CallFrame>,
    ) -> bool {
        let Some(methods) = self.domain.registry().methods_for(item) else {
            debug!(%task, "no producer registered");
            return false;
        };

        let compiled: Vec<&Method> = methods.iter().collect();
        let chosen = {
            let ctx = self.context(state, task, rest, plan, depth, stack);
            let reordered = self.ordering.reorder(&ctx, compiled.clone());
            if is_permutation(&compiled, &reordered) {
                reordered
            } else {
                warn!(%task, "ordering hook violated the permutation contract; using compiled order");
                compiled
            }
        };

        for method in chosen {
            if self.pruned(state, task, rest, plan, depth, stack) {
                continue;
            }
            let subtasks = method.expand(state, agent);
            if self.try_expansion(state, task, subtasks, rest, plan, depth, stack) {
                return true;
            }
        }
        false
    }

    /// Try one expansion of a compound task: push the calling frame,
    /// splice the subtasks in front of the remaining work, and recurse.
    /// On failure the calling stack is restored for the next alternative.
    #[allow(clippy::too_many_arguments)]
    fn try_expansion(
        &self,
        state: &State,
        task: &Task,
        subtasks: Vec<Task>,
        rest: &[Task],
        plan: &mut Plan,
        depth: usize,
        stack: &mut Vec<CallFrame>,
    ) -> bool {
        let saved = stack.len();
        stack.push(CallFrame::new(task.clone(), rest.len()));

        let mut next = subtasks;
        next.extend_from_slice(rest);
        if self.seek(state, &next, plan, depth.saturating_add(1), stack) {
            true
        } else {
            stack.truncate(saved);
            false
        }
    }

    fn pruned(
        &self,
        state: &State,
        task: &Task,
        rest: &[Task],
        plan: &Plan,
        depth: usize,
        stack: &[CallFrame],
    ) -> bool {
        let ctx = self.context(state, task, rest, plan, depth, stack);
        self.prune.prune(&ctx)
    }

    fn context<'a>(
        &self,
        state: &'a State,
        task: &'a Task,
        rest: &'a [Task],
        plan: &'a Plan,
        depth: usize,
        stack: &'a [CallFrame],
    ) -> SearchContext<'a> {
        SearchContext {
            state,
            task,
            remaining: rest,
            plan,
            depth,
            calling_stack: stack,
        }
    }
}

/// Whether `reordered` contains exactly the same method alternatives as
/// `compiled` (compared by identity), in any order.
fn is_permutation(compiled: &[&Method], reordered: &[&Method]) -> bool {
    if compiled.len() != reordered.len() {
        return false;
    }
    let mut a: Vec<*const Method> = compiled.iter().map(|m| core::ptr::from_ref::<Method>(*m)).collect();
    let mut b: Vec<*const Method> = reordered.iter().map(|m| core::ptr::from_ref::<Method>(*m)).collect();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}
