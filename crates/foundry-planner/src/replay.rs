//! Plan replay: re-execute a plan against an initial state.
//!
//! Replay applies each step's operator in order, failing loudly if any
//! step is inapplicable. Because operators check every precondition before
//! applying effects, a successful replay certifies the plan's internal
//! consistency: no resource quantity or time budget ever went negative at
//! any prefix. Tests use this to verify the engine's output end to end.

use foundry_domain::Domain;
use foundry_types::{Plan, RecipeId, State, Task};

/// Errors raised while replaying a plan.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// A step cites a recipe the domain has no operator for.
    #[error("step {index} cites unknown recipe '{recipe}'")]
    UnknownRecipe {
        /// The zero-based step index.
        index: usize,
        /// The unknown recipe name.
        recipe: RecipeId,
    },

    /// A step's operator was inapplicable in the state reached so far.
    #[error("step {index}: op_{recipe} is not applicable")]
    Inapplicable {
        /// The zero-based step index.
        index: usize,
        /// The recipe that failed to apply.
        recipe: RecipeId,
    },
}

/// Replay `plan` from `initial`, returning the final state.
///
/// # Errors
///
/// [`ReplayError`] when a step cites an unknown recipe or fails its
/// operator's precondition checks.
pub fn replay(domain: &Domain, initial: &State, plan: &Plan) -> Result<State, ReplayError> {
    let mut state = initial.clone();
    for (index, step) in plan.iter().enumerate() {
        let Some(operator) = domain.registry().operator(&step.recipe) else {
            return Err(ReplayError::UnknownRecipe {
                index,
                recipe: step.recipe.clone(),
            });
        };
        state = operator
            .apply(&state, &step.agent)
            .ok_or_else(|| ReplayError::Inapplicable {
                index,
                recipe: step.recipe.clone(),
            })?;
    }
    Ok(state)
}

/// Whether `state` satisfies every `have_enough` goal in `goals`.
///
/// Non-goal tasks (production dispatch, operator invocations) are not
/// conditions and are ignored.
pub fn satisfies(state: &State, goals: &[Task]) -> bool {
    goals.iter().all(|task| match task {
        Task::HaveEnough {
            agent,
            item,
            amount,
        } => state.meets(agent, item, *amount),
        Task::Produce { .. } | Task::Apply { .. } => true,
    })
}
