//! Operators: compiled primitive actions over the planning state.
//!
//! An operator is the executable form of one recipe. Application is a pure
//! transition: preconditions are checked against the given state and, only
//! if every check passes, the effects are applied to a fresh clone. A
//! failed application returns `None` and leaves the input untouched -- the
//! engine probes operators without committing to a branch, so partial
//! effects on failure would corrupt backtracking.

use std::collections::BTreeMap;

use foundry_types::{AgentId, ItemId, RecipeId, RecipeSpec, State};

/// A compiled, precondition-checked state transition for one recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    recipe: RecipeId,
    requires: BTreeMap<ItemId, u32>,
    consumes: BTreeMap<ItemId, u32>,
    produces: BTreeMap<ItemId, u32>,
    time: u32,
}

impl Operator {
    /// Compile an operator from a recipe rule.
    pub fn from_rule(recipe: RecipeId, rule: &RecipeSpec) -> Self {
        Self {
            recipe,
            requires: rule.requires.clone(),
            consumes: rule.consumes.clone(),
            produces: rule.produces.clone(),
            time: rule.time,
        }
    }

    /// The recipe this operator executes.
    pub const fn recipe(&self) -> &RecipeId {
        &self.recipe
    }

    /// Apply the operator for `agent`, returning the successor state.
    ///
    /// Checks, in order: remaining time covers the recipe's cost, every
    /// required quantity is held, every consumed quantity is held. Any
    /// failed check returns `None` with no mutation anywhere. On success
    /// the returned state has the time and consumables deducted and the
    /// products added; the input state is never modified.
    pub fn apply(&self, state: &State, agent: &AgentId) -> Option<State> {
        if state.remaining_time(agent) < self.time {
            return None;
        }
        for (item, amount) in &self.requires {
            if state.get(agent, item) < *amount {
                return None;
            }
        }
        for (item, amount) in &self.consumes {
            if state.get(agent, item) < *amount {
                return None;
            }
        }

        let mut next = state.clone();
        next.set_remaining_time(agent, state.remaining_time(agent).saturating_sub(self.time));
        for (item, amount) in &self.consumes {
            let held = next.get(agent, item);
            next.set(agent, item, held.saturating_sub(*amount));
        }
        for (item, amount) in &self.produces {
            let held = next.get(agent, item);
            next.set(agent, item, held.saturating_add(*amount));
        }
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> AgentId {
        AgentId::new("agent")
    }

    fn item(name: &str) -> ItemId {
        ItemId::new(name)
    }

    fn smelt() -> Operator {
        Operator::from_rule(
            RecipeId::new("smelt_ore"),
            &RecipeSpec {
                requires: BTreeMap::from([(item("furnace"), 1)]),
                consumes: BTreeMap::from([(item("ore"), 1), (item("coal"), 1)]),
                produces: BTreeMap::from([(item("ingot"), 1)]),
                time: 5,
            },
        )
    }

    fn ready_state() -> State {
        let mut state = State::new();
        state.set_remaining_time(&agent(), 20);
        state.set(&agent(), &item("furnace"), 1);
        state.set(&agent(), &item("ore"), 2);
        state.set(&agent(), &item("coal"), 1);
        state
    }

    #[test]
    fn applies_effects_on_success() {
        let state = ready_state();
        let next = smelt().apply(&state, &agent());
        assert!(next.is_some());
        let next = next.unwrap_or_else(State::new);
        assert_eq!(next.remaining_time(&agent()), 15);
        assert_eq!(next.get(&agent(), &item("ore")), 1);
        assert_eq!(next.get(&agent(), &item("coal")), 0);
        assert_eq!(next.get(&agent(), &item("ingot")), 1);
        // Required items are checked, not deducted.
        assert_eq!(next.get(&agent(), &item("furnace")), 1);
    }

    #[test]
    fn input_state_is_untouched_on_success() {
        let state = ready_state();
        let before = state.clone();
        let _ = smelt().apply(&state, &agent());
        assert_eq!(state, before);
    }

    #[test]
    fn insufficient_time_is_inapplicable() {
        let mut state = ready_state();
        state.set_remaining_time(&agent(), 4);
        assert!(smelt().apply(&state, &agent()).is_none());
    }

    #[test]
    fn missing_requirement_is_inapplicable() {
        let mut state = ready_state();
        state.set(&agent(), &item("furnace"), 0);
        assert!(smelt().apply(&state, &agent()).is_none());
    }

    #[test]
    fn missing_consumable_is_inapplicable() {
        let mut state = ready_state();
        state.set(&agent(), &item("coal"), 0);
        let before = state.clone();
        assert!(smelt().apply(&state, &agent()).is_none());
        // No mutation on failure.
        assert_eq!(state, before);
    }

    #[test]
    fn other_agents_cannot_satisfy_checks() {
        let mut state = State::new();
        let other = AgentId::new("other");
        state.set_remaining_time(&other, 20);
        state.set(&other, &item("furnace"), 1);
        state.set(&other, &item("ore"), 1);
        state.set(&other, &item("coal"), 1);
        assert!(smelt().apply(&state, &agent()).is_none());
    }
}
