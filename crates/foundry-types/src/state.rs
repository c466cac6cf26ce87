//! The mutable planning state: per-agent item quantities and time budgets.
//!
//! A [`State`] is created once per planning call, mutated in place along
//! the active search branch by operator application, and cloned wherever
//! the engine must preserve a snapshot to backtrack to. Cloning produces a
//! fully independent copy -- mutating the clone never affects the original,
//! which is the invariant backtracking correctness rests on.
//!
//! Quantities are unsigned; the type itself cannot represent a negative
//! balance. Reads of names never written return 0 rather than an error,
//! matching the contract that every declared item is implicitly present at
//! quantity zero. Validation of *which* names may appear lives in the
//! domain compiler, not here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::{AgentId, ItemId};

/// An agent-indexed snapshot of item quantities and remaining time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    inventories: BTreeMap<AgentId, BTreeMap<ItemId, u32>>,
    clocks: BTreeMap<AgentId, u32>,
}

impl State {
    /// Create an empty state with no agents.
    pub const fn new() -> Self {
        Self {
            inventories: BTreeMap::new(),
            clocks: BTreeMap::new(),
        }
    }

    /// The quantity of `item` held by `agent` (0 if never set).
    pub fn get(&self, agent: &AgentId, item: &ItemId) -> u32 {
        self.inventories
            .get(agent)
            .and_then(|inv| inv.get(item))
            .copied()
            .unwrap_or(0)
    }

    /// Set the quantity of `item` held by `agent`.
    pub fn set(&mut self, agent: &AgentId, item: &ItemId, quantity: u32) {
        self.inventories
            .entry(agent.clone())
            .or_default()
            .insert(item.clone(), quantity);
    }

    /// The remaining time budget for `agent` (0 if never set).
    pub fn remaining_time(&self, agent: &AgentId) -> u32 {
        self.clocks.get(agent).copied().unwrap_or(0)
    }

    /// Set the remaining time budget for `agent`.
    pub fn set_remaining_time(&mut self, agent: &AgentId, time: u32) {
        self.clocks.insert(agent.clone(), time);
    }

    /// Whether `agent` holds at least `amount` of `item`.
    pub fn meets(&self, agent: &AgentId, item: &ItemId, amount: u32) -> bool {
        self.get(agent, item) >= amount
    }
}
