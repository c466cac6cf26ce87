//! Shared type definitions for the Foundry planner.
//!
//! This crate is the single source of truth for the data model shared by
//! the domain compiler and the decomposition engine. It contains no
//! planning logic -- only the value types the other crates operate on.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe name wrappers for agents, items, and recipes
//! - [`task`] -- The [`Task`] enum: goal checks, production dispatch, and
//!   primitive operator invocations
//! - [`plan`] -- The [`Plan`] produced by a successful search
//! - [`spec`] -- Declarative domain input ([`DomainSpec`], [`ProblemSpec`])
//!   mirroring the external rule-table format
//! - [`state`] -- The mutable [`State`]: per-agent item quantities and
//!   remaining time

pub mod ids;
pub mod plan;
pub mod spec;
pub mod state;
pub mod task;

// Re-export all public types at crate root for convenience.
pub use ids::{AgentId, ItemId, RecipeId};
pub use plan::{Plan, PlanStep};
pub use spec::{DomainSpec, ProblemSpec, RecipeSpec};
pub use state::State;
pub use task::Task;
