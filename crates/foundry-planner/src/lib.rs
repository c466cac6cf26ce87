//! Decomposition search engine for the Foundry planner.
//!
//! Given a compiled [`Domain`], an initial [`State`], and a goal task
//! list, the [`Planner`] runs a depth-first recursive backtracking search
//! over task decompositions and returns an ordered [`Plan`] of primitive
//! operator invocations -- or [`PlanError::Unsolvable`] when no alternative
//! anywhere in the (heuristically pruned) search space leads to success.
//!
//! # Modules
//!
//! - [`config`] -- Tunable search parameters ([`SearchConfig`])
//! - [`error`] -- [`PlanError`] for planning calls
//! - [`heuristics`] -- The pruning/ordering hook interfaces and their
//!   default implementations
//! - [`engine`] -- The [`Planner`] itself
//! - [`replay`] -- Plan replay and goal verification
//!
//! [`Domain`]: foundry_domain::Domain
//! [`State`]: foundry_types::State
//! [`Plan`]: foundry_types::Plan

pub mod config;
pub mod engine;
pub mod error;
pub mod heuristics;
pub mod replay;

// Re-export primary types at crate root.
pub use config::SearchConfig;
pub use engine::Planner;
pub use error::PlanError;
pub use heuristics::{
    CallFrame, DefaultPrune, IdentityOrdering, MethodOrdering, PruneHeuristic, SearchContext,
};
pub use replay::{ReplayError, replay, satisfies};
