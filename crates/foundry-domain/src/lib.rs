//! Domain compiler for the Foundry planner.
//!
//! This crate turns a declarative recipe table ([`DomainSpec`]) into the
//! primitives the decomposition engine consumes: prioritized [`Method`]
//! alternatives per produced item, one [`Operator`] per recipe, and the
//! derived metadata (tool tiers, durable goods, gather ladders) the
//! heuristic layer relies on. Compilation validates every cited name, so
//! malformed domains fail here rather than at search time.
//!
//! # Modules
//!
//! - [`error`] -- [`DomainError`] for malformed rule tables
//! - [`tier`] -- [`ToolTier`] ranking and tool-kind classification
//! - [`dependency`] -- Production dependency graph and topological
//!   ordering of consumed sets
//! - [`operator`] -- Compiled precondition-checked state transitions
//! - [`method`] -- Compiled method value objects (recipe expansion and
//!   deterministic tool-selection gathering)
//! - [`registry`] -- Task-name lookup: produced item -> methods,
//!   recipe -> operator
//! - [`compiler`] -- [`compile`]: the rule table into a [`Domain`]
//! - [`catalog`] -- The built-in standard crafting economy used by tests
//!
//! [`DomainSpec`]: foundry_types::DomainSpec

pub mod catalog;
pub mod compiler;
pub mod dependency;
pub mod error;
pub mod method;
pub mod operator;
pub mod registry;
pub mod tier;

// Re-export primary types at crate root.
pub use compiler::{Domain, compile};
pub use dependency::DependencyGraph;
pub use error::DomainError;
pub use method::{GatherMethod, GatherRung, Method, PriorityKey};
pub use operator::Operator;
pub use registry::MethodRegistry;
pub use tier::{ToolTier, kind_of, tier_of};
