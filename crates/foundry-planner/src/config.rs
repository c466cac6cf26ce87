//! Tunable parameters for the decomposition search.

/// Configuration for one [`Planner`] instance.
///
/// [`Planner`]: crate::engine::Planner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Maximum decomposition depth before a branch is unconditionally
    /// pruned (default: 800).
    ///
    /// Depth is strictly increasing along any decomposition chain, so the
    /// ceiling guarantees termination even when a domain contains cycles
    /// the heuristics miss. Exceeding it is a branch failure, never an
    /// error.
    pub max_depth: usize,

    /// Deficit at which a `have_enough` check on a raw-gathered item
    /// considers investing in the next gathering tool tier before
    /// producing (default: 8; 0 disables the alternative).
    ///
    /// Gathering a large quantity with a slow tool costs more than
    /// crafting the faster tool first; backtracking covers the case where
    /// the upgrade turns out to be infeasible.
    pub invest_threshold: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 800,
            invest_threshold: 8,
        }
    }
}
