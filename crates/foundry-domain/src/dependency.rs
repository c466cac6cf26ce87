//! Production dependency graph over item names.
//!
//! Item X *depends on* item Y when some recipe producing X consumes Y.
//! The compiler uses the transitive form of this relation to order a
//! recipe's consumed items before emitting them as subtasks: a consumed
//! item whose own production depends on another consumed item is requested
//! first, so producing it cannot silently eat the other's already-checked
//! stock. Requesting in the wrong order forces the engine down infeasible
//! branches before the prerequisite is available.
//!
//! Ordering uses Kahn's algorithm. A cycle among a recipe's consumed set
//! falls back to the declared order -- never a compile failure.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use foundry_types::{DomainSpec, ItemId};

/// The direct production dependency relation for a domain.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    direct: BTreeMap<ItemId, BTreeSet<ItemId>>,
}

impl DependencyGraph {
    /// Build the graph by scanning every recipe's consumed set.
    pub fn from_spec(spec: &DomainSpec) -> Self {
        let mut direct: BTreeMap<ItemId, BTreeSet<ItemId>> = BTreeMap::new();
        for rule in spec.recipes.values() {
            for product in rule.produces.keys() {
                direct
                    .entry(product.clone())
                    .or_default()
                    .extend(rule.consumes.keys().cloned());
            }
        }
        Self { direct }
    }

    /// Every item `item`'s production transitively depends on.
    pub fn transitive_deps(&self, item: &ItemId) -> BTreeSet<ItemId> {
        let mut seen: BTreeSet<ItemId> = BTreeSet::new();
        let mut frontier: VecDeque<&ItemId> = VecDeque::new();
        frontier.push_back(item);

        while let Some(current) = frontier.pop_front() {
            if let Some(deps) = self.direct.get(current) {
                for dep in deps {
                    if dep != item && seen.insert(dep.clone()) {
                        frontier.push_back(dep);
                    }
                }
            }
        }
        seen
    }

    /// Order a consumed set so that dependents precede their dependencies.
    ///
    /// Item X is placed before item Y when X's production transitively
    /// depends on Y. Ties keep the declared (name) order. If the consumed
    /// set contains a dependency cycle, the declared order is returned
    /// unchanged.
    pub fn order_consumed(&self, consumed: &BTreeMap<ItemId, u32>) -> Vec<ItemId> {
        let declared: Vec<ItemId> = consumed.keys().cloned().collect();
        if declared.len() <= 1 {
            return declared;
        }

        let item_set: BTreeSet<&ItemId> = declared.iter().collect();

        // Edge x -> y means x must come before y.
        let mut successors: BTreeMap<&ItemId, Vec<&ItemId>> = BTreeMap::new();
        let mut in_degree: BTreeMap<&ItemId, usize> = BTreeMap::new();
        for x in &declared {
            successors.entry(x).or_default();
            in_degree.entry(x).or_insert(0);
        }
        for x in &declared {
            let deps = self.transitive_deps(x);
            for y in &declared {
                if x != y && deps.contains(y) {
                    successors.entry(x).or_default().push(y);
                    let entry = in_degree.entry(y).or_insert(0);
                    *entry = entry.saturating_add(1);
                }
            }
        }

        let mut queue: VecDeque<&ItemId> = VecDeque::new();
        for x in &declared {
            if in_degree.get(x).copied().unwrap_or(0) == 0 {
                queue.push_back(x);
            }
        }

        let mut ordered: Vec<ItemId> = Vec::with_capacity(declared.len());
        while let Some(node) = queue.pop_front() {
            ordered.push(node.clone());
            if let Some(next) = successors.get(node) {
                for &succ in next {
                    if let Some(degree) = in_degree.get_mut(succ) {
                        *degree = degree.saturating_sub(1);
                        if *degree == 0 && item_set.contains(succ) {
                            queue.push_back(succ);
                        }
                    }
                }
            }
        }

        if ordered.len() == declared.len() {
            ordered
        } else {
            // Cycle within the consumed set: keep the declared order.
            declared
        }
    }
}
