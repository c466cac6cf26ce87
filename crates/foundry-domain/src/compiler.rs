//! The domain compiler: declarative recipe rules into engine primitives.
//!
//! Compilation happens once per rule table and produces a [`Domain`]: the
//! method/operator registry plus the derived metadata the heuristic layer
//! needs (tool set, durable goods, raw-gatherable items). The resulting
//! object is immutable and shared by reference across planning calls.
//!
//! Derivations beyond the registry:
//!
//! - **Durable goods** are the declared tools plus every item that appears
//!   in some rule's requirements and is never consumed by any rule (the
//!   bench and furnace pattern). Producing a second unit of a durable good
//!   is never useful, which the default pruning heuristic exploits.
//! - **Raw-gatherable items** are those whose every producing recipe
//!   consumes nothing -- resources pulled from the world by hand or tool.
//!   These get a single deterministic gather method instead of enumerated
//!   alternatives, avoiding wasted branches on tool tiers not held.

use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use foundry_types::{AgentId, DomainSpec, ItemId, ProblemSpec, RecipeId, RecipeSpec, State};

use crate::dependency::DependencyGraph;
use crate::error::DomainError;
use crate::method::{GatherRung, Method, PriorityKey};
use crate::operator::Operator;
use crate::registry::MethodRegistry;
use crate::tier::{ToolTier, tier_of};

/// A compiled domain: the registry plus derived metadata.
#[derive(Debug, Clone)]
pub struct Domain {
    registry: MethodRegistry,
    declared: BTreeSet<ItemId>,
    tools: BTreeSet<ItemId>,
    durable: BTreeSet<ItemId>,
    raw: BTreeSet<ItemId>,
}

impl Domain {
    /// The method/operator registry.
    pub const fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    /// Whether `item` is declared in the domain (item or tool).
    pub fn declares(&self, item: &ItemId) -> bool {
        self.declared.contains(item)
    }

    /// Whether `item` is a durable single-unit good (tool or workstation).
    pub fn is_durable(&self, item: &ItemId) -> bool {
        self.durable.contains(item)
    }

    /// Whether `item` is gathered raw (no producing recipe consumes
    /// anything).
    pub fn is_raw(&self, item: &ItemId) -> bool {
        self.raw.contains(item)
    }

    /// Iterate over the declared tools in name order.
    pub fn tools(&self) -> impl Iterator<Item = &ItemId> {
        self.tools.iter()
    }

    /// Iterate over the durable goods in name order.
    pub fn durable_items(&self) -> impl Iterator<Item = &ItemId> {
        self.durable.iter()
    }

    /// Build the initial state for one planning instance.
    ///
    /// Every declared item starts at quantity 0, then the problem's
    /// initial assignment is applied; the agent's clock is set to the
    /// problem's time budget. An assignment citing an undeclared name is
    /// a [`DomainError::UndeclaredInitial`].
    pub fn initial_state(
        &self,
        agent: &AgentId,
        problem: &ProblemSpec,
    ) -> Result<State, DomainError> {
        let mut state = State::new();
        state.set_remaining_time(agent, problem.time);
        for item in &self.declared {
            state.set(agent, item, 0);
        }
        for (item, quantity) in &problem.initial {
            if !self.declared.contains(item) {
                return Err(DomainError::UndeclaredInitial { item: item.clone() });
            }
            state.set(agent, item, *quantity);
        }
        Ok(state)
    }

    /// The gathering-tool upgrade worth investing in for a raw item.
    ///
    /// Looks one rung above the agent's current position on the item's
    /// gather ladder (the best satisfied rung, or the fallback rung if
    /// none is). Returns `None` when the item has no gather ladder, the
    /// agent already sits on the top rung, or the upgrade is already
    /// owned.
    pub fn gather_upgrade(
        &self,
        item: &ItemId,
        state: &State,
        agent: &AgentId,
    ) -> Option<(ItemId, u32)> {
        let methods = self.registry.methods_for(item)?;
        let gather = methods.first()?.as_gather()?;
        let rungs = gather.rungs();
        let current = rungs
            .iter()
            .position(|rung| rung.satisfied(state, agent))
            .unwrap_or(rungs.len().saturating_sub(1));
        let upgrade = rungs.get(current.checked_sub(1)?)?;
        let (tool, amount) = upgrade.tool.clone()?;
        if state.meets(agent, &tool, amount) {
            return None;
        }
        Some((tool, amount))
    }
}

/// Compile a declarative rule table into a [`Domain`].
///
/// # Errors
///
/// Returns [`DomainError`] when a recipe cites an undeclared item or
/// produces nothing. Search-time infeasibility is never a compile error.
pub fn compile(spec: &DomainSpec) -> Result<Domain, DomainError> {
    let mut declared: BTreeSet<ItemId> = spec.items.iter().cloned().collect();
    declared.extend(spec.tools.iter().cloned());
    let tools: BTreeSet<ItemId> = spec.tools.iter().cloned().collect();

    validate(spec, &declared)?;

    let graph = DependencyGraph::from_spec(spec);

    // Group rules by each item they produce.
    let mut producers: BTreeMap<ItemId, Vec<(&RecipeId, &RecipeSpec)>> = BTreeMap::new();
    for (name, rule) in &spec.recipes {
        for product in rule.produces.keys() {
            producers.entry(product.clone()).or_default().push((name, rule));
        }
    }

    // Durable goods: declared tools, plus items required somewhere but
    // never consumed anywhere.
    let mut required: BTreeSet<ItemId> = BTreeSet::new();
    let mut consumed: BTreeSet<ItemId> = BTreeSet::new();
    for rule in spec.recipes.values() {
        required.extend(rule.requires.keys().cloned());
        consumed.extend(rule.consumes.keys().cloned());
    }
    let mut durable = tools.clone();
    durable.extend(required.difference(&consumed).cloned());

    let mut registry = MethodRegistry::default();
    let mut raw: BTreeSet<ItemId> = BTreeSet::new();

    for (item, rules) in &producers {
        if rules.iter().all(|(_, rule)| rule.consumes.is_empty()) {
            raw.insert(item.clone());
            registry.insert_methods(item.clone(), vec![gather_method(rules)]);
        } else {
            registry.insert_methods(item.clone(), recipe_methods(rules, &graph));
        }
    }

    for (name, rule) in &spec.recipes {
        registry.insert_operator(name.clone(), Operator::from_rule(name.clone(), rule));
    }

    info!(
        recipes = registry.operator_count(),
        products = registry.producer_count(),
        raw = raw.len(),
        durable = durable.len(),
        "domain compiled"
    );

    Ok(Domain {
        registry,
        declared,
        tools,
        durable,
        raw,
    })
}

fn validate(spec: &DomainSpec, declared: &BTreeSet<ItemId>) -> Result<(), DomainError> {
    for (name, rule) in &spec.recipes {
        if rule.produces.is_empty() {
            return Err(DomainError::NoProduct {
                recipe: name.clone(),
            });
        }
        let cited = rule
            .requires
            .keys()
            .chain(rule.consumes.keys())
            .chain(rule.produces.keys());
        for item in cited {
            if !declared.contains(item) {
                return Err(DomainError::UndeclaredItem {
                    recipe: name.clone(),
                    item: item.clone(),
                });
            }
        }
    }
    Ok(())
}

/// The maximum material tier among a rule's required items.
fn rule_tier(rule: &RecipeSpec) -> ToolTier {
    rule.requires
        .keys()
        .map(tier_of)
        .max()
        .unwrap_or(ToolTier::Unranked)
}

/// Build the sorted recipe-method alternatives for one produced item.
fn recipe_methods(rules: &[(&RecipeId, &RecipeSpec)], graph: &DependencyGraph) -> Vec<Method> {
    let mut methods: Vec<Method> = rules
        .iter()
        .map(|(name, rule)| {
            let requires: Vec<(ItemId, u32)> =
                rule.requires.iter().map(|(item, amount)| (item.clone(), *amount)).collect();
            let consumes: Vec<(ItemId, u32)> = graph
                .order_consumed(&rule.consumes)
                .into_iter()
                .map(|item| {
                    let amount = rule.consumes.get(&item).copied().unwrap_or(0);
                    (item, amount)
                })
                .collect();
            let priority = PriorityKey {
                tier: rule_tier(rule),
                time: rule.time,
                subtasks: requires.len().saturating_add(consumes.len()).saturating_add(1),
            };
            Method::for_recipe((*name).clone(), requires, consumes, priority)
        })
        .collect();

    // Cheaper, lower-tier, simpler recipes first; recipe name breaks ties
    // deterministically.
    methods.sort_by(|a, b| {
        (a.priority(), a.recipe()).cmp(&(b.priority(), b.recipe()))
    });
    methods
}

/// Build the deterministic gather ladder for one raw item.
fn gather_method(rules: &[(&RecipeId, &RecipeSpec)]) -> Method {
    let mut rungs: Vec<GatherRung> = rules
        .iter()
        .map(|(name, rule)| {
            let requires: Vec<(ItemId, u32)> =
                rule.requires.iter().map(|(item, amount)| (item.clone(), *amount)).collect();
            let tool = rule
                .requires
                .iter()
                .max_by_key(|(item, _)| (tier_of(item), (*item).clone()))
                .map(|(item, amount)| (item.clone(), *amount));
            GatherRung {
                recipe: (*name).clone(),
                tier: rule_tier(rule),
                time: rule.time,
                requires,
                tool,
            }
        })
        .collect();

    // Best tier first; among equal tiers the faster rung wins.
    rungs.sort_by(|a, b| {
        b.tier
            .cmp(&a.tier)
            .then_with(|| a.time.cmp(&b.time))
            .then_with(|| a.recipe.cmp(&b.recipe))
    });
    Method::for_gathering(rungs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn agent() -> AgentId {
        AgentId::new("agent")
    }

    fn item(name: &str) -> ItemId {
        ItemId::new(name)
    }

    fn mini_spec() -> DomainSpec {
        let json = r#"{
            "Items": ["wood", "plank", "stick", "bench"],
            "Tools": ["wooden_axe"],
            "Recipes": {
                "punch_for_wood": {"Produces": {"wood": 1}, "Time": 4},
                "wooden_axe_for_wood": {
                    "Produces": {"wood": 1},
                    "Requires": {"wooden_axe": 1},
                    "Time": 2
                },
                "plank": {"Produces": {"plank": 4}, "Consumes": {"wood": 1}, "Time": 1},
                "stick": {"Produces": {"stick": 4}, "Consumes": {"plank": 2}, "Time": 1},
                "bench": {"Produces": {"bench": 1}, "Consumes": {"plank": 4}, "Time": 1},
                "wooden_axe": {
                    "Produces": {"wooden_axe": 1},
                    "Requires": {"bench": 1},
                    "Consumes": {"plank": 3, "stick": 2},
                    "Time": 1
                }
            }
        }"#;
        serde_json::from_str(json).unwrap_or(DomainSpec {
            items: Vec::new(),
            tools: Vec::new(),
            recipes: std::collections::BTreeMap::new(),
        })
    }

    #[test]
    fn compiles_mini_domain() {
        let domain = compile(&mini_spec());
        assert!(domain.is_ok());
    }

    #[test]
    fn undeclared_item_is_rejected() {
        let mut spec = mini_spec();
        if let Some(rule) = spec.recipes.get_mut(&RecipeId::new("plank")) {
            rule.consumes.insert(item("mystery"), 1);
        }
        let err = compile(&spec);
        assert!(matches!(
            err,
            Err(DomainError::UndeclaredItem { recipe, item: bad })
                if recipe == RecipeId::new("plank") && bad == item("mystery")
        ));
    }

    #[test]
    fn productless_recipe_is_rejected() {
        let mut spec = mini_spec();
        if let Some(rule) = spec.recipes.get_mut(&RecipeId::new("stick")) {
            rule.produces.clear();
        }
        assert!(matches!(compile(&spec), Err(DomainError::NoProduct { .. })));
    }

    #[test]
    fn raw_items_get_a_single_gather_method() {
        let domain = compile(&mini_spec()).ok();
        let domain = match domain {
            Some(d) => d,
            None => return,
        };
        assert!(domain.is_raw(&item("wood")));
        let methods = domain.registry().methods_for(&item("wood")).unwrap_or(&[]);
        assert_eq!(methods.len(), 1);
        let gather = methods.first().and_then(Method::as_gather);
        assert!(gather.is_some());
        // Ladder runs axe first, bare hands last.
        let rungs = gather.map(crate::method::GatherMethod::rungs).unwrap_or(&[]);
        assert_eq!(
            rungs.first().map(|r| r.recipe.as_str()),
            Some("wooden_axe_for_wood")
        );
        assert_eq!(rungs.last().map(|r| r.recipe.as_str()), Some("punch_for_wood"));
    }

    #[test]
    fn crafted_items_are_not_raw() {
        let domain = compile(&mini_spec()).ok();
        let domain = match domain {
            Some(d) => d,
            None => return,
        };
        assert!(!domain.is_raw(&item("plank")));
        assert!(!domain.is_raw(&item("bench")));
    }

    #[test]
    fn durable_goods_are_tools_and_workstations() {
        let domain = compile(&mini_spec()).ok();
        let domain = match domain {
            Some(d) => d,
            None => return,
        };
        assert!(domain.is_durable(&item("wooden_axe")));
        assert!(domain.is_durable(&item("bench")));
        assert!(!domain.is_durable(&item("wood")));
        assert!(!domain.is_durable(&item("plank")));
    }

    #[test]
    fn initial_state_zeroes_declared_items() {
        let domain = compile(&mini_spec()).ok();
        let domain = match domain {
            Some(d) => d,
            None => return,
        };
        let problem = ProblemSpec {
            initial: std::collections::BTreeMap::from([(item("plank"), 3)]),
            goal: std::collections::BTreeMap::new(),
            time: 10,
        };
        let state = domain.initial_state(&agent(), &problem).unwrap_or_else(|_| State::new());
        assert_eq!(state.remaining_time(&agent()), 10);
        assert_eq!(state.get(&agent(), &item("plank")), 3);
        assert_eq!(state.get(&agent(), &item("wood")), 0);
        assert_eq!(state.get(&agent(), &item("wooden_axe")), 0);
    }

    #[test]
    fn initial_state_rejects_undeclared_names() {
        let domain = compile(&mini_spec()).ok();
        let domain = match domain {
            Some(d) => d,
            None => return,
        };
        let problem = ProblemSpec {
            initial: std::collections::BTreeMap::from([(item("mystery"), 1)]),
            goal: std::collections::BTreeMap::new(),
            time: 0,
        };
        assert!(matches!(
            domain.initial_state(&agent(), &problem),
            Err(DomainError::UndeclaredInitial { .. })
        ));
    }

    #[test]
    fn method_lists_sort_cheapest_first() {
        let domain = compile(&catalog::standard_domain()).ok();
        let domain = match domain {
            Some(d) => d,
            None => return,
        };
        // Two producers for the bench would tie on tier; here check a
        // crafted item with a single recipe and a raw ladder ordering.
        let methods = domain.registry().methods_for(&item("cobble")).unwrap_or(&[]);
        assert_eq!(methods.len(), 1, "raw items collapse to one gather method");
        let rungs = methods
            .first()
            .and_then(Method::as_gather)
            .map(crate::method::GatherMethod::rungs)
            .unwrap_or(&[]);
        let order: Vec<&str> = rungs.iter().map(|r| r.recipe.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "iron_pickaxe_for_cobble",
                "stone_pickaxe_for_cobble",
                "wooden_pickaxe_for_cobble"
            ]
        );
    }

    #[test]
    fn gather_upgrade_climbs_one_rung() {
        let domain = compile(&catalog::standard_domain()).ok();
        let domain = match domain {
            Some(d) => d,
            None => return,
        };
        let mut state = State::new();

        // No pickaxe owned: fallback is the wooden pickaxe rung, so the
        // worthwhile investment is the stone pickaxe.
        let upgrade = domain.gather_upgrade(&item("cobble"), &state, &agent());
        assert_eq!(upgrade, Some((item("stone_pickaxe"), 1)));

        // Wooden pickaxe owned: same answer, one rung up.
        state.set(&agent(), &item("wooden_pickaxe"), 1);
        let upgrade = domain.gather_upgrade(&item("cobble"), &state, &agent());
        assert_eq!(upgrade, Some((item("stone_pickaxe"), 1)));

        // Stone pickaxe owned: the iron pickaxe is next.
        state.set(&agent(), &item("stone_pickaxe"), 1);
        let upgrade = domain.gather_upgrade(&item("cobble"), &state, &agent());
        assert_eq!(upgrade, Some((item("iron_pickaxe"), 1)));

        // Top of the ladder: nothing left to invest in.
        state.set(&agent(), &item("iron_pickaxe"), 1);
        assert!(domain.gather_upgrade(&item("cobble"), &state, &agent()).is_none());
    }

    #[test]
    fn bare_handed_items_upgrade_to_the_lowest_tool() {
        let domain = compile(&catalog::standard_domain()).ok();
        let domain = match domain {
            Some(d) => d,
            None => return,
        };
        let state = State::new();
        // Wood can always be punched, so the first upgrade is the wooden axe.
        let upgrade = domain.gather_upgrade(&item("wood"), &state, &agent());
        assert_eq!(upgrade, Some((item("wooden_axe"), 1)));
    }
}
