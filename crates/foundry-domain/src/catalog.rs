//! The built-in standard crafting economy.
//!
//! A complete rule table for the classic progression: punch wood, mill
//! planks and sticks, build a bench, craft tiered axes and pickaxes,
//! mine cobble and ore, smelt ingots at a furnace, and assemble carts and
//! rails. Used by the integration tests as the canonical domain and
//! available to callers as a ready-made example.
//!
//! The table exercises every compiler feature: raw gather ladders (wood,
//! cobble, coal, ore), workstation gating (bench, furnace), tiered tools,
//! and the wood-to-axe-to-wood production cycle the heuristics exist to
//! break.

use std::collections::BTreeMap;

use foundry_types::{DomainSpec, ItemId, ProblemSpec, RecipeId, RecipeSpec};

/// Create a recipe rule with all sections specified.
fn recipe(
    requires: &[(&str, u32)],
    consumes: &[(&str, u32)],
    produces: &[(&str, u32)],
    time: u32,
) -> RecipeSpec {
    RecipeSpec {
        requires: requires.iter().map(|(n, q)| (ItemId::new(*n), *q)).collect(),
        consumes: consumes.iter().map(|(n, q)| (ItemId::new(*n), *q)).collect(),
        produces: produces.iter().map(|(n, q)| (ItemId::new(*n), *q)).collect(),
        time,
    }
}

/// Build the standard crafting domain.
pub fn standard_domain() -> DomainSpec {
    let items = ["bench", "cart", "coal", "cobble", "furnace", "ingot", "ore", "plank", "rail", "stick", "wood"];
    let tools = ["iron_axe", "iron_pickaxe", "stone_axe", "stone_pickaxe", "wooden_axe", "wooden_pickaxe"];

    let recipes: BTreeMap<RecipeId, RecipeSpec> = [
        // Wood gathering, bare hands through iron.
        ("punch_for_wood", recipe(&[], &[], &[("wood", 1)], 4)),
        ("wooden_axe_for_wood", recipe(&[("wooden_axe", 1)], &[], &[("wood", 1)], 2)),
        ("stone_axe_for_wood", recipe(&[("stone_axe", 1)], &[], &[("wood", 1)], 1)),
        ("iron_axe_for_wood", recipe(&[("iron_axe", 1)], &[], &[("wood", 1)], 1)),
        // Milling.
        ("plank", recipe(&[], &[("wood", 1)], &[("plank", 4)], 1)),
        ("stick", recipe(&[], &[("plank", 2)], &[("stick", 4)], 1)),
        // Workstations.
        ("bench", recipe(&[], &[("plank", 4)], &[("bench", 1)], 1)),
        ("furnace", recipe(&[("bench", 1)], &[("cobble", 8)], &[("furnace", 1)], 1)),
        // Axes.
        ("wooden_axe", recipe(&[("bench", 1)], &[("plank", 3), ("stick", 2)], &[("wooden_axe", 1)], 1)),
        ("stone_axe", recipe(&[("bench", 1)], &[("cobble", 3), ("stick", 2)], &[("stone_axe", 1)], 1)),
        ("iron_axe", recipe(&[("bench", 1)], &[("ingot", 3), ("stick", 2)], &[("iron_axe", 1)], 1)),
        // Pickaxes.
        ("wooden_pickaxe", recipe(&[("bench", 1)], &[("plank", 3), ("stick", 2)], &[("wooden_pickaxe", 1)], 1)),
        ("stone_pickaxe", recipe(&[("bench", 1)], &[("cobble", 3), ("stick", 2)], &[("stone_pickaxe", 1)], 1)),
        ("iron_pickaxe", recipe(&[("bench", 1)], &[("ingot", 3), ("stick", 2)], &[("iron_pickaxe", 1)], 1)),
        // Mining: cobble.
        ("wooden_pickaxe_for_cobble", recipe(&[("wooden_pickaxe", 1)], &[], &[("cobble", 1)], 4)),
        ("stone_pickaxe_for_cobble", recipe(&[("stone_pickaxe", 1)], &[], &[("cobble", 1)], 2)),
        ("iron_pickaxe_for_cobble", recipe(&[("iron_pickaxe", 1)], &[], &[("cobble", 1)], 1)),
        // Mining: coal.
        ("wooden_pickaxe_for_coal", recipe(&[("wooden_pickaxe", 1)], &[], &[("coal", 1)], 4)),
        ("stone_pickaxe_for_coal", recipe(&[("stone_pickaxe", 1)], &[], &[("coal", 1)], 2)),
        ("iron_pickaxe_for_coal", recipe(&[("iron_pickaxe", 1)], &[], &[("coal", 1)], 1)),
        // Mining: ore needs at least stone.
        ("stone_pickaxe_for_ore", recipe(&[("stone_pickaxe", 1)], &[], &[("ore", 1)], 2)),
        ("iron_pickaxe_for_ore", recipe(&[("iron_pickaxe", 1)], &[], &[("ore", 1)], 1)),
        // Smelting.
        ("smelt_ore", recipe(&[("furnace", 1)], &[("coal", 1), ("ore", 1)], &[("ingot", 1)], 5)),
        // Assembly.
        ("rail", recipe(&[("bench", 1)], &[("ingot", 6), ("stick", 1)], &[("rail", 16)], 1)),
        ("cart", recipe(&[("bench", 1)], &[("ingot", 5)], &[("cart", 1)], 1)),
    ]
    .into_iter()
    .map(|(name, rule)| (RecipeId::new(name), rule))
    .collect();

    DomainSpec {
        items: items.iter().map(|n| ItemId::new(*n)).collect(),
        tools: tools.iter().map(|n| ItemId::new(*n)).collect(),
        recipes,
    }
}

/// Build a planning instance over the standard domain.
pub fn problem(initial: &[(&str, u32)], goal: &[(&str, u32)], time: u32) -> ProblemSpec {
    ProblemSpec {
        initial: initial.iter().map(|(n, q)| (ItemId::new(*n), *q)).collect(),
        goal: goal.iter().map(|(n, q)| (ItemId::new(*n), *q)).collect(),
        time,
    }
}
