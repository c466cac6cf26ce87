//! Tool tiers: the material ranking used to prioritize recipes and prune
//! redundant tool production.
//!
//! Tools are organized into tiers reflecting material progression:
//! `wooden_` names are basic, `stone_` intermediate, `iron_` advanced.
//! Everything else -- bare-handed actions, workstations such as the bench
//! and furnace, plain materials -- sits below the ranked tiers.
//!
//! The tier of a recipe is the maximum tier among its required items;
//! cheaper, lower-tier recipes are tried first by the compiled method
//! ordering. The *kind* of a tool (the name with its tier prefix stripped,
//! e.g. `pickaxe` for `stone_pickaxe`) lets the pruning heuristic refuse
//! to build a lower tier of a kind the agent already owns in a higher one.

use foundry_types::ItemId;

/// The material tier of a tool name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ToolTier {
    /// No ranked material: bare hands, workstations, plain items.
    Unranked,
    /// Basic tier (`wooden_` tools).
    Basic,
    /// Intermediate tier (`stone_` tools).
    Intermediate,
    /// Advanced tier (`iron_` tools).
    Advanced,
}

impl ToolTier {
    /// The ordinal rank of this tier (0 for unranked, 3 for advanced).
    pub const fn rank(self) -> u8 {
        match self {
            Self::Unranked => 0,
            Self::Basic => 1,
            Self::Intermediate => 2,
            Self::Advanced => 3,
        }
    }
}

/// Classify an item name into its material tier.
pub fn tier_of(item: &ItemId) -> ToolTier {
    let name = item.as_str();
    if name.starts_with("wooden_") {
        ToolTier::Basic
    } else if name.starts_with("stone_") {
        ToolTier::Intermediate
    } else if name.starts_with("iron_") {
        ToolTier::Advanced
    } else {
        ToolTier::Unranked
    }
}

/// The kind of a tool: its name with the tier prefix stripped.
///
/// Unranked names are their own kind (`bench` -> `bench`), so comparing
/// kinds never conflates a workstation with a tool family.
pub fn kind_of(item: &ItemId) -> &str {
    let name = item.as_str();
    name.strip_prefix("wooden_")
        .or_else(|| name.strip_prefix("stone_"))
        .or_else(|| name.strip_prefix("iron_"))
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_order_from_unranked_to_advanced() {
        assert!(ToolTier::Unranked < ToolTier::Basic);
        assert!(ToolTier::Basic < ToolTier::Intermediate);
        assert!(ToolTier::Intermediate < ToolTier::Advanced);
    }

    #[test]
    fn prefix_classification() {
        assert_eq!(tier_of(&ItemId::new("wooden_pickaxe")), ToolTier::Basic);
        assert_eq!(tier_of(&ItemId::new("stone_axe")), ToolTier::Intermediate);
        assert_eq!(tier_of(&ItemId::new("iron_pickaxe")), ToolTier::Advanced);
    }

    #[test]
    fn workstations_and_materials_are_unranked() {
        assert_eq!(tier_of(&ItemId::new("bench")), ToolTier::Unranked);
        assert_eq!(tier_of(&ItemId::new("furnace")), ToolTier::Unranked);
        assert_eq!(tier_of(&ItemId::new("wood")), ToolTier::Unranked);
    }

    #[test]
    fn kinds_strip_tier_prefixes() {
        assert_eq!(kind_of(&ItemId::new("wooden_pickaxe")), "pickaxe");
        assert_eq!(kind_of(&ItemId::new("stone_pickaxe")), "pickaxe");
        assert_eq!(kind_of(&ItemId::new("iron_axe")), "axe");
        assert_eq!(kind_of(&ItemId::new("bench")), "bench");
    }

    #[test]
    fn ranks_are_ordinal() {
        assert_eq!(ToolTier::Unranked.rank(), 0);
        assert_eq!(ToolTier::Advanced.rank(), 3);
    }
}
