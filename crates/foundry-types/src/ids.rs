//! Type-safe name wrappers for planner entities.
//!
//! Agents, items, and recipes are all identified by `snake_case` names
//! taken from the domain rule table. Each gets a strongly-typed wrapper to
//! prevent accidental mixing of identifiers at compile time: an [`ItemId`]
//! can never be passed where a [`RecipeId`] is expected.
//!
//! The wrappers serialize transparently as plain strings, so the external
//! rule-table format stays a flat name -> quantity mapping.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around an owned name with standard derives.
macro_rules! define_name_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            /// View the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self(String::from(name))
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self(name)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_name_id! {
    /// Name of an agent owning resources and a time budget.
    AgentId
}

define_name_id! {
    /// Name of a resource (material, tool, or workstation).
    ItemId
}

define_name_id! {
    /// Name of a recipe in the domain rule table.
    RecipeId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_inner_name() {
        let item = ItemId::new("wooden_pickaxe");
        assert_eq!(item.to_string(), "wooden_pickaxe");
        assert_eq!(item.as_str(), "wooden_pickaxe");
    }

    #[test]
    fn ids_order_by_name() {
        let a = ItemId::new("cobble");
        let b = ItemId::new("wood");
        assert!(a < b);
    }

    #[test]
    fn serializes_as_plain_string() {
        let recipe = RecipeId::new("smelt_ore");
        let json = serde_json::to_string(&recipe).unwrap_or_default();
        assert_eq!(json, "\"smelt_ore\"");
    }

    #[test]
    fn deserializes_from_plain_string() {
        let agent: AgentId = serde_json::from_str("\"agent\"").unwrap_or_else(|_| AgentId::new(""));
        assert_eq!(agent.as_str(), "agent");
    }
}
