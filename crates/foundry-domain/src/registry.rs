//! The method/operator registry: task-name lookup for the engine.
//!
//! The registry is an explicit object built once by the compiler and
//! passed by reference into the decomposition engine -- there is no
//! process-wide mutable registration, so independent domains and
//! concurrent planning calls cannot interfere.

use std::collections::BTreeMap;

use foundry_types::{ItemId, RecipeId};

use crate::method::Method;
use crate::operator::Operator;

/// Maps produced items to their ordered method alternatives and recipes
/// to their operators.
#[derive(Debug, Clone, Default)]
pub struct MethodRegistry {
    producers: BTreeMap<ItemId, Vec<Method>>,
    operators: BTreeMap<RecipeId, Operator>,
}

impl MethodRegistry {
    /// Register the ordered method alternatives for a produced item.
    pub fn insert_methods(&mut self, item: ItemId, methods: Vec<Method>) {
        self.producers.insert(item, methods);
    }

    /// Register the operator for a recipe.
    pub fn insert_operator(&mut self, recipe: RecipeId, operator: Operator) {
        self.operators.insert(recipe, operator);
    }

    /// The ordered method alternatives for a produced item, if any
    /// recipe produces it.
    pub fn methods_for(&self, item: &ItemId) -> Option<&[Method]> {
        self.producers.get(item).map(Vec::as_slice)
    }

    /// The operator for a recipe, if registered.
    pub fn operator(&self, recipe: &RecipeId) -> Option<&Operator> {
        self.operators.get(recipe)
    }

    /// The number of registered operators.
    pub fn operator_count(&self) -> usize {
        self.operators.len()
    }

    /// The number of items with registered method lists.
    pub fn producer_count(&self) -> usize {
        self.producers.len()
    }
}
