//! # Recipe Catalog - Directed Acyclic Graph (DAG)
//!
//! **Validated, read-only index from output item to recipe**
//!
//! The catalog guarantees:
//!
//! 1. **One recipe per output**: lookups by output item are unambiguous
//! 2. **Positive quantities**: every recipe produces and consumes something
//! 3. **No cycles**: the item graph is validated to be acyclic at construction
//!
//! An item with no recipe is a *base resource*. It can be held or consumed,
//! never crafted.
//!
//! ## Example
//!
//! ```rust
//! use anvil_economy::{ItemId, Recipe, RecipeCatalog, RecipeInput};
//!
//! const LOG: ItemId = ItemId(1);
//! const PLANK: ItemId = ItemId(2);
//!
//! let catalog = RecipeCatalog::new(vec![
//!     Recipe::new(PLANK, 4, vec![RecipeInput::new(LOG, 1)]).unwrap(),
//! ])
//! .unwrap();
//!
//! assert!(catalog.is_base_resource(LOG));
//! assert_eq!(catalog.output_quantity(PLANK), 4);
//! ```

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CatalogError, CatalogResult};
use crate::item::ItemId;

/// Input item in a recipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeInput {
    /// The item consumed.
    pub item: ItemId,
    /// Quantity consumed per invocation.
    pub quantity: u64,
}

impl RecipeInput {
    /// Creates a new recipe input.
    #[inline]
    #[must_use]
    pub const fn new(item: ItemId, quantity: u64) -> Self {
        Self { item, quantity }
    }
}

/// A crafting recipe: `inputs -> output_quantity × output`.
///
/// Fields are private so a constructed recipe always satisfies its invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recipe {
    output: ItemId,
    output_quantity: u64,
    inputs: Vec<RecipeInput>,
}

impl Recipe {
    /// Creates a new recipe with validation.
    ///
    /// # Errors
    ///
    /// Returns error if the recipe has no inputs, produces nothing, or
    /// consumes zero of some input.
    pub fn new(output: ItemId, output_quantity: u64, inputs: Vec<RecipeInput>) -> CatalogResult<Self> {
        if inputs.is_empty() {
            return Err(CatalogError::EmptyInputs(output));
        }
        if output_quantity == 0 {
            return Err(CatalogError::ZeroOutputQuantity(output));
        }
        if let Some(input) = inputs.iter().find(|input| input.quantity == 0) {
            return Err(CatalogError::ZeroInputQuantity {
                output,
                input: input.item,
            });
        }

        Ok(Self {
            output,
            output_quantity,
            inputs,
        })
    }

    /// The item this recipe produces.
    #[inline]
    #[must_use]
    pub const fn output(&self) -> ItemId {
        self.output
    }

    /// Units produced per invocation.
    #[inline]
    #[must_use]
    pub const fn output_quantity(&self) -> u64 {
        self.output_quantity
    }

    /// Inputs consumed per invocation, in declared order.
    #[inline]
    #[must_use]
    pub fn inputs(&self) -> &[RecipeInput] {
        &self.inputs
    }
}

/// The recipe catalog.
///
/// Built once from an ordered recipe list and never mutated afterwards, so a
/// single instance can be shared by reference across threads.
#[derive(Clone, Debug, Default)]
pub struct RecipeCatalog {
    /// Recipes in declared order.
    recipes: Vec<Recipe>,
    /// Output item -> position in `recipes`.
    index: HashMap<ItemId, usize>,
    /// Craftable items ordered so every item follows the craftable items it consumes.
    order: Vec<ItemId>,
}

impl RecipeCatalog {
    /// Builds a catalog from recipes in declared order.
    ///
    /// # Errors
    ///
    /// - `DuplicateOutput` if two recipes produce the same item
    /// - `CycleDetected` if the item graph is not a DAG
    pub fn new(recipes: impl IntoIterator<Item = Recipe>) -> CatalogResult<Self> {
        let recipes: Vec<Recipe> = recipes.into_iter().collect();
        let mut index = HashMap::with_capacity(recipes.len());

        for (position, recipe) in recipes.iter().enumerate() {
            if index.insert(recipe.output, position).is_some() {
                return Err(CatalogError::DuplicateOutput(recipe.output));
            }
        }

        let mut catalog = Self {
            recipes,
            index,
            order: Vec::new(),
        };

        match catalog.sort_topologically() {
            Some(order) => catalog.order = order,
            None => {
                let cycle = catalog.find_cycle().unwrap_or_default();
                return Err(CatalogError::CycleDetected(cycle));
            }
        }

        info!(
            recipes = catalog.recipes.len(),
            "recipe catalog built"
        );
        Ok(catalog)
    }

    /// Gets the recipe producing `item`.
    #[inline]
    #[must_use]
    pub fn recipe(&self, item: ItemId) -> Option<&Recipe> {
        self.index.get(&item).map(|&position| &self.recipes[position])
    }

    /// Returns true if a recipe produces `item`.
    #[inline]
    #[must_use]
    pub fn contains(&self, item: ItemId) -> bool {
        self.index.contains_key(&item)
    }

    /// Returns true if `item` has no recipe.
    #[inline]
    #[must_use]
    pub fn is_base_resource(&self, item: ItemId) -> bool {
        !self.contains(item)
    }

    /// Units produced per invocation of the recipe for `item`, or 1 if none.
    #[must_use]
    pub fn output_quantity(&self, item: ItemId) -> u64 {
        self.recipe(item).map_or(1, Recipe::output_quantity)
    }

    /// Inputs of the recipe for `item`, if any.
    #[must_use]
    pub fn inputs(&self, item: ItemId) -> Option<&[RecipeInput]> {
        self.recipe(item).map(Recipe::inputs)
    }

    /// All recipes in declared order.
    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    /// Craftable items in dependency order.
    #[must_use]
    pub fn topological_order(&self) -> &[ItemId] {
        &self.order
    }

    /// Number of recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Returns true if the catalog has no recipes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Orders craftable items with Kahn's algorithm.
    ///
    /// Edge `a -> b` when the recipe for `b` consumes craftable item `a`.
    /// Returns `None` if some item can never reach in-degree zero (a cycle).
    fn sort_topologically(&self) -> Option<Vec<ItemId>> {
        let mut in_degree: HashMap<ItemId, usize> = HashMap::with_capacity(self.recipes.len());
        let mut consumers: HashMap<ItemId, Vec<ItemId>> = HashMap::new();

        for recipe in &self.recipes {
            in_degree.entry(recipe.output).or_insert(0);
            for input in &recipe.inputs {
                if self.contains(input.item) {
                    consumers.entry(input.item).or_default().push(recipe.output);
                    *in_degree.entry(recipe.output).or_insert(0) += 1;
                }
            }
        }

        // Seed in declared order so the result is deterministic
        let mut queue: VecDeque<ItemId> = self
            .recipes
            .iter()
            .map(|recipe| recipe.output)
            .filter(|item| in_degree.get(item) == Some(&0))
            .collect();

        let mut sorted = Vec::with_capacity(self.recipes.len());

        while let Some(item) = queue.pop_front() {
            sorted.push(item);

            if let Some(next) = consumers.get(&item) {
                for &consumer in next {
                    if let Some(deg) = in_degree.get_mut(&consumer) {
                        *deg -= 1;
                        if *deg == 0 {
                            queue.push_back(consumer);
                        }
                    }
                }
            }
        }

        if sorted.len() == self.recipes.len() {
            Some(sorted)
        } else {
            debug!(
                sorted = sorted.len(),
                total = self.recipes.len(),
                "topological sort stalled"
            );
            None
        }
    }

    /// Finds one cycle in the item graph, for diagnostics.
    ///
    /// The returned path starts and ends at the same item.
    fn find_cycle(&self) -> Option<Vec<ItemId>> {
        let mut visited = HashSet::new();
        let mut on_stack = HashSet::new();
        let mut path = Vec::new();

        for recipe in &self.recipes {
            if !visited.contains(&recipe.output) {
                if let Some(cycle) =
                    self.dfs_find_cycle(recipe.output, &mut visited, &mut on_stack, &mut path)
                {
                    return Some(cycle);
                }
            }
        }

        None
    }

    /// DFS helper for cycle detection, walking from an item to its craftable inputs.
    fn dfs_find_cycle(
        &self,
        item: ItemId,
        visited: &mut HashSet<ItemId>,
        on_stack: &mut HashSet<ItemId>,
        path: &mut Vec<ItemId>,
    ) -> Option<Vec<ItemId>> {
        visited.insert(item);
        on_stack.insert(item);
        path.push(item);

        if let Some(recipe) = self.recipe(item) {
            for input in &recipe.inputs {
                if !self.contains(input.item) {
                    continue;
                }

                if !visited.contains(&input.item) {
                    if let Some(cycle) = self.dfs_find_cycle(input.item, visited, on_stack, path) {
                        return Some(cycle);
                    }
                } else if on_stack.contains(&input.item) {
                    let start = path.iter().position(|&id| id == input.item).unwrap_or(0);
                    let mut cycle: Vec<ItemId> = path[start..].to_vec();
                    cycle.push(input.item);
                    return Some(cycle);
                }
            }
        }

        path.pop();
        on_stack.remove(&item);
        None
    }
}
