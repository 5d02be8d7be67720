//! # Material Requirement Projector
//!
//! Reports what a craft would cost in true base resources, without producing
//! an executable plan. Runs the resolver's traversal on a disposable copy of
//! the balances and records every draw on a base resource.
//!
//! Intermediates never appear in a projection: held planks reduce the log
//! cost, they are not reported as a cost themselves.

use std::collections::BTreeMap;

use crate::balance::BalanceVector;
use crate::catalog::RecipeCatalog;
use crate::error::{ResolveError, ResolveResult, Shortfall};
use crate::item::{ItemId, ItemRegistry};
use crate::resolver::{Blocked, DeficitPolicy, Walk};

/// One line of a projection, ready for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialRequirement {
    /// Base resource consumed.
    pub item: ItemId,
    /// Display name of the resource.
    pub name: String,
    /// Amount the craft draws.
    pub amount: u64,
    /// Amount currently held.
    pub available: u64,
}

/// Base-resource cost of crafting a target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialProjection {
    /// The projected target.
    pub target: ItemId,
    /// Quantity of the target projected.
    pub quantity: u64,
    /// Base resource -> amount drawn, in item order.
    pub consumed: BTreeMap<ItemId, u64>,
    /// First base resource found short, if the craft is not possible.
    ///
    /// When set, `consumed` covers only the part of the tree walked before
    /// the shortfall.
    pub shortfall: Option<Shortfall>,
}

impl MaterialProjection {
    /// Returns true if the whole tree could be satisfied.
    #[inline]
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.shortfall.is_none()
    }

    /// Amount of `item` drawn by the craft.
    #[must_use]
    pub fn amount(&self, item: ItemId) -> u64 {
        self.consumed.get(&item).copied().unwrap_or(0)
    }

    /// Display rows joined with current holdings.
    #[must_use]
    pub fn requirements(&self, registry: &ItemRegistry, balances: &BalanceVector) -> Vec<MaterialRequirement> {
        self.consumed
            .iter()
            .map(|(&item, &amount)| MaterialRequirement {
                item,
                name: registry.display_name(item),
                amount,
                available: balances.get(item),
            })
            .collect()
    }
}

/// Projects base-resource costs against one catalog.
#[derive(Clone, Copy, Debug)]
pub struct MaterialProjector<'a> {
    catalog: &'a RecipeCatalog,
    policy: DeficitPolicy,
}

impl<'a> MaterialProjector<'a> {
    /// Creates a projector with the default [`DeficitPolicy`].
    #[must_use]
    pub fn new(catalog: &'a RecipeCatalog) -> Self {
        Self {
            catalog,
            policy: DeficitPolicy::default(),
        }
    }

    /// Sets the deficit policy; use the same one as the resolver.
    #[must_use]
    pub const fn with_policy(mut self, policy: DeficitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Base-resource cost of crafting one unit of `target`.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if propagated demand does not fit in a `u64`.
    pub fn project(&self, target: ItemId, balances: &BalanceVector) -> ResolveResult<MaterialProjection> {
        self.project_quantity(target, 1, balances)
    }

    /// Base-resource cost of crafting `quantity` of `target`.
    ///
    /// # Errors
    ///
    /// - `InvalidQuantity` if `quantity` is zero
    /// - `Overflow` if propagated demand does not fit in a `u64`
    pub fn project_quantity(
        &self,
        target: ItemId,
        quantity: u64,
        balances: &BalanceVector,
    ) -> ResolveResult<MaterialProjection> {
        if quantity == 0 {
            return Err(ResolveError::InvalidQuantity(target));
        }

        let mut walk = Walk::new(self.catalog, self.policy, balances);
        let shortfall = match walk.demand(target, quantity) {
            Ok(()) => None,
            Err(Blocked::Short(shortfall)) => Some(shortfall),
            Err(Blocked::Overflow(item)) => return Err(ResolveError::Overflow(item)),
        };

        Ok(MaterialProjection {
            target,
            quantity,
            consumed: walk.into_base_drawn(),
            shortfall,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Recipe, RecipeInput};
    use crate::item::ItemInfo;

    const LOG: ItemId = ItemId(1);
    const PLANK: ItemId = ItemId(2);
    const STICK: ItemId = ItemId(3);
    const PICKAXE: ItemId = ItemId(4);
    const DIAMOND: ItemId = ItemId(5);
    const DIAMOND_SWORD: ItemId = ItemId(7);

    fn create_test_catalog() -> RecipeCatalog {
        RecipeCatalog::new(vec![
            Recipe::new(PLANK, 4, vec![RecipeInput::new(LOG, 1)]).unwrap(),
            Recipe::new(STICK, 4, vec![RecipeInput::new(PLANK, 2)]).unwrap(),
            Recipe::new(
                PICKAXE,
                1,
                vec![RecipeInput::new(STICK, 2), RecipeInput::new(PLANK, 3)],
            )
            .unwrap(),
            Recipe::new(
                DIAMOND_SWORD,
                1,
                vec![RecipeInput::new(STICK, 1), RecipeInput::new(DIAMOND, 2)],
            )
            .unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_pickaxe_costs_only_logs() {
        let catalog = create_test_catalog();
        let balances: BalanceVector = [(LOG, 100)].into_iter().collect();

        let projection = MaterialProjector::new(&catalog).project(PICKAXE, &balances).unwrap();

        assert!(projection.is_feasible());
        assert_eq!(projection.consumed.len(), 1);
        assert_eq!(projection.amount(LOG), 2);
        assert_eq!(projection.amount(PLANK), 0);
        assert_eq!(projection.amount(STICK), 0);
    }

    #[test]
    fn test_held_intermediates_reduce_cost() {
        let catalog = create_test_catalog();
        let balances: BalanceVector = [(LOG, 100), (STICK, 2)].into_iter().collect();

        let projection = MaterialProjector::new(&catalog).project(PICKAXE, &balances).unwrap();

        // Sticks are held; only the 3 planks need one log.
        assert_eq!(projection.amount(LOG), 1);
    }

    #[test]
    fn test_multiple_base_resources() {
        let catalog = create_test_catalog();
        let balances: BalanceVector = [(LOG, 5), (DIAMOND, 5)].into_iter().collect();

        let projection = MaterialProjector::new(&catalog).project(DIAMOND_SWORD, &balances).unwrap();

        assert_eq!(projection.amount(LOG), 1);
        assert_eq!(projection.amount(DIAMOND), 2);
    }

    #[test]
    fn test_infeasible_projection_reports_shortfall() {
        let catalog = create_test_catalog();
        let balances: BalanceVector = [(LOG, 5), (DIAMOND, 1)].into_iter().collect();

        let projection = MaterialProjector::new(&catalog).project(DIAMOND_SWORD, &balances).unwrap();

        assert!(!projection.is_feasible());
        assert_eq!(projection.shortfall.map(|s| s.item), Some(DIAMOND));
        // The stick branch was walked before the diamonds ran out.
        assert_eq!(projection.amount(LOG), 1);
    }

    #[test]
    fn test_requirements_join_holdings() {
        let catalog = create_test_catalog();
        let registry = ItemRegistry::from_items([ItemInfo {
            id: LOG,
            key: "oak_log".to_string(),
            name: "Wooden Log".to_string(),
        }])
        .unwrap();
        let balances: BalanceVector = [(LOG, 100)].into_iter().collect();

        let rows = MaterialProjector::new(&catalog)
            .project(PICKAXE, &balances)
            .unwrap()
            .requirements(&registry, &balances);

        assert_eq!(
            rows,
            vec![MaterialRequirement {
                item: LOG,
                name: "Wooden Log".to_string(),
                amount: 2,
                available: 100,
            }]
        );
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let catalog = create_test_catalog();
        let result = MaterialProjector::new(&catalog).project_quantity(PICKAXE, 0, &BalanceVector::new());
        assert_eq!(result, Err(ResolveError::InvalidQuantity(PICKAXE)));
    }
}
