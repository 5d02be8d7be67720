//! Lists every recipe output the holder can craft right now, with the route
//! and base-resource cost of one fresh unit.

use tracing::debug;

use crate::balance::BalanceVector;
use crate::catalog::RecipeCatalog;
use crate::error::{ResolveError, ResolveResult};
use crate::item::{ItemId, ItemRegistry};
use crate::projector::{MaterialProjector, MaterialRequirement};
use crate::resolver::{CraftingRoute, DeficitPolicy, RouteResolver};

/// A craftable recipe output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CraftableItem {
    /// Output item.
    pub item: ItemId,
    /// Display name.
    pub name: String,
    /// Route producing one unit.
    pub route: CraftingRoute,
    /// One description per route step.
    pub steps: Vec<String>,
    /// Base resources the route draws.
    pub requirements: Vec<MaterialRequirement>,
}

impl CraftableItem {
    /// Returns true if crafting needs the batch entry point.
    #[inline]
    #[must_use]
    pub fn is_aggregated(&self) -> bool {
        self.route.is_aggregated()
    }
}

/// Every recipe output craftable from `balances`, sorted by item id.
///
/// Stock of the output itself is ignored, so the route always crafts at
/// least one new unit. Infeasible recipes are left out.
///
/// # Errors
///
/// Returns `Overflow` if a recipe's demand does not fit in a `u64`.
pub fn craftable_items(
    catalog: &RecipeCatalog,
    registry: &ItemRegistry,
    balances: &BalanceVector,
    policy: DeficitPolicy,
) -> ResolveResult<Vec<CraftableItem>> {
    let resolver = RouteResolver::new(catalog).with_policy(policy);
    let projector = MaterialProjector::new(catalog).with_policy(policy);

    let mut items = Vec::new();
    for recipe in catalog.recipes() {
        let item = recipe.output();
        let mut working = balances.clone();
        working.set(item, 0);

        let route = match resolver.resolve(item, 1, &working) {
            Ok(route) => route,
            Err(ResolveError::Infeasible { .. }) => continue,
            Err(e) => return Err(e),
        };
        let requirements = projector.project(item, &working)?.requirements(registry, balances);

        items.push(CraftableItem {
            item,
            name: registry.display_name(item),
            steps: route.describe(catalog, registry),
            route,
            requirements,
        });
    }

    items.sort_by_key(|craftable| craftable.item);
    debug!(craftable = items.len(), "listed craftable items");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::starter_config;

    fn starter() -> (RecipeCatalog, ItemRegistry) {
        starter_config().unwrap().into_parts().unwrap()
    }

    #[test]
    fn test_nothing_craftable_without_resources() {
        let (catalog, registry) = starter();
        let items = craftable_items(&catalog, &registry, &BalanceVector::new(), DeficitPolicy::default()).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_logs_unlock_wooden_tree() {
        let (catalog, registry) = starter();
        let balances: BalanceVector = [(ItemId(1), 100)].into_iter().collect();

        let items = craftable_items(&catalog, &registry, &balances, DeficitPolicy::default()).unwrap();
        let ids: Vec<_> = items.iter().map(|c| c.item).collect();

        // Diamond tools need diamonds.
        assert_eq!(ids, vec![ItemId(2), ItemId(3), ItemId(4)]);

        let planks = &items[0];
        assert_eq!(planks.name, "Wooden Plank");
        assert!(!planks.is_aggregated());
        assert_eq!(planks.steps, vec!["Craft 4 Wooden Plank (1x)".to_string()]);

        let pickaxe = &items[2];
        assert!(pickaxe.is_aggregated());
        assert_eq!(pickaxe.requirements.len(), 1);
        assert_eq!(pickaxe.requirements[0].item, ItemId(1));
        assert_eq!(pickaxe.requirements[0].amount, 2);
        assert_eq!(pickaxe.requirements[0].available, 100);
    }

    #[test]
    fn test_held_output_still_listed() {
        let (catalog, registry) = starter();
        let balances: BalanceVector = [(ItemId(1), 1), (ItemId(2), 8)].into_iter().collect();

        let items = craftable_items(&catalog, &registry, &balances, DeficitPolicy::default()).unwrap();
        let planks = items.iter().find(|c| c.item == ItemId(2)).unwrap();

        assert_eq!(planks.route.steps().len(), 1);
        assert_eq!(planks.route.steps()[0].multiplier, 1);
    }

    #[test]
    fn test_diamond_tools_with_diamonds() {
        let (catalog, registry) = starter();
        let balances: BalanceVector = [(ItemId(1), 10), (ItemId(5), 3)].into_iter().collect();

        let items = craftable_items(&catalog, &registry, &balances, DeficitPolicy::default()).unwrap();
        let ids: Vec<_> = items.iter().map(|c| c.item).collect();

        assert_eq!(ids, vec![ItemId(2), ItemId(3), ItemId(4), ItemId(6), ItemId(7)]);
    }
}
