//! Route resolution against the starter catalog.

use anvil_economy::{
    starter_config, BalanceVector, DeficitPolicy, ItemId, ItemRegistry, MaterialProjector, RecipeCatalog,
    ResolveError, RouteResolver,
};
use proptest::prelude::*;
use std::thread;

const LOG: ItemId = ItemId(1);
const PLANK: ItemId = ItemId(2);
const STICK: ItemId = ItemId(3);
const PICKAXE: ItemId = ItemId(4);
const DIAMOND: ItemId = ItemId(5);

fn starter() -> (RecipeCatalog, ItemRegistry) {
    starter_config().unwrap().into_parts().unwrap()
}

fn balances(entries: &[(ItemId, u64)]) -> BalanceVector {
    entries.iter().copied().collect()
}

#[test]
fn test_single_plank_from_one_log() {
    let (catalog, _) = starter();
    let route = RouteResolver::new(&catalog)
        .resolve(PLANK, 1, &balances(&[(LOG, 1)]))
        .unwrap();

    assert!(route.is_direct());
    assert_eq!(route.steps()[0].item, PLANK);
    assert_eq!(route.steps()[0].multiplier, 1);
}

#[test]
fn test_stick_without_logs_is_infeasible() {
    let (catalog, _) = starter();
    let result = RouteResolver::new(&catalog).resolve(STICK, 1, &balances(&[(LOG, 0), (PLANK, 0)]));

    match result {
        Err(ResolveError::Infeasible { target, shortfall }) => {
            assert_eq!(target, STICK);
            assert_eq!(shortfall.item, LOG);
            assert_eq!(shortfall.available, 0);
        }
        other => panic!("expected infeasible, got {other:?}"),
    }
}

#[test]
fn test_pickaxe_from_logs_executes_cleanly() {
    let (catalog, _) = starter();
    let mut held = balances(&[(LOG, 100)]);
    let route = RouteResolver::new(&catalog).resolve(PICKAXE, 1, &held).unwrap();

    assert!(route.is_aggregated());
    assert_eq!(route.steps().last().map(|s| s.item), Some(PICKAXE));
    let k1 = route.total_multiplier(PLANK);
    let k2 = route.total_multiplier(STICK);

    held.apply_route(&catalog, &route).unwrap();

    assert_eq!(held.get(LOG), 100 - k1);
    assert_eq!(held.get(PLANK), 4 * k1 - 2 * k2 - 3);
    assert_eq!(held.get(STICK), 4 * k2 - 2);
    assert_eq!(held.get(PICKAXE), 1);
}

#[test]
fn test_sufficient_intermediates_skip_crafting_them() {
    let (catalog, _) = starter();
    let route = RouteResolver::new(&catalog)
        .resolve(PICKAXE, 3, &balances(&[(STICK, 6), (PLANK, 9)]))
        .unwrap();

    assert_eq!(route.total_multiplier(PLANK), 0);
    assert_eq!(route.total_multiplier(STICK), 0);
    assert_eq!(route.total_multiplier(PICKAXE), 3);
}

#[test]
fn test_projection_reports_only_logs() {
    let (catalog, _) = starter();
    let projection = MaterialProjector::new(&catalog)
        .project(PICKAXE, &balances(&[(LOG, 100)]))
        .unwrap();

    assert!(projection.is_feasible());
    assert_eq!(projection.consumed.keys().copied().collect::<Vec<_>>(), vec![LOG]);
}

#[test]
fn test_route_submission_shape() {
    let (catalog, _) = starter();
    let resolver = RouteResolver::new(&catalog);
    let held = balances(&[(LOG, 100), (PLANK, 100)]);

    assert!(resolver.resolve(PLANK, 1, &balances(&[(LOG, 1)])).unwrap().is_direct());
    assert!(resolver.resolve(STICK, 4, &held).unwrap().is_direct());
    assert!(resolver.resolve(PICKAXE, 1, &held).unwrap().is_aggregated());
}

#[test]
fn test_full_recraft_policy_keeps_partial_stock() {
    let (catalog, _) = starter();
    let held = balances(&[(LOG, 10), (PLANK, 3)]);

    let net = RouteResolver::new(&catalog).resolve(PLANK, 5, &held).unwrap();
    let full = RouteResolver::new(&catalog)
        .with_policy(DeficitPolicy::FullRecraft)
        .resolve(PLANK, 5, &held)
        .unwrap();

    assert_eq!(net.total_multiplier(PLANK), 1);
    assert_eq!(full.total_multiplier(PLANK), 2);
}

#[test]
fn test_shared_catalog_across_threads() {
    let (catalog, _) = starter();
    let expected = RouteResolver::new(&catalog)
        .resolve(PICKAXE, 2, &balances(&[(LOG, 50)]))
        .unwrap();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    RouteResolver::new(&catalog)
                        .resolve(PICKAXE, 2, &balances(&[(LOG, 50)]))
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

fn arb_balances() -> impl Strategy<Value = BalanceVector> {
    proptest::collection::vec(0u64..40, 7).prop_map(|amounts| {
        let ordering: Vec<ItemId> = (1..=7).map(ItemId).collect();
        BalanceVector::from_aligned(&ordering, &amounts).unwrap()
    })
}

fn arb_target() -> impl Strategy<Value = ItemId> {
    prop::sample::select(vec![PLANK, STICK, PICKAXE, ItemId(6), ItemId(7)])
}

fn arb_policy() -> impl Strategy<Value = DeficitPolicy> {
    prop::sample::select(vec![DeficitPolicy::NetPartialStock, DeficitPolicy::FullRecraft])
}

proptest! {
    #[test]
    fn prop_resolved_routes_execute(
        held in arb_balances(),
        target in arb_target(),
        quantity in 1u64..20,
        policy in arb_policy(),
    ) {
        let (catalog, _) = starter();
        let resolver = RouteResolver::new(&catalog).with_policy(policy);

        match resolver.resolve(target, quantity, &held) {
            Ok(route) => {
                let mut executed = held.clone();
                prop_assert!(executed.apply_route(&catalog, &route).is_ok());
                prop_assert!(executed.get(target) >= quantity);
            }
            Err(ResolveError::Infeasible { shortfall, .. }) => {
                prop_assert!(catalog.is_base_resource(shortfall.item));
                prop_assert!(shortfall.available < shortfall.required);
            }
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
        }
    }

    #[test]
    fn prop_resolution_is_deterministic(
        held in arb_balances(),
        target in arb_target(),
        quantity in 1u64..20,
    ) {
        let (catalog, _) = starter();
        let resolver = RouteResolver::new(&catalog);

        prop_assert_eq!(
            resolver.resolve(target, quantity, &held),
            resolver.resolve(target, quantity, &held)
        );
    }

    #[test]
    fn prop_projection_matches_execution(
        held in arb_balances(),
        target in arb_target(),
        quantity in 1u64..20,
        policy in arb_policy(),
    ) {
        let (catalog, _) = starter();
        let route = RouteResolver::new(&catalog).with_policy(policy).resolve(target, quantity, &held);
        let projection = MaterialProjector::new(&catalog)
            .with_policy(policy)
            .project_quantity(target, quantity, &held)
            .unwrap();

        prop_assert_eq!(route.is_ok(), projection.is_feasible());

        if let Ok(route) = route {
            let mut executed = held.clone();
            executed.apply_route(&catalog, &route).unwrap();
            for base in [LOG, DIAMOND] {
                prop_assert_eq!(held.get(base) - executed.get(base), projection.amount(base));
            }
        }
    }
}
