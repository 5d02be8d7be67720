//! # Craft Planning
//!
//! Resolves one request end to end: route, calldata and base-resource cost.

use std::fmt;

use anvil_blockchain::{BridgeError, CraftInvocation};
use anvil_economy::{
    BalanceError, BalanceVector, CatalogError, CraftingRoute, DeficitPolicy, ItemId, ItemRegistry,
    MaterialProjector, MaterialRequirement, RecipeCatalog, ResolveError, RouteResolver, Shortfall,
};
use thiserror::Error;
use tracing::info;

/// Errors raised while planning a craft.
#[derive(Error, Debug)]
pub enum PlanError {
    /// The catalog could not be loaded.
    #[error("catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// Resolution failed for a reason other than a shortfall.
    #[error("resolve: {0}")]
    Resolve(#[from] ResolveError),

    /// The route could not be encoded.
    #[error("encode: {0}")]
    Bridge(#[from] BridgeError),

    /// Balances did not match the registry.
    #[error("balances: {0}")]
    Balance(#[from] BalanceError),

    /// Neither a registered key nor a numeric id.
    #[error("unknown item '{0}'")]
    UnknownItem(String),

    /// The requested quantity is not a number.
    #[error("invalid quantity '{0}'")]
    InvalidQuantity(String),

    /// A balance entry is not a number.
    #[error("invalid balance '{0}'")]
    InvalidBalance(String),
}

/// What the holder should do to obtain the target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlanOutcome {
    /// Submit this invocation.
    Ready {
        /// The resolved route.
        route: CraftingRoute,
        /// One description per step.
        steps: Vec<String>,
        /// The call that executes the route.
        invocation: CraftInvocation,
    },
    /// The target is already held in the requested quantity.
    AlreadyHeld,
    /// A base resource is short.
    Infeasible(Shortfall),
}

/// Everything known about one craft request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanReport {
    /// Requested item.
    pub target: ItemId,
    /// Display name of the requested item.
    pub target_name: String,
    /// Requested quantity.
    pub quantity: u64,
    /// Deficit policy used.
    pub policy: DeficitPolicy,
    /// The decision.
    pub outcome: PlanOutcome,
    /// Base resources drawn, joined with holdings.
    pub requirements: Vec<MaterialRequirement>,
}

/// Plans `quantity` of `target` against `balances`.
///
/// # Errors
///
/// - `Resolve` for a zero quantity or arithmetic overflow
/// - `Bridge` if the route cannot be encoded
pub fn plan(
    catalog: &RecipeCatalog,
    registry: &ItemRegistry,
    balances: &BalanceVector,
    target: ItemId,
    quantity: u64,
    policy: DeficitPolicy,
) -> Result<PlanReport, PlanError> {
    let projection = MaterialProjector::new(catalog)
        .with_policy(policy)
        .project_quantity(target, quantity, balances)?;

    let outcome = match RouteResolver::new(catalog).with_policy(policy).resolve(target, quantity, balances) {
        Ok(route) if route.is_empty() => PlanOutcome::AlreadyHeld,
        Ok(route) => PlanOutcome::Ready {
            steps: route.describe(catalog, registry),
            invocation: CraftInvocation::from_route(&route)?,
            route,
        },
        Err(ResolveError::Infeasible { shortfall, .. }) => PlanOutcome::Infeasible(shortfall),
        Err(e) => return Err(e.into()),
    };

    info!(
        target = target.get(),
        quantity,
        feasible = !matches!(outcome, PlanOutcome::Infeasible(_)),
        "craft planned"
    );

    Ok(PlanReport {
        target,
        target_name: registry.display_name(target),
        quantity,
        policy,
        outcome,
        requirements: projection.requirements(registry, balances),
    })
}

/// Looks an item up by registry key, falling back to a numeric id.
///
/// # Errors
///
/// Returns [`PlanError::UnknownItem`] if neither matches.
pub fn parse_item(registry: &ItemRegistry, text: &str) -> Result<ItemId, PlanError> {
    if let Some(id) = registry.id_of(text) {
        return Ok(id);
    }
    text.parse::<u64>()
        .map(ItemId)
        .map_err(|_| PlanError::UnknownItem(text.to_string()))
}

/// Parses comma-separated balances aligned to the registry ordering.
///
/// # Errors
///
/// - `InvalidBalance` if an entry is not a number
/// - `Balance` if the count differs from the registry size
pub fn parse_balances(registry: &ItemRegistry, text: &str) -> Result<BalanceVector, PlanError> {
    let amounts = text
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<u64>()
                .map_err(|_| PlanError::InvalidBalance(entry.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(BalanceVector::from_aligned(&registry.ordering(), &amounts)?)
}

fn write_selector(f: &mut fmt::Formatter<'_>, selector: [u8; 4]) -> fmt::Result {
    f.write_str("0x")?;
    for byte in selector {
        write!(f, "{byte:02x}")?;
    }
    Ok(())
}

impl fmt::Display for PlanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Target:    {}x {} (id {})", self.quantity, self.target_name, self.target)?;
        writeln!(f, "Policy:    {:?}", self.policy)?;

        match &self.outcome {
            PlanOutcome::Ready {
                route,
                steps,
                invocation,
            } => {
                let entry = if invocation.is_aggregated() { "aggrCraft" } else { "craft" };
                writeln!(f, "Route:     {} step(s) via {entry}", route.len())?;
                for (i, step) in steps.iter().enumerate() {
                    writeln!(f, "  {}. {step}", i + 1)?;
                }
                write!(f, "Calldata:  {} selector ", invocation.signature())?;
                write_selector(f, invocation.selector())?;
                writeln!(f, " ({} bytes)", invocation.calldata().len())?;
            }
            PlanOutcome::AlreadyHeld => writeln!(f, "Route:     nothing to craft, already held")?,
            PlanOutcome::Infeasible(shortfall) => writeln!(f, "Route:     not craftable ({shortfall})")?,
        }

        writeln!(f, "Base cost:")?;
        if self.requirements.is_empty() {
            writeln!(f, "  none")?;
        }
        for requirement in &self.requirements {
            writeln!(
                f,
                "  {}: {} (have {})",
                requirement.name, requirement.amount, requirement.available
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anvil_economy::starter_config;

    fn starter() -> (RecipeCatalog, ItemRegistry) {
        starter_config().unwrap().into_parts().unwrap()
    }

    #[test]
    fn test_plan_pickaxe_from_logs() {
        let (catalog, registry) = starter();
        let balances = parse_balances(&registry, "100,0,0,0,0,0,0").unwrap();

        let report = plan(&catalog, &registry, &balances, ItemId(4), 1, DeficitPolicy::default()).unwrap();

        match &report.outcome {
            PlanOutcome::Ready { route, invocation, .. } => {
                assert!(route.is_aggregated());
                assert!(invocation.is_aggregated());
            }
            other => panic!("expected a ready plan, got {other:?}"),
        }
        assert_eq!(report.requirements.len(), 1);
        assert_eq!(report.requirements[0].amount, 2);

        let text = report.to_string();
        assert!(text.contains("Wooden Pickaxe"));
        assert!(text.contains("aggrCraft(uint256[],uint256[])"));
        assert!(text.contains("Wooden Log: 2 (have 100)"));
    }

    #[test]
    fn test_plan_already_held() {
        let (catalog, registry) = starter();
        let balances = parse_balances(&registry, "0,0,0,2,0,0,0").unwrap();

        let report = plan(&catalog, &registry, &balances, ItemId(4), 2, DeficitPolicy::default()).unwrap();

        assert_eq!(report.outcome, PlanOutcome::AlreadyHeld);
        assert!(report.requirements.is_empty());
        assert!(report.to_string().contains("  none"));
    }

    #[test]
    fn test_plan_infeasible_reports_shortfall() {
        let (catalog, registry) = starter();
        let balances = parse_balances(&registry, "5,0,0,0,1,0,0").unwrap();

        let report = plan(&catalog, &registry, &balances, ItemId(7), 1, DeficitPolicy::default()).unwrap();

        match report.outcome {
            PlanOutcome::Infeasible(shortfall) => assert_eq!(shortfall.item, ItemId(5)),
            other => panic!("expected infeasible, got {other:?}"),
        }
    }

    #[test]
    fn test_plan_zero_quantity_is_error() {
        let (catalog, registry) = starter();
        let result = plan(&catalog, &registry, &BalanceVector::new(), ItemId(4), 0, DeficitPolicy::default());
        assert!(matches!(result, Err(PlanError::Resolve(ResolveError::InvalidQuantity(_)))));
    }

    #[test]
    fn test_parse_item() {
        let (_, registry) = starter();
        assert_eq!(parse_item(&registry, "stick").unwrap(), ItemId(3));
        assert_eq!(parse_item(&registry, "42").unwrap(), ItemId(42));
        assert!(matches!(parse_item(&registry, "sword"), Err(PlanError::UnknownItem(_))));
    }

    #[test]
    fn test_parse_balances_errors() {
        let (_, registry) = starter();
        assert!(matches!(
            parse_balances(&registry, "1,2"),
            Err(PlanError::Balance(BalanceError::LengthMismatch { expected: 7, actual: 2 }))
        ));
        assert!(matches!(
            parse_balances(&registry, "1,x,0,0,0,0,0"),
            Err(PlanError::InvalidBalance(_))
        ));
    }
}
