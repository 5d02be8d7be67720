//! # Crafting Route Resolver
//!
//! Turns `(target, quantity, balances)` into an ordered list of craft steps,
//! or proves that no plan exists.
//!
//! ## Algorithm
//!
//! ```text
//! demand(item, qty):
//!   no recipe      -> base resource: held >= qty ? deduct : FAIL
//!   held >= qty    -> deduct, no step (stock beats recrafting)
//!   otherwise      -> k = ceil(deficit / output_qty)
//!                     demand(input, input_qty * k) for each input, in order
//!                     emit (item, k)
//!                     held += k * output_qty - qty
//! ```
//!
//! Steps are emitted post-order, so every step's inputs are produced by an
//! earlier step or already held. All branches share one working balance:
//! surplus left by one branch is visible to the next.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::balance::BalanceVector;
use crate::catalog::RecipeCatalog;
use crate::error::{ResolveError, ResolveResult, Shortfall};
use crate::item::{ItemId, ItemRegistry};

/// How existing partial stock of a craftable item counts toward a shortfall.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeficitPolicy {
    /// Craft only `requested - held`; partial stock is consumed first.
    #[default]
    NetPartialStock,
    /// Once stock is short, craft the full requested amount; partial stock
    /// stays in the balance as leftover.
    FullRecraft,
}

/// One craft operation: invoke `item`'s recipe `multiplier` times.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CraftingStep {
    /// The item whose recipe is invoked.
    pub item: ItemId,
    /// Number of recipe invocations.
    pub multiplier: u64,
}

impl CraftingStep {
    /// Creates a new step.
    #[inline]
    #[must_use]
    pub const fn new(item: ItemId, multiplier: u64) -> Self {
        Self { item, multiplier }
    }

    /// Human-readable description, e.g. `Craft 8 Oak Planks (2x)`.
    ///
    /// For display only; not part of the execution contract.
    #[must_use]
    pub fn describe(&self, catalog: &RecipeCatalog, registry: &ItemRegistry) -> String {
        let produced = catalog
            .output_quantity(self.item)
            .saturating_mul(self.multiplier);
        format!(
            "Craft {} {} ({}x)",
            produced,
            registry.display_name(self.item),
            self.multiplier
        )
    }
}

/// Ordered craft plan. Inputs are always produced before they are consumed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CraftingRoute {
    steps: Vec<CraftingStep>,
}

impl CraftingRoute {
    /// Wraps pre-built steps without validation.
    #[must_use]
    pub fn from_steps(steps: Vec<CraftingStep>) -> Self {
        Self { steps }
    }

    /// Steps in execution order.
    #[inline]
    #[must_use]
    pub fn steps(&self) -> &[CraftingStep] {
        &self.steps
    }

    /// Number of steps.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if no crafting is needed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// A single-step route.
    #[inline]
    #[must_use]
    pub fn is_direct(&self) -> bool {
        self.steps.len() == 1
    }

    /// A route spanning more than one step, executed as one batch.
    #[inline]
    #[must_use]
    pub fn is_aggregated(&self) -> bool {
        self.steps.len() > 1
    }

    /// Sum of multipliers over every step crafting `item`.
    #[must_use]
    pub fn total_multiplier(&self, item: ItemId) -> u64 {
        self.steps
            .iter()
            .filter(|step| step.item == item)
            .map(|step| step.multiplier)
            .sum()
    }

    /// Descriptions of every step, in order.
    #[must_use]
    pub fn describe(&self, catalog: &RecipeCatalog, registry: &ItemRegistry) -> Vec<String> {
        self.steps
            .iter()
            .map(|step| step.describe(catalog, registry))
            .collect()
    }

    /// Consumes the route, returning its steps.
    #[must_use]
    pub fn into_steps(self) -> Vec<CraftingStep> {
        self.steps
    }
}

/// Why a traversal stopped early.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Blocked {
    Short(Shortfall),
    Overflow(ItemId),
}

/// One depth-first walk over the catalog.
///
/// Owns the working balance for the lifetime of one top-level request; the
/// caller's vector is cloned in and never written back.
pub(crate) struct Walk<'a> {
    catalog: &'a RecipeCatalog,
    policy: DeficitPolicy,
    working: BalanceVector,
    steps: Vec<CraftingStep>,
    base_drawn: BTreeMap<ItemId, u64>,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(catalog: &'a RecipeCatalog, policy: DeficitPolicy, balances: &BalanceVector) -> Self {
        Self {
            catalog,
            policy,
            working: balances.clone(),
            steps: Vec::new(),
            base_drawn: BTreeMap::new(),
        }
    }

    /// Makes `quantity` of `item` available and consumes it.
    pub(crate) fn demand(&mut self, item: ItemId, quantity: u64) -> Result<(), Blocked> {
        let catalog = self.catalog;
        let held = self.working.get(item);

        let Some(recipe) = catalog.recipe(item) else {
            if held < quantity {
                return Err(Blocked::Short(Shortfall {
                    item,
                    required: quantity,
                    available: held,
                }));
            }
            self.working.set(item, held - quantity);
            let drawn = self.base_drawn.entry(item).or_insert(0);
            *drawn = drawn.saturating_add(quantity);
            return Ok(());
        };

        if held >= quantity {
            self.working.set(item, held - quantity);
            return Ok(());
        }

        let needed = match self.policy {
            DeficitPolicy::NetPartialStock => quantity - held,
            DeficitPolicy::FullRecraft => quantity,
        };
        let multiplier = needed.div_ceil(recipe.output_quantity());

        for input in recipe.inputs() {
            let required = input
                .quantity
                .checked_mul(multiplier)
                .ok_or(Blocked::Overflow(input.item))?;
            self.demand(input.item, required)?;
        }

        trace!(item = item.get(), multiplier, "emit craft step");
        self.steps.push(CraftingStep::new(item, multiplier));

        let produced = multiplier
            .checked_mul(recipe.output_quantity())
            .ok_or(Blocked::Overflow(item))?;
        let remaining = self
            .working
            .get(item)
            .checked_add(produced)
            .and_then(|total| total.checked_sub(quantity))
            .ok_or(Blocked::Overflow(item))?;
        self.working.set(item, remaining);

        Ok(())
    }

    pub(crate) fn into_steps(self) -> Vec<CraftingStep> {
        self.steps
    }

    pub(crate) fn into_base_drawn(self) -> BTreeMap<ItemId, u64> {
        self.base_drawn
    }
}

/// Resolves crafting routes against one catalog.
///
/// Cheap to construct; holds only a borrow of the catalog and a policy.
#[derive(Clone, Copy, Debug)]
pub struct RouteResolver<'a> {
    catalog: &'a RecipeCatalog,
    policy: DeficitPolicy,
}

impl<'a> RouteResolver<'a> {
    /// Creates a resolver with the default [`DeficitPolicy`].
    #[must_use]
    pub fn new(catalog: &'a RecipeCatalog) -> Self {
        Self {
            catalog,
            policy: DeficitPolicy::default(),
        }
    }

    /// Sets the deficit policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: DeficitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The catalog this resolver walks.
    #[must_use]
    pub const fn catalog(&self) -> &'a RecipeCatalog {
        self.catalog
    }

    /// The active deficit policy.
    #[must_use]
    pub const fn policy(&self) -> DeficitPolicy {
        self.policy
    }

    /// Resolves a plan that leaves `quantity` of `target` available.
    ///
    /// `balances` is read, never modified. A base-resource target succeeds
    /// with an empty route iff enough is already held.
    ///
    /// # Errors
    ///
    /// - `InvalidQuantity` if `quantity` is zero
    /// - `Infeasible` if any base resource in the tree is short
    /// - `Overflow` if propagated demand does not fit in a `u64`
    pub fn resolve(
        &self,
        target: ItemId,
        quantity: u64,
        balances: &BalanceVector,
    ) -> ResolveResult<CraftingRoute> {
        if quantity == 0 {
            return Err(ResolveError::InvalidQuantity(target));
        }

        let mut walk = Walk::new(self.catalog, self.policy, balances);
        match walk.demand(target, quantity) {
            Ok(()) => {
                let route = CraftingRoute::from_steps(walk.into_steps());
                debug!(
                    target = target.get(),
                    quantity,
                    steps = route.len(),
                    "route resolved"
                );
                Ok(route)
            }
            Err(Blocked::Short(shortfall)) => {
                debug!(
                    target = target.get(),
                    quantity,
                    short_item = shortfall.item.get(),
                    required = shortfall.required,
                    available = shortfall.available,
                    "route infeasible"
                );
                Err(ResolveError::Infeasible { target, shortfall })
            }
            Err(Blocked::Overflow(item)) => Err(ResolveError::Overflow(item)),
        }
    }
}
