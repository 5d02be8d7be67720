//! # Balance Vectors
//!
//! A holder's stock: item -> non-negative quantity.
//!
//! Resolution never touches a caller's vector; it clones one into a working
//! copy. Applying a route locally follows the batch-craft contract rules and
//! is all-or-nothing: a failing step restores the snapshot taken before the
//! first one.

use std::collections::BTreeMap;

use crate::catalog::RecipeCatalog;
use crate::error::{BalanceError, BalanceResult};
use crate::item::ItemId;
use crate::resolver::{CraftingRoute, CraftingStep};

/// Item quantities held by one account.
///
/// Missing entries read as zero. Iteration is ordered by item id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BalanceVector {
    amounts: BTreeMap<ItemId, u64>,
}

impl BalanceVector {
    /// Creates an empty balance vector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a vector from an array aligned to an external item ordering.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::LengthMismatch`] if the lengths differ.
    pub fn from_aligned(ordering: &[ItemId], amounts: &[u64]) -> BalanceResult<Self> {
        if ordering.len() != amounts.len() {
            return Err(BalanceError::LengthMismatch {
                expected: ordering.len(),
                actual: amounts.len(),
            });
        }

        let mut balances = Self::new();
        for (&item, &amount) in ordering.iter().zip(amounts) {
            balances.set(item, amount);
        }
        Ok(balances)
    }

    /// Projects this vector onto an external item ordering.
    #[must_use]
    pub fn to_aligned(&self, ordering: &[ItemId]) -> Vec<u64> {
        ordering.iter().map(|&item| self.get(item)).collect()
    }

    /// Quantity held of `item`.
    #[inline]
    #[must_use]
    pub fn get(&self, item: ItemId) -> u64 {
        self.amounts.get(&item).copied().unwrap_or(0)
    }

    /// Overwrites the quantity held of `item`.
    pub fn set(&mut self, item: ItemId, amount: u64) {
        if amount == 0 {
            self.amounts.remove(&item);
        } else {
            self.amounts.insert(item, amount);
        }
    }

    /// Adds `amount` of `item`.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::Overflow`] if the result does not fit.
    pub fn credit(&mut self, item: ItemId, amount: u64) -> BalanceResult<()> {
        let total = self
            .get(item)
            .checked_add(amount)
            .ok_or(BalanceError::Overflow(item))?;
        self.set(item, total);
        Ok(())
    }

    /// Removes `amount` of `item`.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::InsufficientBalance`] if less is held.
    pub fn debit(&mut self, item: ItemId, amount: u64) -> BalanceResult<()> {
        let available = self.get(item);
        if available < amount {
            return Err(BalanceError::InsufficientBalance {
                item,
                required: amount,
                available,
            });
        }
        self.set(item, available - amount);
        Ok(())
    }

    /// Iterates non-zero balances in item order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, u64)> + '_ {
        self.amounts.iter().map(|(&item, &amount)| (item, amount))
    }

    /// Returns true if nothing is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Executes one craft step: `craft(item, multiplier)`.
    ///
    /// **ATOMIC**: either every input is consumed and the output credited, or
    /// the vector is left unchanged.
    ///
    /// # Errors
    ///
    /// - `ZeroMultiplier` if the multiplier is zero
    /// - `UnknownRecipe` if the item has no recipe
    /// - `InsufficientBalance` if an input is short
    /// - `Overflow` if a quantity does not fit
    pub fn apply_step(&mut self, catalog: &RecipeCatalog, step: CraftingStep) -> BalanceResult<()> {
        let snapshot = self.clone();
        let result = self.apply_step_unchecked(catalog, step);
        if result.is_err() {
            *self = snapshot;
        }
        result
    }

    /// Executes every step of a route in order.
    ///
    /// **ATOMIC**: if any step fails the whole batch is rolled back, matching
    /// the all-or-nothing batch entry point on chain.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing step.
    pub fn apply_route(&mut self, catalog: &RecipeCatalog, route: &CraftingRoute) -> BalanceResult<()> {
        let snapshot = self.clone();
        for &step in route.steps() {
            if let Err(e) = self.apply_step_unchecked(catalog, step) {
                *self = snapshot;
                return Err(e);
            }
        }
        Ok(())
    }

    fn apply_step_unchecked(&mut self, catalog: &RecipeCatalog, step: CraftingStep) -> BalanceResult<()> {
        if step.multiplier == 0 {
            return Err(BalanceError::ZeroMultiplier(step.item));
        }
        let recipe = catalog
            .recipe(step.item)
            .ok_or(BalanceError::UnknownRecipe(step.item))?;

        for input in recipe.inputs() {
            let required = input
                .quantity
                .checked_mul(step.multiplier)
                .ok_or(BalanceError::Overflow(input.item))?;
            self.debit(input.item, required)?;
        }

        let produced = recipe
            .output_quantity()
            .checked_mul(step.multiplier)
            .ok_or(BalanceError::Overflow(step.item))?;
        self.credit(step.item, produced)
    }
}

impl FromIterator<(ItemId, u64)> for BalanceVector {
    fn from_iter<I: IntoIterator<Item = (ItemId, u64)>>(iter: I) -> Self {
        let mut balances = Self::new();
        for (item, amount) in iter {
            balances.set(item, amount);
        }
        balances
    }
}
