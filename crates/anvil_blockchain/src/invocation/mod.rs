//! # Craft Invocations
//!
//! A resolved route is submitted in one of two shapes:
//!
//! - one step: `craft(tokenId, times)`
//! - several steps: `aggrCraft(tokenIds, amounts)`, executed in order and
//!   reverted as a whole if any step fails
//!
//! The "amounts" of the batch entry point are recipe multipliers, not
//! output quantities.

use alloy_primitives::U256;
use alloy_sol_types::SolCall;
use anvil_economy::{CraftingRoute, ItemId};
use tracing::debug;

use crate::contracts::ICraftingItems;
use crate::error::{BridgeError, BridgeResult};

/// A contract call that executes a crafting route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CraftInvocation {
    /// A single recipe invocation.
    Direct {
        /// Recipe output.
        item: ItemId,
        /// Recipe multiplier.
        times: u64,
    },
    /// An ordered batch of recipe invocations.
    Aggregated {
        /// Recipe outputs, in execution order.
        ids: Vec<ItemId>,
        /// Multiplier for each entry of `ids`.
        multipliers: Vec<u64>,
    },
}

impl CraftInvocation {
    /// Chooses the entry point for a route.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::EmptyRoute`] if there is nothing to craft.
    pub fn from_route(route: &CraftingRoute) -> BridgeResult<Self> {
        let invocation = match route.steps() {
            [] => return Err(BridgeError::EmptyRoute),
            [step] => Self::Direct {
                item: step.item,
                times: step.multiplier,
            },
            steps => Self::Aggregated {
                ids: steps.iter().map(|step| step.item).collect(),
                multipliers: steps.iter().map(|step| step.multiplier).collect(),
            },
        };
        debug!(steps = route.len(), aggregated = invocation.is_aggregated(), "route encoded");
        Ok(invocation)
    }

    /// Builds a batch call from parallel arrays.
    ///
    /// # Errors
    ///
    /// - `EmptyRoute` if both arrays are empty
    /// - `LengthMismatch` if the arrays differ in length
    /// - `ZeroAmount` if any multiplier is zero
    pub fn aggregated(ids: Vec<ItemId>, multipliers: Vec<u64>) -> BridgeResult<Self> {
        if ids.len() != multipliers.len() {
            return Err(BridgeError::LengthMismatch {
                ids: ids.len(),
                amounts: multipliers.len(),
            });
        }
        if ids.is_empty() {
            return Err(BridgeError::EmptyRoute);
        }
        if let Some(index) = multipliers.iter().position(|&m| m == 0) {
            return Err(BridgeError::ZeroAmount(ids[index]));
        }
        Ok(Self::Aggregated { ids, multipliers })
    }

    /// Returns true if this uses the batch entry point.
    #[must_use]
    pub const fn is_aggregated(&self) -> bool {
        matches!(self, Self::Aggregated { .. })
    }

    /// The same work expressed as a batch.
    ///
    /// The batch entry point accepts a single entry, so any invocation can
    /// be submitted this way.
    #[must_use]
    pub fn as_aggregated(&self) -> (Vec<ItemId>, Vec<u64>) {
        match self {
            Self::Direct { item, times } => (vec![*item], vec![*times]),
            Self::Aggregated { ids, multipliers } => (ids.clone(), multipliers.clone()),
        }
    }

    /// ABI-encoded calldata, selector included.
    #[must_use]
    pub fn calldata(&self) -> Vec<u8> {
        match self {
            Self::Direct { item, times } => ICraftingItems::craftCall {
                tokenId: U256::from(item.get()),
                times: U256::from(*times),
            }
            .abi_encode(),
            Self::Aggregated { ids, multipliers } => ICraftingItems::aggrCraftCall {
                tokenIds: ids.iter().map(|id| U256::from(id.get())).collect(),
                amounts: multipliers.iter().map(|&m| U256::from(m)).collect(),
            }
            .abi_encode(),
        }
    }

    /// Function selector of the entry point.
    #[must_use]
    pub const fn selector(&self) -> [u8; 4] {
        match self {
            Self::Direct { .. } => ICraftingItems::craftCall::SELECTOR,
            Self::Aggregated { .. } => ICraftingItems::aggrCraftCall::SELECTOR,
        }
    }

    /// Solidity signature of the entry point.
    #[must_use]
    pub const fn signature(&self) -> &'static str {
        match self {
            Self::Direct { .. } => ICraftingItems::craftCall::SIGNATURE,
            Self::Aggregated { .. } => ICraftingItems::aggrCraftCall::SIGNATURE,
        }
    }
}

/// Unzips a route into the `(tokenIds, amounts)` arrays of `aggrCraft`,
/// preserving step order.
///
/// # Errors
///
/// Returns [`BridgeError::EmptyRoute`] if the route has no steps.
pub fn to_batch_args(route: &CraftingRoute) -> BridgeResult<(Vec<ItemId>, Vec<u64>)> {
    if route.is_empty() {
        return Err(BridgeError::EmptyRoute);
    }
    Ok(route
        .steps()
        .iter()
        .map(|step| (step.item, step.multiplier))
        .unzip())
}

/// Calldata for `bridge(tokenIds, amounts)`.
///
/// # Errors
///
/// - `EmptyRoute` if `transfers` is empty
/// - `ZeroAmount` if any amount is zero
pub fn bridge_calldata(transfers: &[(ItemId, u64)]) -> BridgeResult<Vec<u8>> {
    if transfers.is_empty() {
        return Err(BridgeError::EmptyRoute);
    }
    if let Some(&(item, _)) = transfers.iter().find(|(_, amount)| *amount == 0) {
        return Err(BridgeError::ZeroAmount(item));
    }

    Ok(ICraftingItems::bridgeCall {
        tokenIds: transfers.iter().map(|(item, _)| U256::from(item.get())).collect(),
        amounts: transfers.iter().map(|&(_, amount)| U256::from(amount)).collect(),
    }
    .abi_encode())
}
