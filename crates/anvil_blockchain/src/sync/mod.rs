//! # Balance Synchronisation
//!
//! The resolver reads balances as a [`BalanceVector`]; the contract returns
//! them as a `uint256[]` aligned to the ids passed to `balanceOfBatch`.
//! Both directions go through the registry's item ordering.

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use anvil_economy::{BalanceError, BalanceVector, ItemId};
use tracing::{debug, warn};

use crate::contracts::ICraftingItems;
use crate::error::{BridgeError, BridgeResult};

/// Builds the `balanceOfBatch` call for every item in `ordering`.
#[must_use]
pub fn balance_query(owner: Address, ordering: &[ItemId]) -> ICraftingItems::balanceOfBatchCall {
    ICraftingItems::balanceOfBatchCall {
        accounts: vec![owner; ordering.len()],
        ids: ordering.iter().map(|id| U256::from(id.get())).collect(),
    }
}

/// Converts on-chain balances into a [`BalanceVector`].
///
/// # Errors
///
/// - `Balance` if `values` is not aligned with `ordering`
/// - `ValueOverflow` if a balance exceeds `u64::MAX`
pub fn balances_from_chain(ordering: &[ItemId], values: &[U256]) -> BridgeResult<BalanceVector> {
    if ordering.len() != values.len() {
        warn!(expected = ordering.len(), actual = values.len(), "balance array misaligned");
        return Err(BalanceError::LengthMismatch {
            expected: ordering.len(),
            actual: values.len(),
        }
        .into());
    }

    let amounts = ordering
        .iter()
        .zip(values)
        .map(|(&item, value)| to_u64(item, *value))
        .collect::<BridgeResult<Vec<_>>>()?;
    let balances = BalanceVector::from_aligned(ordering, &amounts)?;

    debug!(items = ordering.len(), held = balances.iter().count(), "balances synced");
    Ok(balances)
}

/// Decodes raw `balanceOfBatch` return data into a [`BalanceVector`].
///
/// # Errors
///
/// - `Decode` if the return data is malformed
/// - otherwise as [`balances_from_chain`]
pub fn decode_balances(ordering: &[ItemId], return_data: &[u8]) -> BridgeResult<BalanceVector> {
    let decoded = ICraftingItems::balanceOfBatchCall::abi_decode_returns(return_data, true)?;
    balances_from_chain(ordering, &decoded._0)
}

fn to_u64(item: ItemId, value: U256) -> BridgeResult<u64> {
    if value > U256::from(u64::MAX) {
        return Err(BridgeError::ValueOverflow(item));
    }
    Ok(value.as_limbs()[0])
}
