//! Bridge error types.

use anvil_economy::{BalanceError, ItemId};
use thiserror::Error;

/// Errors raised while translating between routes and contract calls.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// An empty route has nothing to submit.
    #[error("route has no steps to submit")]
    EmptyRoute,

    /// Parallel arrays differ in length.
    #[error("length mismatch: {ids} ids, {amounts} amounts")]
    LengthMismatch {
        /// Number of item ids.
        ids: usize,
        /// Number of amounts.
        amounts: usize,
    },

    /// A step or transfer carries a zero amount.
    #[error("zero amount for item {0}")]
    ZeroAmount(ItemId),

    /// A chain value does not fit in a `u64`.
    #[error("on-chain value for item {0} exceeds u64")]
    ValueOverflow(ItemId),

    /// Return data could not be decoded.
    #[error("ABI decode failed: {0}")]
    Decode(#[from] alloy_sol_types::Error),

    /// Chain balances did not line up with the item ordering.
    #[error(transparent)]
    Balance(#[from] BalanceError),
}

/// Result alias for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
