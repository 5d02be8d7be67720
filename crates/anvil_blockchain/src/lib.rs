//! # ANVIL Blockchain Bridge
//!
//! Translates between the crafting resolver and the on-chain item contract.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐  balanceOfBatch  ┌─────────────────┐
//! │  Item           │ ───────────────▶ │  BalanceVector  │
//! │  Contract       │                  └────────┬────────┘
//! └─────────────────┘                           │ resolve
//!          ▲                                    ▼
//!          │   craft / aggrCraft       ┌─────────────────┐
//!          └────────────────────────── │ CraftInvocation │
//!                                      └─────────────────┘
//! ```
//!
//! Transport is the caller's concern: this crate only builds calldata and
//! decodes return data.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod contracts;
pub mod error;
pub mod invocation;
pub mod revert;
pub mod sync;

pub use contracts::ICraftingItems;
pub use error::{BridgeError, BridgeResult};
pub use invocation::{bridge_calldata, to_batch_args, CraftInvocation};
pub use revert::CraftRevert;
pub use sync::{balance_query, balances_from_chain, decode_balances};
