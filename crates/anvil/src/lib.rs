//! # ANVIL
//!
//! The main crate, tying the crafting logic to the item contract.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐     ┌─────────────────┐
//! │  Catalog (TOML) │────>│  RouteResolver  │────>│ CraftInvocation │
//! └─────────────────┘     │  Projector      │     │  (calldata)     │
//!                         └────────▲────────┘     └─────────────────┘
//!                                  │
//!                         ┌────────┴────────┐
//!                         │  Balances       │
//!                         └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `plan`: One-shot planning of a craft request

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod plan;

// Re-export the layers
pub use anvil_blockchain as blockchain;
pub use anvil_economy as economy;

pub use plan::{parse_balances, parse_item, plan, PlanError, PlanOutcome, PlanReport};
