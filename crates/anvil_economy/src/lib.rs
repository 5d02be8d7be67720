//! # ANVIL Economy
//!
//! Pure Rust crafting logic for the ANVIL item contract.
//!
//! ## Design Principles
//!
//! 1. **Integer quantities only** - Every amount is a `u64`; overflow is an error, never a wrap
//! 2. **Validated catalogs** - Recipes form a DAG, checked once at load time
//! 3. **Transactional crafting** - Routes apply all-or-nothing, like the batch entry point
//! 4. **External configuration** - Recipes and names live in TOML files
//!
//! ## Thread Safety
//!
//! A [`RecipeCatalog`] is immutable once built and may be shared across
//! threads. Each resolution works on its own copy of the balances.
//!
//! ## Example
//!
//! ```rust
//! use anvil_economy::{starter_config, BalanceVector, ItemId, RouteResolver};
//!
//! let (catalog, registry) = starter_config()?.into_parts()?;
//! let pickaxe = registry.id_of("wooden_pickaxe").unwrap_or(ItemId(4));
//! let balances: BalanceVector = [(ItemId(1), 100)].into_iter().collect();
//!
//! let route = RouteResolver::new(&catalog).resolve(pickaxe, 1, &balances)?;
//! assert!(route.is_aggregated());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod balance;
pub mod catalog;
pub mod config;
pub mod craftable;
pub mod error;
pub mod item;
pub mod projector;
pub mod resolver;

pub use balance::BalanceVector;
pub use catalog::{Recipe, RecipeCatalog, RecipeInput};
pub use config::{starter_config, CatalogConfig, RecipeConfig};
pub use craftable::{craftable_items, CraftableItem};
pub use error::{
    BalanceError, BalanceResult, CatalogError, CatalogResult, ResolveError, ResolveResult, Shortfall,
};
pub use item::{ItemId, ItemInfo, ItemRegistry};
pub use projector::{MaterialProjection, MaterialProjector, MaterialRequirement};
pub use resolver::{CraftingRoute, CraftingStep, DeficitPolicy, RouteResolver};
