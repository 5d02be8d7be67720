//! # Economy Error Types
//!
//! All errors that can occur while building a catalog, resolving a route,
//! or applying a route to a balance vector.

use std::path::PathBuf;

use thiserror::Error;

use crate::item::ItemId;

/// A base resource that could not cover the demand placed on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shortfall {
    /// The item that ran out.
    pub item: ItemId,
    /// The amount the traversal asked for.
    pub required: u64,
    /// The amount left in the working balance at that point.
    pub available: u64,
}

impl std::fmt::Display for Shortfall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "need {} of item {}, have {}",
            self.required, self.item, self.available
        )
    }
}

/// Errors raised while constructing a recipe catalog.
///
/// Every variant means the catalog is malformed and initialisation must abort.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A recipe declared no inputs.
    #[error("recipe for item {0} has no inputs")]
    EmptyInputs(ItemId),

    /// A recipe produces nothing.
    #[error("recipe for item {0} has zero output quantity")]
    ZeroOutputQuantity(ItemId),

    /// A recipe input has a zero quantity.
    #[error("recipe for item {output} requires zero of input {input}")]
    ZeroInputQuantity {
        /// Output of the offending recipe.
        output: ItemId,
        /// The input declared with quantity zero.
        input: ItemId,
    },

    /// Two recipes produce the same item.
    #[error("recipe for output {0} already exists")]
    DuplicateOutput(ItemId),

    /// Two registry entries share the same item id.
    #[error("item {0} registered twice")]
    DuplicateItem(ItemId),

    /// The recipe graph contains a cycle.
    #[error("cycle detected in recipe graph: {}", format_cycle(.0))]
    CycleDetected(Vec<ItemId>),

    /// Failed to read a catalog file.
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse catalog TOML.
    #[error("failed to parse catalog TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

fn format_cycle(items: &[ItemId]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Errors returned by route resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Requested quantity was zero.
    #[error("requested quantity must be positive (target {0})")]
    InvalidQuantity(ItemId),

    /// No plan exists for the target with the given balances.
    #[error("cannot obtain item {target}: {shortfall}")]
    Infeasible {
        /// The item the caller asked for.
        target: ItemId,
        /// The first base resource found short.
        shortfall: Shortfall,
    },

    /// A quantity exceeded the representable range while propagating demand.
    #[error("quantity overflow while resolving item {0}")]
    Overflow(ItemId),
}

/// Errors raised by balance alignment and local route execution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BalanceError {
    /// An aligned balance array does not match the item ordering.
    #[error("balance array has {actual} entries, item ordering has {expected}")]
    LengthMismatch {
        /// Number of items in the ordering.
        expected: usize,
        /// Number of balances supplied.
        actual: usize,
    },

    /// A step consumed more than was held.
    #[error("insufficient input balance: need {required} of item {item}, have {available}")]
    InsufficientBalance {
        /// The item that was missing.
        item: ItemId,
        /// The amount required.
        required: u64,
        /// The amount available.
        available: u64,
    },

    /// A step named an item with no recipe.
    #[error("recipe does not exist for item {0}")]
    UnknownRecipe(ItemId),

    /// A step used a zero multiplier.
    #[error("times must be > 0 (item {0})")]
    ZeroMultiplier(ItemId),

    /// A balance exceeded the representable range.
    #[error("balance overflow on item {0}")]
    Overflow(ItemId),
}

/// Result type for catalog construction.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Result type for route resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Result type for balance operations.
pub type BalanceResult<T> = Result<T, BalanceError>;
