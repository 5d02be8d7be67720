//! # Items
//!
//! Item identifiers and the presentation registry that maps them to names.
//!
//! An [`ItemId`] is the only thing the resolver knows about an item. Display
//! names live in the [`ItemRegistry`], which also fixes the order in which
//! external balance arrays are aligned.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// Unique identifier for an item type (the on-chain token id).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Creates a new item identifier.
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw token id.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Presentation data for one item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInfo {
    /// Token id.
    pub id: ItemId,
    /// Stable machine key (e.g. `oak_log`).
    pub key: String,
    /// Human-readable name.
    pub name: String,
}

/// Ordered registry of known items.
///
/// Registration order is significant: it is the alignment used for balance
/// arrays read from the chain in one batch.
#[derive(Clone, Debug, Default)]
pub struct ItemRegistry {
    items: Vec<ItemInfo>,
    by_id: HashMap<ItemId, usize>,
    by_key: HashMap<String, usize>,
}

impl ItemRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from items in alignment order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateItem`] if an id appears twice.
    pub fn from_items(items: impl IntoIterator<Item = ItemInfo>) -> CatalogResult<Self> {
        let mut registry = Self::new();
        for item in items {
            registry.register(item)?;
        }
        Ok(registry)
    }

    /// Appends an item to the registry.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateItem`] if the id is already registered.
    pub fn register(&mut self, item: ItemInfo) -> CatalogResult<()> {
        if self.by_id.contains_key(&item.id) {
            return Err(CatalogError::DuplicateItem(item.id));
        }
        let index = self.items.len();
        self.by_id.insert(item.id, index);
        self.by_key.insert(item.key.clone(), index);
        self.items.push(item);
        Ok(())
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&ItemInfo> {
        self.by_id.get(&id).map(|&index| &self.items[index])
    }

    /// Looks up an item id by its machine key.
    #[must_use]
    pub fn id_of(&self, key: &str) -> Option<ItemId> {
        self.by_key.get(key).map(|&index| self.items[index].id)
    }

    /// Display name for an item, falling back to `Token {id}`.
    #[must_use]
    pub fn display_name(&self, id: ItemId) -> String {
        self.get(id)
            .map_or_else(|| format!("Token {id}"), |info| info.name.clone())
    }

    /// Item ids in alignment order.
    #[must_use]
    pub fn ordering(&self) -> Vec<ItemId> {
        self.items.iter().map(|info| info.id).collect()
    }

    /// Iterates registered items in alignment order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemInfo> {
        self.items.iter()
    }

    /// Number of registered items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
