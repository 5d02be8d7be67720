//! # Catalog Configuration
//!
//! Recipes and item names are data, loaded once at startup from TOML:
//!
//! ```toml
//! [[items]]
//! id = 1
//! key = "oak_log"
//! name = "Wooden Log"
//!
//! [[recipes]]
//! output = 2
//! output_quantity = 4
//! inputs = [{ item = 1, quantity = 1 }]
//! ```
//!
//! Item order in the file is the balance-vector alignment.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::{Recipe, RecipeCatalog, RecipeInput};
use crate::error::{CatalogError, CatalogResult};
use crate::item::{ItemId, ItemInfo, ItemRegistry};

/// The catalog shipped with the deployed contract.
const STARTER_CATALOG: &str = include_str!("../data/starter_catalog.toml");

/// A recipe as written in the catalog file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecipeConfig {
    /// Item produced.
    pub output: ItemId,
    /// Units produced per invocation.
    pub output_quantity: u64,
    /// Items consumed per invocation, in order.
    pub inputs: Vec<RecipeInput>,
}

/// Parsed catalog file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Items in balance-alignment order.
    #[serde(default)]
    pub items: Vec<ItemInfo>,
    /// Recipes in declared order.
    #[serde(default)]
    pub recipes: Vec<RecipeConfig>,
}

impl CatalogConfig {
    /// Parses a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] on malformed TOML.
    pub fn from_toml_str(content: &str) -> CatalogResult<Self> {
        let config: Self = toml::from_str(content)?;
        debug!(
            items = config.items.len(),
            recipes = config.recipes.len(),
            "parsed catalog config"
        );
        Ok(config)
    }

    /// Reads and parses a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, or
    /// [`CatalogError::Parse`] on malformed TOML.
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loading recipe catalog");
        Self::from_toml_str(&content)
    }

    /// Validates every recipe and builds the catalog.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure; a malformed catalog aborts
    /// initialisation rather than loading partially.
    pub fn build_catalog(&self) -> CatalogResult<RecipeCatalog> {
        let recipes = self
            .recipes
            .iter()
            .map(|recipe| {
                Recipe::new(recipe.output, recipe.output_quantity, recipe.inputs.clone()).map_err(|e| {
                    warn!(output = recipe.output.get(), error = %e, "rejected recipe");
                    e
                })
            })
            .collect::<CatalogResult<Vec<_>>>()?;

        RecipeCatalog::new(recipes)
    }

    /// Builds the item registry.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateItem`] if an id appears twice.
    pub fn build_registry(&self) -> CatalogResult<ItemRegistry> {
        ItemRegistry::from_items(self.items.iter().cloned())
    }

    /// Builds both the catalog and the registry.
    ///
    /// # Errors
    ///
    /// See [`Self::build_catalog`] and [`Self::build_registry`].
    pub fn into_parts(self) -> CatalogResult<(RecipeCatalog, ItemRegistry)> {
        Ok((self.build_catalog()?, self.build_registry()?))
    }
}

/// The catalog matching the deployed contract's recipes.
///
/// # Errors
///
/// Only fails if the embedded file is malformed.
pub fn starter_config() -> CatalogResult<CatalogConfig> {
    CatalogConfig::from_toml_str(STARTER_CATALOG)
}
