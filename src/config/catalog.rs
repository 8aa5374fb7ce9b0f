//! Catalog seed configuration loading from catalog.toml
//!
//! This module provides functionality to load an initial product catalog
//! from a TOML configuration file. The products defined in catalog.toml are
//! used to seed the store on first run; names that already exist are left
//! alone.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire catalog.toml file
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// List of product seeds
    pub products: Vec<ProductSeed>,
}

/// Configuration for a single catalog product
#[derive(Debug, Deserialize, Clone)]
pub struct ProductSeed {
    /// Display name of the product
    pub name: String,
    /// Optional sort/display code (`"MMM-SSS"`)
    pub code: Option<String>,
}

/// Loads the catalog seed configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid,
/// or required fields are missing.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read catalog file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog.toml: {e}"),
    })
}

/// Loads the catalog seed configuration from the default location
/// (./catalog.toml).
pub fn load_default_config() -> Result<CatalogConfig> {
    load_config("catalog.toml")
}
