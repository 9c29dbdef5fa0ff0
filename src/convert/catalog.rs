//! Converter catalog
//!
//! Maps declared function names to implementation descriptors. The
//! catalog lives on a remote metadata service and is fetched once per
//! chain-build call; its source is an explicit injected dependency so
//! chain construction stays deterministic under test.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::{DataPrepError, Result};

/// Implementation descriptor for one catalog function
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    /// Builtin unit identifier (e.g. "numeric_cast", "min_max", "one_hot")
    pub unit: String,
    /// Default arguments, overridden by the field's declared args
    #[serde(default)]
    pub args: Value,
}

/// Function-name to implementation-descriptor mapping
pub type ConverterCatalog = HashMap<String, CatalogEntry>;

/// Source of the converter catalog
pub trait CatalogSource {
    /// Fetch the current catalog contents
    fn fetch(&self) -> Result<ConverterCatalog>;
}

/// Catalog fetched over HTTP from the metadata service root URL
pub struct RestCatalog {
    root_url: String,
    client: reqwest::blocking::Client,
}

impl RestCatalog {
    pub fn new(root_url: impl Into<String>) -> Self {
        Self {
            root_url: root_url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn catalog_url(&self) -> String {
        format!("{}/converters", self.root_url.trim_end_matches('/'))
    }
}

impl CatalogSource for RestCatalog {
    fn fetch(&self) -> Result<ConverterCatalog> {
        let url = self.catalog_url();
        debug!("fetching converter catalog from {}", url);

        let fetch = || -> std::result::Result<ConverterCatalog, reqwest::Error> {
            self.client.get(&url).send()?.error_for_status()?.json()
        };

        let catalog = fetch().map_err(|e| {
            error!("converter catalog fetch failed from {}: {}", url, e);
            DataPrepError::CatalogFetch {
                url: url.clone(),
                reason: e.to_string(),
            }
        })?;

        debug!("converter catalog: {} functions", catalog.len());
        Ok(catalog)
    }
}
