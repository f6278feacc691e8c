use crate::error::{HistoryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const DEFAULT_PREFERENCES_PATH: &str = "~/Library/Application Support/JetBrains/";

/// One configured IDE-like product.
///
/// `keyword` doubles as the CLI discriminator and the launcher trigger; it is
/// the key of the catalog map and injected after deserialization.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Product {
    #[serde(skip)]
    pub keyword: String,

    /// Node identifier in the launcher workflow graph. Products without one
    /// are usable from the CLI but get no graph node in the bundle.
    #[serde(default)]
    pub uid: Option<String>,

    /// Token matched against preference-folder names (e.g. "GoLand" matches
    /// "GoLand2020.2").
    pub folder_name: String,

    /// OS bundle identifier, used only to activate and launch the product.
    pub bundle_id: String,

    #[serde(default)]
    pub display_name: Option<String>,

    /// Root under which versioned preference folders live.
    #[serde(default = "default_preferences_path")]
    pub preferences_path: String,
}

fn default_preferences_path() -> String {
    DEFAULT_PREFERENCES_PATH.to_string()
}

impl Product {
    /// Human-facing name: the display name when configured, else the
    /// preference-folder token.
    #[must_use]
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.folder_name)
    }
}

/// The product catalog, read fresh every invocation.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: BTreeMap<String, Product>,
    path: std::path::PathBuf,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|err| HistoryError::CatalogUnreadable {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        let mut products: BTreeMap<String, Product> =
            serde_json::from_str(&raw).map_err(|err| HistoryError::CatalogUnreadable {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;

        for (keyword, product) in &mut products {
            product.keyword = keyword.clone();
        }

        Ok(Self {
            products,
            path: path.to_path_buf(),
        })
    }

    pub fn get(&self, keyword: &str) -> Result<&Product> {
        self.products
            .get(keyword)
            .ok_or_else(|| HistoryError::UnknownProduct {
                keyword: keyword.to_string(),
                path: self.path.clone(),
            })
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
