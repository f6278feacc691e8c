//! Script Filter result documents.
//!
//! The launcher consumes a single JSON document per invocation: a list of
//! selectable items, each optionally carrying per-item variables and
//! modifier-key actions. Optional fields are omitted entirely when unset:
//! the launcher treats a missing `valid` as `true` and rejects empty
//! `mods`/`variables` objects.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Modifier-key action attached to an [`Item`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Mod {
    pub arg: String,
    pub subtitle: String,
    pub valid: bool,
}

impl Mod {
    #[must_use]
    pub fn new(arg: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            arg: arg.into(),
            subtitle: subtitle.into(),
            valid: true,
        }
    }

    #[must_use]
    pub fn disabled(arg: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            arg: arg.into(),
            subtitle: subtitle.into(),
            valid: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    File,
    Default,
}

/// One selectable row in the launcher's result list.
///
/// `autocomplete` defaults to `|<subtitle>|`: pressing ⇥ on a row feeds that
/// token back as the query, which the dispatcher recognizes as a request for
/// the row's management view.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Item {
    pub title: String,
    pub subtitle: String,
    pub arg: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub autocomplete: String,
    #[serde(skip_serializing_if = "is_true", default = "default_true")]
    pub valid: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub variables: BTreeMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub mods: BTreeMap<String, Mod>,
}

fn is_true(value: &bool) -> bool {
    *value
}

const fn default_true() -> bool {
    true
}

impl Item {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        arg: impl Into<String>,
    ) -> Self {
        let subtitle = subtitle.into();
        Self {
            title: title.into(),
            autocomplete: format!("|{subtitle}|"),
            subtitle,
            arg: arg.into(),
            item_type: ItemType::File,
            valid: true,
            variables: BTreeMap::new(),
            mods: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn item_type(mut self, item_type: ItemType) -> Self {
        self.item_type = item_type;
        self
    }

    #[must_use]
    pub fn autocomplete(mut self, autocomplete: impl Into<String>) -> Self {
        self.autocomplete = autocomplete.into();
        self
    }

    #[must_use]
    pub fn invalid(mut self) -> Self {
        self.valid = false;
        self
    }

    #[must_use]
    pub fn variable(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn add_mod(&mut self, key_combination: impl Into<String>, action: Mod) {
        self.mods.insert(key_combination.into(), action);
    }

    #[must_use]
    pub fn with_mod(mut self, key_combination: impl Into<String>, action: Mod) -> Self {
        self.add_mod(key_combination, action);
        self
    }
}

/// The complete result document printed to stdout.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScriptFilterOutput {
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub variables: BTreeMap<String, serde_json::Value>,
    pub items: Vec<Item>,
}

impl ScriptFilterOutput {
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            variables: BTreeMap::new(),
            items,
        }
    }

    #[must_use]
    pub fn variable(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Into::into)
    }
}
