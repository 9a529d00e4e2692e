//! Quick links: bookmarks kept in the `quick_links` array of `config.json`
//!
//! The config document is shared with other settings, so every write keeps the
//! rest of the document intact. Stored entries are listed as written, extra
//! keys included. Both operations are fail-soft: errors are logged and reduced
//! to an empty list or `false`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::store::JsonFileStore;

const QUICK_LINKS_KEY: &str = "quick_links";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickLink {
    pub name: String,
    pub url: String,
}

pub struct QuickLinksStore {
    config: JsonFileStore<Map<String, Value>>,
}

impl QuickLinksStore {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config: JsonFileStore::new(config_path),
        }
    }

    /// Stored link objects in insertion order; empty when the config is absent
    /// or unreadable
    pub fn list(&self) -> Vec<Map<String, Value>> {
        match self.try_list() {
            Ok(links) => links,
            Err(e) => {
                log::warn!("[LINKS] Could not read quick links: {}", e);
                Vec::new()
            }
        }
    }

    /// Append a link. The cause of a failure is logged and discarded.
    pub fn add(&self, name: &str, url: &str) -> bool {
        match self.try_add(name, url) {
            Ok(()) => {
                log::info!("[LINKS] Added quick link '{}'", name);
                true
            }
            Err(e) => {
                log::warn!("[LINKS] Failed to add quick link '{}': {}", name, e);
                false
            }
        }
    }

    fn try_list(&self) -> Result<Vec<Map<String, Value>>, String> {
        let config = self.config.load_optional().map_err(|e| e.to_string())?;
        match config.and_then(|mut c| c.remove(QUICK_LINKS_KEY)) {
            Some(Value::Array(entries)) => Ok(entries
                .into_iter()
                .filter_map(|entry| match entry {
                    Value::Object(link) => Some(link),
                    other => {
                        log::warn!("[LINKS] Skipping non-object quick link: {}", other);
                        None
                    }
                })
                .collect()),
            Some(_) => Err("quick_links is not an array".to_string()),
            None => Ok(Vec::new()),
        }
    }

    fn try_add(&self, name: &str, url: &str) -> Result<(), String> {
        let mut config = self
            .config
            .load_optional()
            .map_err(|e| e.to_string())?
            .unwrap_or_default();

        let links = config
            .entry(QUICK_LINKS_KEY)
            .or_insert_with(|| Value::Array(Vec::new()))
            .as_array_mut()
            .ok_or_else(|| "quick_links is not an array".to_string())?;

        let link = QuickLink {
            name: name.to_string(),
            url: url.to_string(),
        };
        links.push(serde_json::to_value(&link).map_err(|e| e.to_string())?);

        self.config.save(&config).map_err(|e| e.to_string())
    }
}
