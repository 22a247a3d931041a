use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{info, instrument};

use crate::names::normalize_key;

const DEFAULT_PORTRAITS: &str = include_str!("../config/portraits.json");

/// Known guests and their bundled portrait, keyed by normalized name.
#[derive(Debug, Clone, Default)]
pub struct PortraitRegistry {
    entries: HashMap<String, String>,
}

impl PortraitRegistry {
    /// Build from a JSON object of `name -> image`. Names are normalized on load,
    /// so "Andrés" and "andres" land on the same entry (last one wins).
    pub fn from_json(body: &str) -> Result<Self, String> {
        let raw: HashMap<String, String> = serde_json::from_str(body)
            .map_err(|e| format!("Failed to parse portrait table: {}", e))?;
        Ok(Self::from_entries(raw))
    }

    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (normalize_key(k.as_ref()), v.into()))
            .filter(|(k, _)| !k.is_empty())
            .collect();
        Self { entries }
    }

    #[instrument(level = "info")]
    pub fn from_path(path: &Path) -> Result<Self, String> {
        let body = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read portrait table {}: {}", path.display(), e))?;
        let registry = Self::from_json(&body)?;
        info!(entries = registry.len(), "Loaded portrait table");
        Ok(registry)
    }

    /// The table shipped with the crate.
    pub fn bundled() -> Result<Self, String> {
        Self::from_json(DEFAULT_PORTRAITS)
    }

    /// Look up by an already normalized key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    /// Look up by display name.
    pub fn lookup(&self, guest_name: &str) -> Option<&str> {
        self.get(&normalize_key(guest_name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
