//! Presets - Named Display Configurations
//!
//! A preset is one stored display instance: an id, a label and the raw
//! settings it was saved with. Settings are validated when used, not when loaded.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::config::Configuration;
use crate::settings::Settings;
use crate::validation::{ValidationError, Validator};

pub type PresetId = String;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub id: PresetId,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub settings: Settings,
}

impl Preset {
    pub fn configuration(&self, validator: &Validator) -> Result<Configuration, ValidationError> {
        validator.validate(&self.settings)
    }
}

/// Preset registry - loads and caches presets
pub struct PresetRegistry {
    presets: HashMap<PresetId, Preset>,
}

impl PresetRegistry {
    pub fn new() -> Self {
        Self { presets: HashMap::new() }
    }

    /// Load every `*.json` preset in `dir`. A missing directory yields an
    /// empty registry; unreadable or malformed files are skipped.
    pub fn load_from_dir(dir: &Path) -> Result<Self, std::io::Error> {
        let mut registry = Self::new();
        if !dir.exists() {
            return Ok(registry);
        }
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().map_or(true, |e| e != "json") {
                continue;
            }
            let content = match fs::read_to_string(&path) {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable preset");
                    continue;
                }
            };
            match serde_json::from_str::<Preset>(&content) {
                Ok(preset) => registry.register(preset),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping malformed preset");
                }
            }
        }
        tracing::debug!(count = registry.presets.len(), dir = %dir.display(), "Loaded presets");
        Ok(registry)
    }

    pub fn get(&self, id: &str) -> Option<&Preset> {
        self.presets.get(id)
    }

    /// All presets, ordered by id.
    pub fn list(&self) -> Vec<&Preset> {
        let mut presets: Vec<_> = self.presets.values().collect();
        presets.sort_by(|a, b| a.id.cmp(&b.id));
        presets
    }

    pub fn register(&mut self, preset: Preset) {
        self.presets.insert(preset.id.clone(), preset);
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::keys;

    #[test]
    fn test_missing_dir_is_empty() {
        let registry = PresetRegistry::load_from_dir(Path::new("does/not/exist")).unwrap();
        assert!(registry.list().is_empty());
    }

    #[test]
    fn test_list_sorted_and_configuration() {
        let mut registry = PresetRegistry::new();
        for id in ["shelf-label", "checkout"] {
            registry.register(Preset {
                id: id.to_string(),
                label: id.to_string(),
                description: String::new(),
                settings: Settings::new().with(keys::TYPE, "CODE128"),
            });
        }
        let ids: Vec<_> = registry.list().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["checkout", "shelf-label"]);

        let preset = registry.get("checkout").unwrap();
        let config = preset.configuration(&Validator::default()).unwrap();
        assert_eq!(config.symbology().name(), "CODE128");
    }
}
