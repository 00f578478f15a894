//! Settings - Untyped Display Options
//!
//! The raw key/value mapping an admin form, preset file or CLI produces.
//! Nothing here is validated; see [`crate::validation`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical setting keys. One key per field, underscores only.
pub mod keys {
    pub const TYPE: &str = "type";
    pub const VALUE: &str = "value";
    pub const FORMAT: &str = "format";
    pub const COLOR: &str = "color";
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
    pub const PADDING_TOP: &str = "padding_top";
    pub const PADDING_RIGHT: &str = "padding_right";
    pub const PADDING_BOTTOM: &str = "padding_bottom";
    pub const PADDING_LEFT: &str = "padding_left";
    pub const SHOW_VALUE: &str = "show_value";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl SettingValue {
    /// Text form used in error messages.
    pub fn describe(&self) -> String {
        match self {
            SettingValue::Bool(b) => b.to_string(),
            SettingValue::Int(i) => i.to_string(),
            SettingValue::Text(s) => s.clone(),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Int(value)
    }
}

impl From<u32> for SettingValue {
    fn from(value: u32) -> Self {
        SettingValue::Int(i64::from(value))
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

/// Ordered option mapping, e.g. `{"type": "EAN13", "width": 200}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(BTreeMap<String, SettingValue>);

impl Settings {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<SettingValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<SettingValue>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.0.get(key)
    }

    /// Overlay `other` on top of `self`; keys present in `other` win.
    pub fn merge(&mut self, other: &Settings) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }
}

impl<K: Into<String>, V: Into<SettingValue>> FromIterator<(K, V)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
