//! Persisted session document
//!
//! One JSON document per session slot:
//! ```text
//! { "key": "/resource-browser", "version": 1, "data": [Tab, ...], ...extra }
//! ```
//! Other features may attach sibling fields to the document; they are kept
//! across every write.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use tabdeck_storage::SessionStore;
use tabdeck_tabs::Tab;

use crate::Result;

pub const TAB_DATA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDocument {
    pub key: String,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub data: Vec<Tab>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionDocument {
    pub fn new(key: impl Into<String>, data: Vec<Tab>) -> Self {
        Self {
            key: key.into(),
            version: TAB_DATA_VERSION,
            data,
            extra: Map::new(),
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn is_readable_for(&self, key: &str) -> bool {
        self.key == key && self.version == TAB_DATA_VERSION
    }
}

/// Tabs persisted for `key`. Malformed or foreign documents read as absent.
pub(crate) fn read_tabs(store: &dyn SessionStore, key: &str) -> Result<Option<Vec<Tab>>> {
    let Some(raw) = store.load(key)? else {
        return Ok(None);
    };

    match SessionDocument::parse(&raw) {
        Ok(document) if document.is_readable_for(key) => Ok(Some(document.data)),
        Ok(document) => {
            tracing::warn!(
                session_key = %key,
                document_key = %document.key,
                version = document.version,
                "Ignoring persisted tabs from another session or version"
            );
            Ok(None)
        }
        Err(e) => {
            tracing::warn!(session_key = %key, error = %e, "Ignoring malformed persisted tabs");
            Ok(None)
        }
    }
}

/// Overwrite the slot for `key`, merging in sibling fields already stored there.
///
/// Siblings are taken from any JSON object in the slot, whether or not it is
/// a readable tab document.
pub(crate) fn write_tabs(store: &dyn SessionStore, key: &str, tabs: &[Tab]) -> Result<()> {
    let mut extra = store
        .load(key)?
        .and_then(|raw| serde_json::from_str::<Map<String, Value>>(&raw).ok())
        .unwrap_or_default();
    for owned in ["key", "version", "data"] {
        extra.remove(owned);
    }

    let document = SessionDocument {
        extra,
        ..SessionDocument::new(key, tabs.to_vec())
    };
    store.save(key, &document.to_json()?)?;
    Ok(())
}
