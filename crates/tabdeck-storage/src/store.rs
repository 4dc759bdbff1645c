//! Persistence port

use crate::Result;

/// A string-keyed slot store, in the manner of browser local storage.
///
/// Values are opaque strings; callers own the encoding. A slot that was
/// never written loads as `None`.
pub trait SessionStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the slot with `value`.
    fn save(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the slot. Removing a missing slot is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// All occupied slot keys, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}
