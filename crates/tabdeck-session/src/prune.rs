//! Stale session cleanup
//!
//! Tab state only matters while the user is inside a tabbed area. Once the
//! current path leaves every persisted session, all of them are dropped.

use tabdeck_storage::SessionStore;

use crate::Result;

/// Remove every persisted session unless `current_path` lies inside one of
/// them. Returns the removed keys.
pub fn prune_stale_sessions(store: &dyn SessionStore, current_path: &str) -> Result<Vec<String>> {
    let keys = store.keys()?;

    if keys.iter().any(|key| is_within(current_path, key)) {
        return Ok(Vec::new());
    }

    for key in &keys {
        store.remove(key)?;
    }

    if !keys.is_empty() {
        tracing::info!(
            current_path = %current_path,
            removed = keys.len(),
            "Pruned stale tab sessions"
        );
    }

    Ok(keys)
}

/// `path` equals `key` or is a sub-path of it.
fn is_within(path: &str, key: &str) -> bool {
    let key = key.trim_end_matches('/');
    if key.is_empty() {
        return true;
    }

    match path.strip_prefix(key) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
