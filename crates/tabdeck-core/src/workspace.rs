//! Workspace: the shared store and one session manager per key
//!
//! Two managers writing the same slot would overwrite each other, so
//! managers are cached by session key and every caller gets a handle to the
//! same instance.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use tabdeck_session::TabSessionManager;
use tabdeck_storage::{SessionStore, SqliteStore};

use crate::config::Config;
use crate::Result;

pub struct Workspace {
    config: Config,
    store: Arc<dyn SessionStore>,
    /// Live managers by session key
    sessions: Arc<RwLock<HashMap<String, TabSessionManager>>>,
}

impl Workspace {
    /// Open the durable store named by the configuration
    pub fn open(config: Config) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let store = SqliteStore::open(&config.database_path)?;

        tracing::info!(path = %config.database_path.display(), "Opened tab session store");

        Ok(Self::with_store(Arc::new(store), config))
    }

    pub fn with_store(store: Arc<dyn SessionStore>, config: Config) -> Self {
        Self {
            config,
            store,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Manager for `session_key`, created on first use.
    pub fn session(&self, session_key: &str) -> TabSessionManager {
        if let Some(manager) = self.sessions.read().get(session_key) {
            return manager.clone();
        }

        self.sessions
            .write()
            .entry(session_key.to_string())
            .or_insert_with(|| {
                tracing::debug!(session_key = %session_key, "Created session manager");
                TabSessionManager::with_policy(
                    session_key,
                    Arc::clone(&self.store),
                    self.config.fallback_policy(),
                )
            })
            .clone()
    }

    /// Keys with a live manager, sorted.
    pub fn open_sessions(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.sessions.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Keys with persisted tab state.
    pub fn persisted_sessions(&self) -> Result<Vec<String>> {
        Ok(self.store.keys()?)
    }

    /// Drop the manager for `session_key` along with its persisted tabs.
    pub fn close_session(&self, session_key: &str) -> Result<()> {
        self.store.remove(session_key)?;
        self.sessions.write().remove(session_key);

        tracing::info!(session_key = %session_key, "Closed tab session");

        Ok(())
    }

    /// Forget every session once `current_path` has left all of them.
    pub fn prune_stale_sessions(&self, current_path: &str) -> Result<Vec<String>> {
        let removed = tabdeck_session::prune_stale_sessions(self.store.as_ref(), current_path)?;

        if !removed.is_empty() {
            let mut sessions = self.sessions.write();
            for key in &removed {
                sessions.remove(key);
            }
        }

        Ok(removed)
    }
}

impl Clone for Workspace {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            store: Arc::clone(&self.store),
            sessions: Arc::clone(&self.sessions),
        }
    }
}
