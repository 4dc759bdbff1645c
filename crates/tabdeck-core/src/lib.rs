//! Tabdeck Core
//!
//! Entry point for embedding tab sessions: one [`Workspace`] owns the store
//! and hands out a single [`TabSessionManager`] per session key.

mod config;
mod error;
mod workspace;

pub use config::Config;
pub use error::CoreError;
pub use workspace::Workspace;

// Re-export core components
pub use tabdeck_session::{
    prune_stale_sessions, AddTabOutcome, FallbackPolicy, InitOptions, SessionDocument,
    SessionError, TabSessionManager, TAB_DATA_VERSION,
};
pub use tabdeck_storage::{MemoryStore, SessionStore, SqliteStore, StorageError};
pub use tabdeck_tabs::{tab_id, tab_title, AddTab, Tab, TabError, TabInit, TabPosition, UpdateTabUrl};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging. `RUST_LOG` takes precedence over `config.log_filter`.
pub fn init_logging(config: &Config) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    fmt().with_env_filter(filter).with_target(true).init();
}
