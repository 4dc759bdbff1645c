//! Tabdeck Session Management
//!
//! - A session is an ordered set of tabs for one workspace, named by a
//!   caller-supplied session key
//! - Exactly one tab is selected once the session is initialised
//! - Every mutation is written through to the session's storage slot
//! - A selected tab that goes away hands the selection to a fallback tab

mod document;
mod error;
mod manager;
mod policy;
mod prune;

pub use document::{SessionDocument, TAB_DATA_VERSION};
pub use error::SessionError;
pub use manager::{AddTabOutcome, InitOptions, TabSessionManager};
pub use policy::FallbackPolicy;
pub use prune::prune_stale_sessions;

pub type Result<T> = std::result::Result<T, SessionError>;
