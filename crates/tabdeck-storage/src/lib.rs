//! Tabdeck Storage Layer
//!
//! Every tab session is persisted as one JSON document in a single
//! string-keyed slot. The [`SessionStore`] trait is the port the session
//! manager writes through; [`SqliteStore`] is the durable adapter and
//! [`MemoryStore`] the in-process one.

mod database;
mod error;
mod memory;
mod migrations;
mod store;

pub use database::SqliteStore;
pub use error::StorageError;
pub use memory::MemoryStore;
pub use store::SessionStore;

pub type Result<T> = std::result::Result<T, StorageError>;
