//! Tabdeck Tab Records
//!
//! A tab is a navigable view scoped to one logical resource (a cluster
//! object, a pipeline view). Its id is derived from an id prefix and the
//! resource title, so re-opening the same resource resolves to the same tab.

mod error;
mod identity;
mod position;
mod request;
mod tab;

pub use error::TabError;
pub use identity::{tab_id, tab_title};
pub use position::TabPosition;
pub use request::{AddTab, TabInit, UpdateTabUrl};
pub use tab::Tab;

pub type Result<T> = std::result::Result<T, TabError>;
