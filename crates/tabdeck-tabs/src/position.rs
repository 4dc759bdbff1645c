//! Tab ordering
//!
//! Fixed tabs are pinned and sort by their position. Dynamic tabs are
//! opened ad hoc and always follow the fixed ones:
//! ```text
//! Fixed(0) < Fixed(1) < ... < Dynamic
//! ```
//! Persisted as a plain integer, `-1` meaning dynamic.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum TabPosition {
    Fixed(u32),
    #[default]
    Dynamic,
}

impl TabPosition {
    pub fn is_fixed(&self) -> bool {
        matches!(self, TabPosition::Fixed(_))
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, TabPosition::Dynamic)
    }
}

impl From<i64> for TabPosition {
    fn from(value: i64) -> Self {
        match u32::try_from(value) {
            Ok(position) => TabPosition::Fixed(position),
            Err(_) if value < 0 => TabPosition::Dynamic,
            Err(_) => TabPosition::Fixed(u32::MAX),
        }
    }
}

impl From<TabPosition> for i64 {
    fn from(value: TabPosition) -> Self {
        match value {
            TabPosition::Fixed(position) => i64::from(position),
            TabPosition::Dynamic => -1,
        }
    }
}

impl Ord for TabPosition {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (TabPosition::Fixed(a), TabPosition::Fixed(b)) => a.cmp(b),
            (TabPosition::Fixed(_), TabPosition::Dynamic) => Ordering::Less,
            (TabPosition::Dynamic, TabPosition::Fixed(_)) => Ordering::Greater,
            (TabPosition::Dynamic, TabPosition::Dynamic) => Ordering::Equal,
        }
    }
}

impl PartialOrd for TabPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
