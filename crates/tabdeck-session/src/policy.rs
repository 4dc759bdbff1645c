//! Fallback selection policy

use serde::{Deserialize, Serialize};

use tabdeck_tabs::Tab;

pub const DEFAULT_FALLBACK_INDEX: usize = 1;

/// Decides which tab inherits the selection when the selected tab is
/// removed or stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackPolicy {
    /// Index into the collection as it was before the removal
    pub index: usize,
    /// Return to the tab that was selected before the closing one
    pub restore_previous: bool,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            index: DEFAULT_FALLBACK_INDEX,
            restore_previous: true,
        }
    }
}

impl FallbackPolicy {
    pub fn fixed_index(index: usize) -> Self {
        Self {
            index,
            restore_previous: false,
        }
    }

    /// Index of the tab to select when `tabs[target]` goes away, `None` when
    /// no other tab exists.
    pub fn resolve(&self, tabs: &[Tab], target: usize, previous: Option<&str>) -> Option<usize> {
        if self.restore_previous {
            let previous_index =
                previous.and_then(|id| tabs.iter().position(|tab| tab.id == id));
            if let Some(index) = previous_index.filter(|&index| index != target) {
                return Some(index);
            }
        }

        if self.index < tabs.len() && self.index != target {
            return Some(self.index);
        }

        // Clamp into the tabs that remain once the target is gone
        let remaining = tabs.len().checked_sub(1).filter(|&n| n > 0)?;
        let slot = self.index.min(remaining - 1);
        Some(if slot < target { slot } else { slot + 1 })
    }

    /// Index to select at initialisation when nothing asked to be selected.
    pub fn initial(&self, len: usize) -> Option<usize> {
        len.checked_sub(1).map(|last| self.index.min(last))
    }
}
