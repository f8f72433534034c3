// ABOUTME: Ordered tab collection with id generation.
// ABOUTME: Supports appending, removal, and index- or id-based reordering.

use serde::{Deserialize, Serialize};
use tabgrid_core::{ClusterKey, ReorderStrategy, Tab, TabIcon, TabId};

use crate::error::{LayoutError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabRegistry {
    tabs: Vec<Tab>,
    #[serde(rename = "nextTabId")]
    next_id: u64,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn as_slice(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn get(&self, id: &TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| &t.id == id)
    }

    pub fn contains(&self, id: &TabId) -> bool {
        self.get(id).is_some()
    }

    pub fn position(&self, id: &TabId) -> Option<usize> {
        self.tabs.iter().position(|t| &t.id == id)
    }

    /// Append a new tab, labelled "Tab N" when no label is given
    pub fn add(&mut self, cluster: ClusterKey, icon: Option<TabIcon>, label: Option<String>) -> Tab {
        let id = self.fresh_id();
        let tab = Tab {
            id,
            label: label.unwrap_or_else(|| Tab::default_label(self.tabs.len())),
            icon: icon.unwrap_or_default(),
            cluster,
        };
        self.tabs.push(tab.clone());
        tab
    }

    pub fn remove(&mut self, id: &TabId) -> Result<Tab> {
        let index = self
            .position(id)
            .ok_or_else(|| LayoutError::tab_not_found(id))?;
        Ok(self.tabs.remove(index))
    }

    /// Move the tab at `old_position` so it lands before the tab that was at
    /// `new_position`. Moving forward therefore ends one slot earlier.
    pub fn reorder(&mut self, id: &TabId, old_position: usize, new_position: usize) -> Result<()> {
        let len = self.tabs.len();
        for index in [old_position, new_position] {
            if index >= len {
                return Err(LayoutError::OutOfRange { index, len });
            }
        }
        if &self.tabs[old_position].id != id {
            return Err(LayoutError::tab_not_found(id));
        }

        let tab = self.tabs.remove(old_position);
        let target = if new_position > old_position {
            new_position - 1
        } else {
            new_position
        };
        self.tabs.insert(target, tab);
        Ok(())
    }

    pub fn reorder_by_id(&mut self, first: &TabId, second: &TabId, strategy: ReorderStrategy) -> Result<()> {
        let from = self
            .position(first)
            .ok_or_else(|| LayoutError::tab_not_found(first))?;
        let to = self
            .position(second)
            .ok_or_else(|| LayoutError::tab_not_found(second))?;

        match strategy {
            ReorderStrategy::Swap => self.tabs.swap(from, to),
            ReorderStrategy::Shift => {
                let tab = self.tabs.remove(from);
                self.tabs.insert(to, tab);
            }
        }
        Ok(())
    }

    fn fresh_id(&mut self) -> TabId {
        loop {
            self.next_id += 1;
            let id = TabId(format!("tab-{}", self.next_id));
            if !self.contains(&id) {
                return id;
            }
        }
    }
}
