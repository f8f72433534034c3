// ABOUTME: Tab records and the identifiers that reference them.
// ABOUTME: A tab is a logical content context, visible or not.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub String);

impl TabId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TabId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Opaque context key the UI layer uses to group tabs (e.g. a cluster name)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterKey(pub String);

impl From<&str> for ClusterKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// Icon shown next to a tab label. The engine never looks inside it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum TabIcon {
    #[default]
    None,
    /// Remote or data URL
    Url(String),
    /// Raw image bytes
    Blob(Vec<u8>),
    /// Markup node rendered inline by the UI
    Inline(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    pub label: String,
    #[serde(default)]
    pub icon: TabIcon,
    pub cluster: ClusterKey,
}

impl Tab {
    /// Label given to a tab created without one, where `count` is the number
    /// of tabs that existed before it.
    pub fn default_label(count: usize) -> String {
        format!("Tab {}", count + 1)
    }
}
