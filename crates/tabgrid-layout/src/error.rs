// ABOUTME: Error taxonomy for rejected layout commands.
// ABOUTME: Every variant leaves the container state untouched.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Tab,
    Window,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Tab => f.write_str("tab"),
            EntityKind::Window => f.write_str("window"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Rows,
    Columns,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Rows => f.write_str("rows"),
            Axis::Columns => f.write_str("columns"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("No {kind} with id {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("Index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("Expected {expected} {axis} but got {actual}")]
    LengthMismatch {
        axis: Axis,
        expected: usize,
        actual: usize,
    },

    /// `index` names the offending track, or is `None` for a whole-axis total
    #[error("Invalid size {size} for {axis}")]
    InvalidSize {
        axis: Axis,
        index: Option<usize>,
        size: u32,
    },

    #[error("Tab {tab} is already shown in window {window}")]
    AlreadyBound { tab: String, window: String },

    #[error("Layout invariant violated: {0}")]
    Invariant(String),
}

impl LayoutError {
    pub fn tab_not_found(id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind: EntityKind::Tab,
            id: id.to_string(),
        }
    }

    pub fn window_not_found(id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind: EntityKind::Window,
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;
