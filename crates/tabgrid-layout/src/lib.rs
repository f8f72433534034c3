// ABOUTME: Pane-and-grid layout engine for tabgrid.
// ABOUTME: Maps tabs onto grid windows and keeps row/column tracks sized.

pub mod allocator;
pub mod assignment;
pub mod command;
pub mod container;
pub mod error;
pub mod grid;
pub mod tabs;

pub use command::Command;
pub use container::{ContainerState, ContainerStateMachine, EngineConfig, Placement};
pub use error::{Axis, EntityKind, LayoutError};
pub use grid::{GridPosition, GridTrackEditor, Layout, PixelRect, Window, WindowId};
pub use tabs::TabRegistry;
