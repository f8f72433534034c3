// ABOUTME: Shared types and configuration for tabgrid.
// ABOUTME: Defines tabs, layout strategies, and config file handling.

pub mod config;
pub mod strategy;
pub mod tab;

pub use config::{Config, ConfigError, Viewport};
pub use strategy::{Edge, IdType, Priorities, Redistribution, ReorderStrategy};
pub use tab::{ClusterKey, Tab, TabIcon, TabId};
