// ABOUTME: Container state aggregate and the state machine that owns it.
// ABOUTME: Each command maps the previous state to a new one, or is rejected whole.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tabgrid_core::{ClusterKey, Config, IdType, Redistribution, ReorderStrategy, Tab, TabIcon, TabId};

use crate::assignment;
use crate::command::Command;
use crate::error::{Axis, LayoutError, Result};
use crate::grid::{self, GridTrackEditor, Layout, PixelRect, Window, WindowId};
use crate::tabs::TabRegistry;

/// Engine knobs taken from [`Config`]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub min_track_size: u32,
    pub tab_removal: Redistribution,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for EngineConfig {
    fn from(config: &Config) -> Self {
        Self {
            min_track_size: config.min_track_size,
            tab_removal: config.tab_removal.clone(),
        }
    }
}

/// Where a window lands on screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub window_id: WindowId,
    pub tab_id: TabId,
    pub rect: PixelRect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerState {
    #[serde(flatten)]
    tabs: TabRegistry,
    windows: Vec<Window>,
    layout: Layout,
    next_window_id: u64,
}

impl ContainerState {
    /// Empty state with a single track on each axis
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            tabs: TabRegistry::new(),
            windows: Vec::new(),
            layout: Layout::new(width, height),
            next_window_id: 0,
        }
    }

    pub fn tabs(&self) -> &[Tab] {
        self.tabs.as_slice()
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn tab(&self, id: &TabId) -> Option<&Tab> {
        self.tabs.get(id)
    }

    pub fn window(&self, id: &WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| &w.id == id)
    }

    pub fn window_for_tab(&self, tab_id: &TabId) -> Option<&Window> {
        assignment::window_for_tab(&self.windows, tab_id)
    }

    /// Tabs that exist but are not shown in any window
    pub fn unbound_tabs(&self) -> impl Iterator<Item = &Tab> {
        self.tabs
            .iter()
            .filter(move |t| self.window_for_tab(&t.id).is_none())
    }

    pub fn placements(&self) -> Vec<Placement> {
        self.windows
            .iter()
            .map(|w| Placement {
                window_id: w.id.clone(),
                tab_id: w.tab_id.clone(),
                rect: self.layout.placement(&w.position),
            })
            .collect()
    }

    pub fn add_tab(
        &self,
        cluster: ClusterKey,
        icon: Option<TabIcon>,
        label: Option<String>,
    ) -> (Self, Tab) {
        let mut next = self.clone();
        let tab = next.tabs.add(cluster, icon, label);
        (next, tab)
    }

    /// Remove a tab, tearing down its window if it has one
    pub fn remove_tab(&self, id: &TabId, config: &EngineConfig) -> Result<Self> {
        let mut next = self.clone();
        next.tabs.remove(id)?;
        if let Some(index) = next.windows.iter().position(|w| &w.tab_id == id) {
            next.editor(config).remove_window(index, &config.tab_removal);
        }
        Ok(next)
    }

    pub fn reorder_tab(&self, id: &TabId, old_position: usize, new_position: usize) -> Result<Self> {
        let mut next = self.clone();
        next.tabs.reorder(id, old_position, new_position)?;
        Ok(next)
    }

    pub fn reorder_tabs_by_id(&self, first: &TabId, second: &TabId, strategy: ReorderStrategy) -> Result<Self> {
        let mut next = self.clone();
        next.tabs.reorder_by_id(first, second, strategy)?;
        Ok(next)
    }

    pub fn resize_columns(&self, sizes: Vec<u32>) -> Result<Self> {
        self.resize(Axis::Columns, sizes)
    }

    pub fn resize_rows(&self, sizes: Vec<u32>) -> Result<Self> {
        self.resize(Axis::Rows, sizes)
    }

    pub fn add_window(
        &self,
        tab_id: &TabId,
        row: usize,
        strategy: &Redistribution,
        config: &EngineConfig,
    ) -> Result<(Self, WindowId)> {
        if !self.tabs.contains(tab_id) {
            return Err(LayoutError::tab_not_found(tab_id));
        }
        let mut next = self.clone();
        let id = next.fresh_window_id();
        next.editor(config).add_window(id.clone(), tab_id.clone(), row, strategy)?;
        Ok((next, id))
    }

    /// Remove the window named by `target`, read as a window id or as the id
    /// of the tab it shows
    pub fn remove_window(
        &self,
        target: &str,
        id_type: IdType,
        strategy: &Redistribution,
        config: &EngineConfig,
    ) -> Result<Self> {
        let index = self
            .windows
            .iter()
            .position(|w| match id_type {
                IdType::Window => w.id.as_str() == target,
                IdType::Tab => w.tab_id.as_str() == target,
            })
            .ok_or_else(|| LayoutError::window_not_found(target))?;

        let mut next = self.clone();
        next.editor(config).remove_window(index, strategy);
        Ok(next)
    }

    pub fn assign_tab_to_window(&self, tab_id: &TabId, window_id: &WindowId) -> Result<Self> {
        let mut next = self.clone();
        assignment::assign_tab_to_window(&mut next.windows, &next.tabs, tab_id, window_id)?;
        Ok(next)
    }

    /// Refit tracks to a new outer size; window positions are untouched
    pub fn handle_browser_resize(&self, width: u32, height: u32, config: &EngineConfig) -> Result<Self> {
        let mut next = self.clone();
        next.editor(config).fit(width, height)?;
        Ok(next)
    }

    /// Check every structural invariant of the state
    pub fn validate(&self) -> Result<()> {
        let mut tab_ids = HashSet::new();
        for tab in self.tabs.iter() {
            if !tab_ids.insert(&tab.id) {
                return Err(LayoutError::Invariant(format!("duplicate tab id {}", tab.id)));
            }
        }

        let rows = self.layout.rows.len();
        let columns = self.layout.columns.len();
        if rows == 0 || columns == 0 {
            return Err(LayoutError::Invariant("grid has no tracks".to_string()));
        }
        for axis in [Axis::Rows, Axis::Columns] {
            let tracks = self.layout.tracks(axis);
            if tracks.contains(&0) {
                return Err(LayoutError::Invariant(format!("empty track in {axis} {tracks:?}")));
            }
            if grid::total(tracks) > u64::from(u32::MAX) {
                return Err(LayoutError::Invariant(format!("{axis} total overflows")));
            }
        }

        let mut window_ids = HashSet::new();
        let mut shown = HashSet::new();
        for window in &self.windows {
            if !window_ids.insert(&window.id) {
                return Err(LayoutError::Invariant(format!("duplicate window id {}", window.id)));
            }
            if !tab_ids.contains(&window.tab_id) {
                return Err(LayoutError::Invariant(format!(
                    "window {} shows missing tab {}",
                    window.id, window.tab_id
                )));
            }
            if !shown.insert(&window.tab_id) {
                return Err(LayoutError::Invariant(format!(
                    "tab {} shown in more than one window",
                    window.tab_id
                )));
            }
            let p = &window.position;
            let in_bounds = |start: usize, end: usize, len: usize| start >= 1 && start < end && end <= len + 1;
            if !in_bounds(p.row_start, p.row_end, rows) || !in_bounds(p.column_start, p.column_end, columns) {
                return Err(LayoutError::Invariant(format!(
                    "window {} at {:?} is outside a {}x{} grid",
                    window.id, p, rows, columns
                )));
            }
        }
        Ok(())
    }

    fn resize(&self, axis: Axis, sizes: Vec<u32>) -> Result<Self> {
        let mut next = self.clone();
        // Track minimums only matter when redistributing, not for verbatim resizes.
        GridTrackEditor::new(&mut next.windows, &mut next.layout, 0).resize(axis, sizes)?;
        Ok(next)
    }

    fn editor(&mut self, config: &EngineConfig) -> GridTrackEditor<'_> {
        GridTrackEditor::new(&mut self.windows, &mut self.layout, config.min_track_size)
    }

    fn fresh_window_id(&mut self) -> WindowId {
        loop {
            self.next_window_id += 1;
            let id = WindowId(format!("win-{}", self.next_window_id));
            if self.window(&id).is_none() {
                return id;
            }
        }
    }
}

/// Owns the current [`ContainerState`] and applies commands to it.
///
/// Rejected commands are logged and returned as errors; the held state is
/// only ever replaced by a fully computed successor.
#[derive(Debug, Clone)]
pub struct ContainerStateMachine {
    state: ContainerState,
    config: EngineConfig,
}

impl ContainerStateMachine {
    pub fn new(state: ContainerState, config: EngineConfig) -> Self {
        Self { state, config }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ContainerState::new(config.viewport.width, config.viewport.height),
            EngineConfig::from(config),
        )
    }

    pub fn state(&self) -> &ContainerState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn into_state(self) -> ContainerState {
        self.state
    }

    pub fn add_tab(&mut self, cluster: ClusterKey, icon: Option<TabIcon>, label: Option<String>) -> Tab {
        let (next, tab) = self.state.add_tab(cluster, icon, label);
        tracing::debug!(tab = %tab.id, label = %tab.label, "tab added");
        self.state = next;
        tab
    }

    pub fn remove_tab(&mut self, id: &TabId) -> Result<()> {
        let next = self.state.remove_tab(id, &self.config);
        self.apply("removeTab", next)
    }

    pub fn reorder_tab(&mut self, id: &TabId, old_position: usize, new_position: usize) -> Result<()> {
        let next = self.state.reorder_tab(id, old_position, new_position);
        self.apply("reorderTab", next)
    }

    pub fn reorder_tabs_by_id(&mut self, first: &TabId, second: &TabId, strategy: ReorderStrategy) -> Result<()> {
        let next = self.state.reorder_tabs_by_id(first, second, strategy);
        self.apply("reorderTabsById", next)
    }

    pub fn resize_columns(&mut self, sizes: Vec<u32>) -> Result<()> {
        let next = self.state.resize_columns(sizes);
        self.apply("resizeColumns", next)
    }

    pub fn resize_rows(&mut self, sizes: Vec<u32>) -> Result<()> {
        let next = self.state.resize_rows(sizes);
        self.apply("resizeRows", next)
    }

    pub fn add_window(&mut self, tab_id: &TabId, row: usize, strategy: &Redistribution) -> Result<WindowId> {
        let next = self.state.add_window(tab_id, row, strategy, &self.config);
        self.commit("addWindow", next)
    }

    pub fn remove_window(&mut self, target: &str, id_type: IdType, strategy: &Redistribution) -> Result<()> {
        let next = self.state.remove_window(target, id_type, strategy, &self.config);
        self.apply("removeWindow", next)
    }

    pub fn assign_tab_to_window(&mut self, tab_id: &TabId, window_id: &WindowId) -> Result<()> {
        let next = self.state.assign_tab_to_window(tab_id, window_id);
        self.apply("assignTabToWindow", next)
    }

    pub fn handle_browser_resize(&mut self, width: u32, height: u32) -> Result<()> {
        let next = self.state.handle_browser_resize(width, height, &self.config);
        self.apply("handleBrowserResize", next)
    }

    /// Apply a wire command
    pub fn dispatch(&mut self, command: Command) -> Result<()> {
        match command {
            Command::AddTab { cluster, icon, label } => {
                self.add_tab(cluster, icon, label);
                Ok(())
            }
            Command::RemoveTab { tab_id } => self.remove_tab(&tab_id),
            Command::ReorderTab {
                tab_id,
                old_index,
                new_index,
            } => self.reorder_tab(&tab_id, old_index, new_index),
            Command::ReorderTabsById {
                tab_id1,
                tab_id2,
                strategy,
            } => self.reorder_tabs_by_id(&tab_id1, &tab_id2, strategy),
            Command::ResizeColumns { sizes } => self.resize_columns(sizes),
            Command::ResizeRows { sizes } => self.resize_rows(sizes),
            Command::AddWindow {
                tab_id,
                row,
                redistribution,
            } => self.add_window(&tab_id, row, &redistribution).map(|_| ()),
            Command::RemoveWindow {
                target,
                id_type,
                redistribution,
            } => self.remove_window(&target, id_type, &redistribution),
            Command::AssignTabToWindow { tab_id, window_id } => {
                self.assign_tab_to_window(&tab_id, &window_id)
            }
            Command::HandleBrowserResize { width, height } => self.handle_browser_resize(width, height),
        }
    }

    fn apply(&mut self, op: &'static str, next: Result<ContainerState>) -> Result<()> {
        self.commit(op, next.map(|state| (state, ())))
    }

    fn commit<T>(&mut self, op: &'static str, next: Result<(ContainerState, T)>) -> Result<T> {
        match next {
            Ok((state, output)) => {
                debug_assert_eq!(state.validate(), Ok(()), "{op} broke a layout invariant");
                tracing::debug!(
                    op,
                    tabs = state.tabs().len(),
                    windows = state.windows.len(),
                    rows = state.layout.rows.len(),
                    columns = state.layout.columns.len(),
                    "command applied"
                );
                self.state = state;
                Ok(output)
            }
            Err(err) => {
                tracing::warn!(op, %err, "command rejected, state unchanged");
                Err(err)
            }
        }
    }
}

impl Default for ContainerStateMachine {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
