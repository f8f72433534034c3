// ABOUTME: Tab-to-window binding with swap-on-conflict semantics.
// ABOUTME: A window always shows exactly one tab; a tab is shown at most once.

use tabgrid_core::TabId;

use crate::error::{LayoutError, Result};
use crate::grid::{Window, WindowId};
use crate::tabs::TabRegistry;

/// Show `tab_id` in `window_id`.
///
/// If the tab is already shown elsewhere, that other window takes over the
/// tab the target window was showing, so no window is ever left empty.
/// Returns the id of the other window when a swap happened.
pub fn assign_tab_to_window(
    windows: &mut [Window],
    tabs: &TabRegistry,
    tab_id: &TabId,
    window_id: &WindowId,
) -> Result<Option<WindowId>> {
    let target = windows
        .iter()
        .position(|w| &w.id == window_id)
        .ok_or_else(|| LayoutError::window_not_found(window_id))?;
    if !tabs.contains(tab_id) {
        return Err(LayoutError::tab_not_found(tab_id));
    }
    if &windows[target].tab_id == tab_id {
        return Ok(None);
    }

    let displaced = std::mem::replace(&mut windows[target].tab_id, tab_id.clone());
    let swapped = windows
        .iter_mut()
        .enumerate()
        .find(|(i, w)| *i != target && &w.tab_id == tab_id)
        .map(|(_, other)| {
            other.tab_id = displaced.clone();
            other.id.clone()
        });

    match &swapped {
        Some(other) => {
            tracing::debug!(tab = %tab_id, window = %window_id, %other, "tab swapped between windows")
        }
        None => tracing::debug!(tab = %tab_id, window = %window_id, %displaced, "tab assigned"),
    }
    Ok(swapped)
}

pub fn window_for_tab<'w>(windows: &'w [Window], tab_id: &TabId) -> Option<&'w Window> {
    windows.iter().find(|w| &w.tab_id == tab_id)
}
