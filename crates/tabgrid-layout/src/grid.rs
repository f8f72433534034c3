// ABOUTME: Grid tracks, window placement, and track insertion/removal.
// ABOUTME: Keeps window positions contiguous as rows and columns come and go.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use tabgrid_core::{Redistribution, TabId};

use crate::allocator;
use crate::error::{Axis, LayoutError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub String);

impl WindowId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Cell span of a window, as 1-based grid lines with exclusive ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPosition {
    pub row_start: usize,
    pub row_end: usize,
    pub column_start: usize,
    pub column_end: usize,
}

impl GridPosition {
    /// A single cell at 1-based track `row`, `column`
    pub fn cell(row: usize, column: usize) -> Self {
        Self {
            row_start: row,
            row_end: row + 1,
            column_start: column,
            column_end: column + 1,
        }
    }

    pub fn rows(&self) -> Range<usize> {
        self.row_start..self.row_end
    }

    pub fn columns(&self) -> Range<usize> {
        self.column_start..self.column_end
    }

    pub fn overlaps_rows(&self, other: &GridPosition) -> bool {
        self.row_start < other.row_end && other.row_start < self.row_end
    }

    pub fn same_rows(&self, other: &GridPosition) -> bool {
        self.row_start == other.row_start && self.row_end == other.row_end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    pub id: WindowId,
    pub tab_id: TabId,
    pub position: GridPosition,
}

/// Rectangle in pixels, relative to the grid origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Pixel sizes of the shared row and column tracks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub rows: Vec<u32>,
    pub columns: Vec<u32>,
}

impl Layout {
    /// One row and one column filling the viewport, at least 1px each
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            rows: vec![height.max(1)],
            columns: vec![width.max(1)],
        }
    }

    pub fn width(&self) -> u32 {
        saturate(total(&self.columns))
    }

    pub fn height(&self) -> u32 {
        saturate(total(&self.rows))
    }

    pub fn tracks(&self, axis: Axis) -> &[u32] {
        match axis {
            Axis::Rows => &self.rows,
            Axis::Columns => &self.columns,
        }
    }

    fn tracks_mut(&mut self, axis: Axis) -> &mut Vec<u32> {
        match axis {
            Axis::Rows => &mut self.rows,
            Axis::Columns => &mut self.columns,
        }
    }

    /// Pixel rectangle covered by `position`. Lines past the last track are
    /// clamped to the grid edge.
    pub fn placement(&self, position: &GridPosition) -> PixelRect {
        let (x, width) = span(&self.columns, position.columns());
        let (y, height) = span(&self.rows, position.rows());
        PixelRect { x, y, width, height }
    }
}

fn span(tracks: &[u32], lines: Range<usize>) -> (u32, u32) {
    let start = lines.start.saturating_sub(1).min(tracks.len());
    let end = lines.end.saturating_sub(1).clamp(start, tracks.len());
    (saturate(total(&tracks[..start])), saturate(total(&tracks[start..end])))
}

/// Sum of track sizes, wide enough that it cannot overflow
pub(crate) fn total(tracks: &[u32]) -> u64 {
    tracks.iter().map(|&s| u64::from(s)).sum()
}

fn saturate(size: u64) -> u32 {
    u32::try_from(size).unwrap_or(u32::MAX)
}

/// Mutates windows and tracks together so positions stay valid.
pub struct GridTrackEditor<'a> {
    windows: &'a mut Vec<Window>,
    layout: &'a mut Layout,
    min_track_size: u32,
}

impl<'a> GridTrackEditor<'a> {
    pub fn new(windows: &'a mut Vec<Window>, layout: &'a mut Layout, min_track_size: u32) -> Self {
        Self {
            windows,
            layout,
            min_track_size,
        }
    }

    /// Place a new window for `tab_id` in `row`.
    ///
    /// The first window on an empty grid takes every existing column instead
    /// of appending one, so no empty column is left behind. Later windows get
    /// a freshly appended column carved out of the current width. `row` may be
    /// one past the last row, which appends a row track the same way. An axis
    /// too small to give every track a pixel is rejected with `InvalidSize`.
    pub fn add_window(
        &mut self,
        id: WindowId,
        tab_id: TabId,
        row: usize,
        strategy: &Redistribution,
    ) -> Result<&Window> {
        if let Some(bound) = self.windows.iter().find(|w| w.tab_id == tab_id) {
            return Err(LayoutError::AlreadyBound {
                tab: tab_id.to_string(),
                window: bound.id.to_string(),
            });
        }
        let row_count = self.layout.rows.len();
        if row == 0 || row > row_count + 1 {
            return Err(LayoutError::OutOfRange {
                index: row,
                len: row_count,
            });
        }

        let new_row = row == row_count + 1;
        let new_column = !self.windows.is_empty();
        for (axis, grows) in [(Axis::Rows, new_row), (Axis::Columns, new_column)] {
            let tracks = self.layout.tracks(axis);
            let size = total(tracks);
            if grows && size < tracks.len() as u64 + 1 {
                return Err(LayoutError::InvalidSize {
                    axis,
                    index: None,
                    size: saturate(size),
                });
            }
        }

        if new_row {
            self.append_track(Axis::Rows, strategy);
        }
        let position = if !new_column {
            GridPosition {
                row_start: row,
                row_end: row + 1,
                column_start: 1,
                column_end: self.layout.columns.len() + 1,
            }
        } else {
            self.append_track(Axis::Columns, strategy);
            GridPosition::cell(row, self.layout.columns.len())
        };

        tracing::debug!(window = %id, tab = %tab_id, ?position, "window added");
        self.windows.push(Window {
            id,
            tab_id,
            position,
        });
        Ok(&self.windows[self.windows.len() - 1])
    }

    /// Remove the window at `index`, handing its space to a row neighbor or
    /// collapsing its row when nothing else lives there.
    pub fn remove_window(&mut self, index: usize, strategy: &Redistribution) -> Window {
        let removed = self.windows.remove(index);
        let vacated = removed.position;

        let row_shared = self.windows.iter().any(|w| w.position.overlaps_rows(&vacated));
        if row_shared {
            self.absorb_columns(&vacated);
        } else if self.layout.rows.len() > 1 {
            self.collapse_row(vacated.row_start, strategy);
        }

        tracing::debug!(window = %removed.id, rows = self.layout.rows.len(), "window removed");
        removed
    }

    /// Replace a track list verbatim, e.g. after a drag-resize
    pub fn resize(&mut self, axis: Axis, sizes: Vec<u32>) -> Result<()> {
        let current = self.layout.tracks(axis).len();
        if sizes.len() != current {
            return Err(LayoutError::LengthMismatch {
                axis,
                expected: current,
                actual: sizes.len(),
            });
        }
        if let Some(index) = sizes.iter().position(|&s| s == 0) {
            return Err(LayoutError::InvalidSize {
                axis,
                index: Some(index),
                size: 0,
            });
        }
        let size = total(&sizes);
        if size > u64::from(u32::MAX) {
            return Err(LayoutError::InvalidSize {
                axis,
                index: None,
                size: saturate(size),
            });
        }
        *self.layout.tracks_mut(axis) = sizes;
        Ok(())
    }

    /// Spread a new viewport size evenly over the existing tracks
    pub fn fit(&mut self, width: u32, height: u32) -> Result<()> {
        for (axis, total) in [(Axis::Columns, width), (Axis::Rows, height)] {
            if (total as usize) < self.layout.tracks(axis).len() {
                return Err(LayoutError::InvalidSize {
                    axis,
                    index: None,
                    size: total,
                });
            }
        }
        let even = Redistribution::Even;
        for (axis, total) in [(Axis::Columns, width), (Axis::Rows, height)] {
            let tracks = self.layout.tracks_mut(axis);
            *tracks = allocator::redistribute(tracks, total, &even, self.min_track_size);
        }
        Ok(())
    }

    fn append_track(&mut self, axis: Axis, strategy: &Redistribution) {
        let min_track_size = self.min_track_size;
        let tracks = self.layout.tracks_mut(axis);
        let size = saturate(total(tracks));
        *tracks = allocator::make_room(tracks, size, strategy, min_track_size);
    }

    /// Extend the first same-row window touching the vacated span. For each
    /// candidate the window after the gap is checked before the one before it.
    fn absorb_columns(&mut self, vacated: &GridPosition) {
        for window in self.windows.iter_mut() {
            let position = &mut window.position;
            if !position.same_rows(vacated) {
                continue;
            }
            if position.column_start == vacated.column_end {
                position.column_start = vacated.column_start;
                return;
            }
            if position.column_end == vacated.column_start {
                position.column_end = vacated.column_end;
                return;
            }
        }
    }

    fn collapse_row(&mut self, row: usize, strategy: &Redistribution) {
        let total = self.layout.height();
        self.layout.rows.remove(row - 1);
        self.layout.rows =
            allocator::redistribute(&self.layout.rows, total, strategy, self.min_track_size);

        for window in self.windows.iter_mut() {
            let position = &mut window.position;
            if position.row_start > row {
                position.row_start -= 1;
                position.row_end -= 1;
            }
        }
        tracing::debug!(row, remaining = self.layout.rows.len(), "row collapsed");
    }
}
