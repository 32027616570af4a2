//! Pointer drags over rows, rear wheels and the pass boundary.
//!
//! A [`Gesture`] keeps the configuration as it was when the pointer went down
//! together with the starting pointer position. Every motion event rebuilds
//! the configuration from that snapshot and the total delta, so rounding never
//! accumulates across a drag.

use crate::config::ConstraintTable;
use crate::layout::spacing::{mirrored_count, round_to_step};
use crate::layout::working_width::resolve_pass_spacing;
use crate::model::RowConfiguration;

use super::structure::{set_gap, set_wheel_spacing, set_working_width};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Row(usize),
    Wheel(WheelSide),
    /// The right-hand edge of the working width.
    WorkingWidth,
}

#[derive(Debug, Clone)]
pub struct Gesture {
    target: DragTarget,
    start_pointer: f64,
    snapshot: RowConfiguration,
}

impl Gesture {
    pub fn begin(config: &RowConfiguration, target: DragTarget, pointer_x: f64) -> Self {
        Self {
            target,
            start_pointer: pointer_x,
            snapshot: config.clone().normalized(),
        }
    }

    pub fn target(&self) -> DragTarget {
        self.target
    }

    pub fn snapshot(&self) -> &RowConfiguration {
        &self.snapshot
    }

    /// Configuration for the pointer at `pointer_x`, derived from the snapshot.
    pub fn resolve(&self, pointer_x: f64, table: &ConstraintTable) -> RowConfiguration {
        let delta = pointer_x - self.start_pointer;
        match self.target {
            DragTarget::Row(row) => drag_row(&self.snapshot, row, delta, table),
            DragTarget::Wheel(side) => drag_wheel(&self.snapshot, side, delta, table),
            DragTarget::WorkingWidth => drag_working_width(&self.snapshot, delta, table),
        }
    }
}

/// Moves `row` laterally by `delta` by resizing the gap on its inner side.
///
/// Left-of-centre rows own the gap to their right, right-of-centre rows the
/// gap to their left; the mirror gap moves with it. A gap that is its own
/// mirror changes by twice the delta so the row still follows the pointer.
/// The centre row of an odd layout cannot move.
pub fn drag_row(
    snapshot: &RowConfiguration,
    row: usize,
    delta: f64,
    table: &ConstraintTable,
) -> RowConfiguration {
    let rows = snapshot.active_rows;
    if rows < 2 || row >= rows || 2 * row + 1 == rows {
        return snapshot.clone();
    }
    let left_of_centre = 2 * row + 1 < rows;
    let (gap_idx, direction) = if left_of_centre {
        (row, -1.0)
    } else {
        (row - 1, 1.0)
    };
    let scale = if mirrored_count(snapshot.row_spacings.len(), gap_idx) == 1 {
        2.0
    } else {
        1.0
    };
    let change = round_to_step(direction * scale * delta, table.row_drag_step);
    let Some(start) = snapshot.row_spacings.get(gap_idx) else {
        return snapshot.clone();
    };
    set_gap(snapshot, gap_idx, start.saturating_add(change), table).unwrap_or_else(|_| snapshot.clone())
}

/// Rear wheels are symmetric about the centreline, so the spacing changes by
/// twice the lateral delta.
pub fn drag_wheel(
    snapshot: &RowConfiguration,
    side: WheelSide,
    delta: f64,
    table: &ConstraintTable,
) -> RowConfiguration {
    let sign = match side {
        WheelSide::Right => 1.0,
        WheelSide::Left => -1.0,
    };
    let change = round_to_step(2.0 * sign * delta, table.wheel_drag_step);
    set_wheel_spacing(snapshot, snapshot.wheel_spacing.saturating_add(change), table)
}

/// Dragging the pass boundary always leaves wheel-following mode.
pub fn drag_working_width(
    snapshot: &RowConfiguration,
    delta: f64,
    table: &ConstraintTable,
) -> RowConfiguration {
    let start = resolve_pass_spacing(snapshot, table).working_width;
    let change = round_to_step(delta, table.row_drag_step);
    set_working_width(snapshot, start.saturating_add(change), table)
}
