use crate::config::ConstraintTable;
use crate::model::{FrontWheelKind, Mm};

use super::WheelSuggestion;
use super::geometry::{near_wheel, wheel_positions};

/// True when neither rear wheel at `spacing` runs over or next to a row.
///
/// The centred front wheel does not move with the spacing, so it is not part
/// of the search.
pub fn rear_wheels_clear(spacing: Mm, row_positions: &[f64], table: &ConstraintTable) -> bool {
    let wheels = wheel_positions(spacing, FrontWheelKind::FourWheel);
    row_positions
        .iter()
        .all(|pos| !near_wheel(*pos, wheels.left, table) && !near_wheel(*pos, wheels.right, table))
}

/// Searches the wheel spacing grid for the clear spacing nearest to `current`.
pub fn suggest_wheel_spacing(
    current: Mm,
    row_positions: &[f64],
    table: &ConstraintTable,
) -> WheelSuggestion {
    let target = table.clamp_wheel_spacing(current);
    if rear_wheels_clear(target, row_positions, table) {
        return WheelSuggestion {
            spacing: target,
            already_optimal: target == current,
            clear: true,
        };
    }

    let step = table.wheel_search_step.max(1);
    let mut best: Option<Mm> = None;
    let mut candidate = table.min_wheel_spacing;
    while candidate <= table.max_wheel_spacing {
        if rear_wheels_clear(candidate, row_positions, table) {
            let better = match best {
                Some(prev) => (candidate - target).abs() < (prev - target).abs(),
                None => true,
            };
            if better {
                best = Some(candidate);
            }
        }
        let Some(next) = candidate.checked_add(step) else {
            break;
        };
        candidate = next;
    }

    match best {
        Some(spacing) => {
            tracing::trace!(current, spacing, "wheel spacing suggestion");
            WheelSuggestion {
                spacing,
                already_optimal: false,
                clear: true,
            }
        }
        None => {
            tracing::trace!(current, "no clear wheel spacing in range");
            WheelSuggestion {
                spacing: target,
                already_optimal: false,
                clear: false,
            }
        }
    }
}
