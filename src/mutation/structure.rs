use crate::config::ConstraintTable;
use crate::layout::spacing::{
    floor_to_step, mirror_index, mirrored_count, row_offsets, set_gap_mirrored, span_of,
    spacings_from_offsets, uniform_spacings,
};
use crate::layout::working_width::manual_width_mode;
use crate::model::{FrontWheelKind, Mm, RowConfiguration, SeedSize, WidthMode};

use super::Refusal;

pub type Mutation = Result<RowConfiguration, Refusal>;

/// Where a new row pair goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertTarget {
    /// Split the gap at this index (and its mirror).
    Gap(usize),
    /// Add one outer row on each side.
    Edge,
}

fn check_span(span: Mm, seed_size: SeedSize, table: &ConstraintTable) -> Result<(), Refusal> {
    let max = table.max_row_span(seed_size);
    if span > max {
        return Err(Refusal::ToolbeamExceeded { span, max });
    }
    Ok(())
}

/// Largest value gap `idx` may take while the other gaps keep their values.
pub fn max_gap(spacings: &[Mm], idx: usize, seed_size: SeedSize, table: &ConstraintTable) -> Mm {
    let min = table.min_row_distance(seed_size);
    let Some(current) = spacings.get(idx) else {
        return min;
    };
    let count = mirrored_count(spacings.len(), idx) as Mm;
    let others = span_of(spacings).saturating_sub(current.saturating_mul(count));
    let room = table.max_row_span(seed_size).saturating_sub(others) / count;
    floor_to_step(room, table.row_drag_step).max(min)
}

/// Clamps and writes gap `idx` together with its mirror.
pub fn set_gap(config: &RowConfiguration, idx: usize, value: Mm, table: &ConstraintTable) -> Mutation {
    let mut next = config.clone().normalized();
    if idx >= next.row_spacings.len() {
        return Err(Refusal::NoSuchGap { index: idx });
    }
    let min = next.min_row_distance(table);
    let max = max_gap(&next.row_spacings, idx, next.seed_size, table);
    set_gap_mirrored(&mut next.row_spacings, idx, value.max(min).min(max));
    Ok(next)
}

pub fn insert_row_pair(
    config: &RowConfiguration,
    target: InsertTarget,
    table: &ConstraintTable,
) -> Mutation {
    let mut next = config.clone().normalized();
    let requested = next.active_rows + 2;
    if requested > table.max_active_rows {
        return Err(Refusal::TooManyRows {
            requested,
            max: table.max_active_rows,
        });
    }
    let min = next.min_row_distance(table);
    let step = table.row_drag_step;
    let gaps = &next.row_spacings;

    let spacings = match target {
        InsertTarget::Edge => {
            let outer = next.row_distance.max(min);
            let mut spacings = Vec::with_capacity(gaps.len() + 2);
            spacings.push(outer);
            if next.active_rows > 0 {
                spacings.extend_from_slice(gaps);
                spacings.push(outer);
            }
            check_span(span_of(&spacings), next.seed_size, table)?;
            spacings
        }
        InsertTarget::Gap(index) => {
            let Some(&gap) = gaps.get(index) else {
                return Err(Refusal::NoSuchGap { index });
            };
            let mirror = mirror_index(gaps.len(), index);
            let mut spacings = Vec::with_capacity(gaps.len() + 2);
            if mirror == index {
                // A centre gap split in two would add a single row.
                let side = floor_to_step(gap / 3, step);
                let middle = gap - 2 * side;
                if side < min || middle < min {
                    return Err(Refusal::GapTooNarrow {
                        index,
                        gap,
                        needed: min.saturating_mul(3),
                    });
                }
                for (idx, value) in gaps.iter().enumerate() {
                    if idx == index {
                        spacings.extend_from_slice(&[side, middle, side]);
                    } else {
                        spacings.push(*value);
                    }
                }
            } else {
                let first = floor_to_step(gap / 2, step);
                let second = gap - first;
                if first < min {
                    return Err(Refusal::GapTooNarrow {
                        index,
                        gap,
                        needed: min.saturating_mul(2),
                    });
                }
                let left = index.min(mirror);
                for (idx, value) in gaps.iter().enumerate() {
                    if idx == left {
                        spacings.extend_from_slice(&[first, second]);
                    } else if idx == mirror_index(gaps.len(), left) {
                        spacings.extend_from_slice(&[second, first]);
                    } else {
                        spacings.push(*value);
                    }
                }
            }
            spacings
        }
    };

    next.active_rows = requested;
    next.row_spacings = spacings;
    Ok(next)
}

/// Removes `row` and its mirror counterpart. The centre row of an odd layout
/// is its own mirror and goes alone.
pub fn remove_row_pair(config: &RowConfiguration, row: usize) -> Mutation {
    let mut next = config.clone().normalized();
    let rows = next.active_rows;
    if row >= rows {
        return Err(Refusal::NoSuchRow { row });
    }
    let mirror = rows - 1 - row;
    let removed = if mirror == row { 1 } else { 2 };
    let requested = rows - removed;
    let min_rows = next.front_wheel.min_rows();
    if requested < min_rows {
        return Err(Refusal::TooFewRows {
            requested,
            min: min_rows,
        });
    }

    let offsets: Vec<Mm> = row_offsets(&next.row_spacings)
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| *idx != row && *idx != mirror)
        .map(|(_, offset)| offset)
        .collect();
    next.row_spacings = spacings_from_offsets(&offsets);
    next.active_rows = requested;
    Ok(next)
}

/// Regenerates a uniform layout with `rows` rows, discarding per-gap edits.
pub fn set_row_count(config: &RowConfiguration, rows: usize, table: &ConstraintTable) -> Mutation {
    let mut next = config.clone();
    if next.front_wheel.requires_even_rows() && rows % 2 == 1 {
        return Err(Refusal::OddRowCount { rows });
    }
    if rows > table.max_active_rows {
        return Err(Refusal::TooManyRows {
            requested: rows,
            max: table.max_active_rows,
        });
    }
    let spacings = uniform_spacings(rows, next.row_distance);
    check_span(span_of(&spacings), next.seed_size, table)?;
    next.active_rows = rows;
    next.row_spacings = spacings;
    Ok(next)
}

/// Sets the nominal row distance and regenerates uniform gaps from it.
pub fn set_row_distance(config: &RowConfiguration, distance: Mm, table: &ConstraintTable) -> RowConfiguration {
    let mut next = config.clone();
    let min = next.min_row_distance(table);
    let gaps = next.gap_count() as Mm;
    let max = if gaps > 0 {
        floor_to_step(table.max_row_span(next.seed_size) / gaps, table.row_drag_step).max(min)
    } else {
        table.max_row_span(next.seed_size).max(min)
    };
    next.row_distance = distance.max(min).min(max);
    next.row_spacings = uniform_spacings(next.active_rows, next.row_distance);
    next
}

/// Switches seed size, widening every gap below the new minimum.
pub fn set_seed_size(config: &RowConfiguration, seed_size: SeedSize, table: &ConstraintTable) -> Mutation {
    let mut next = config.clone().normalized();
    next.seed_size = seed_size;
    let min = table.min_row_distance(seed_size);
    next.row_distance = next.row_distance.max(min);
    for gap in next.row_spacings.iter_mut() {
        *gap = (*gap).max(min);
    }
    if next.row_span() > table.max_row_span(seed_size) {
        let uniform = uniform_spacings(next.active_rows, next.row_distance);
        check_span(span_of(&uniform), seed_size, table)?;
        next.row_spacings = uniform;
    }
    Ok(next)
}

/// Switches the front wheel arrangement, fixing the row parity if needed.
pub fn set_front_wheel(
    config: &RowConfiguration,
    front_wheel: FrontWheelKind,
    table: &ConstraintTable,
) -> Mutation {
    let mut next = config.clone().normalized();
    next.front_wheel = front_wheel;
    if !front_wheel.requires_even_rows() || next.active_rows % 2 == 0 {
        return Ok(next);
    }
    let rows = next.active_rows;
    set_row_count(&next, rows + 1, table).or_else(|_| set_row_count(&next, rows - 1, table))
}

pub fn set_wheel_spacing(config: &RowConfiguration, spacing: Mm, table: &ConstraintTable) -> RowConfiguration {
    let mut next = config.clone();
    next.wheel_spacing = table.clamp_wheel_spacing(spacing);
    next
}

pub fn set_plant_spacing(config: &RowConfiguration, spacing: Mm, table: &ConstraintTable) -> RowConfiguration {
    let mut next = config.clone();
    next.plant_spacing = spacing
        .max(table.min_plant_spacing)
        .min(table.max_plant_spacing.max(table.min_plant_spacing));
    next
}

/// Stores a manual working width, or clears the override when the value
/// matches what pattern mode already gives.
pub fn set_working_width(config: &RowConfiguration, width: Mm, table: &ConstraintTable) -> RowConfiguration {
    let mut next = config.clone().normalized();
    next.width_mode = manual_width_mode(&next, width, table);
    next
}

pub fn set_width_mode(config: &RowConfiguration, mode: WidthMode, table: &ConstraintTable) -> RowConfiguration {
    match mode {
        WidthMode::Manual { width } => set_working_width(config, width, table),
        mode => {
            let mut next = config.clone();
            next.width_mode = mode;
            next
        }
    }
}
