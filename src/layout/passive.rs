use crate::config::ConstraintTable;
use crate::model::Mm;

use super::PassiveRows;

/// Passive rows that fit into a single gap.
///
/// A gap holds `floor(gap / unit) - 1` passive rows once it reaches twice the
/// passive unit; anything narrower holds none. The comparison is done on whole
/// millimetres so the threshold is exact.
pub fn passive_rows_in_gap(gap: Mm, unit: Mm) -> usize {
    let unit = unit.max(1);
    if gap < unit.saturating_mul(2) {
        return 0;
    }
    (gap / unit - 1) as usize
}

pub(super) fn compute_passive_rows(
    spacings: &[Mm],
    row_positions: &[f64],
    table: &ConstraintTable,
) -> PassiveRows {
    let per_gap: Vec<usize> = spacings
        .iter()
        .map(|gap| passive_rows_in_gap(*gap, table.passive_unit))
        .collect();
    let inner: usize = per_gap.iter().sum();
    let outer = usize::from(inner > 0);

    let mut positions = Vec::with_capacity(inner + outer);
    for (idx, (gap, count)) in spacings.iter().zip(&per_gap).enumerate() {
        let Some(left) = row_positions.get(idx) else {
            continue;
        };
        let step = f64::from(*gap) / (*count + 1) as f64;
        for slot in 1..=*count {
            positions.push(left + step * slot as f64);
        }
    }
    if outer > 0 {
        if let Some(last) = row_positions.last() {
            positions.push(last + f64::from(table.passive_unit));
        }
    }

    PassiveRows {
        per_gap,
        inner,
        outer,
        positions,
    }
}
