use crate::model::Mm;

/// Uniform gap sequence for `rows` rows spaced `distance` apart.
pub fn uniform_spacings(rows: usize, distance: Mm) -> Vec<Mm> {
    vec![distance; rows.saturating_sub(1)]
}

pub fn mirror_index(len: usize, idx: usize) -> usize {
    len - 1 - idx
}

pub fn is_mirror_symmetric(spacings: &[Mm]) -> bool {
    let len = spacings.len();
    (0..len / 2).all(|idx| spacings[idx] == spacings[mirror_index(len, idx)])
}

/// Writes `value` into gap `idx` and its mirror in one step.
///
/// Every mutation that edits a single gap goes through here so the sequence
/// stays mirror-symmetric. Out-of-range indices leave the sequence untouched.
pub fn set_gap_mirrored(spacings: &mut [Mm], idx: usize, value: Mm) {
    let len = spacings.len();
    if idx >= len {
        return;
    }
    spacings[idx] = value;
    spacings[mirror_index(len, idx)] = value;
}

/// Number of distinct gaps written by [`set_gap_mirrored`] for `idx`.
pub fn mirrored_count(len: usize, idx: usize) -> usize {
    if idx < len && mirror_index(len, idx) == idx { 1 } else { 2 }
}

/// Sum of all gaps, saturating at the bounds of [`Mm`].
pub fn span_of(spacings: &[Mm]) -> Mm {
    spacings.iter().fold(0, |acc: Mm, gap| acc.saturating_add(*gap))
}

/// Offsets of every row measured from the first row.
pub fn row_offsets(spacings: &[Mm]) -> Vec<Mm> {
    let mut offsets = Vec::with_capacity(spacings.len() + 1);
    let mut acc: Mm = 0;
    offsets.push(acc);
    for gap in spacings {
        acc = acc.saturating_add(*gap);
        offsets.push(acc);
    }
    offsets
}

/// Inverse of [`row_offsets`]. Offsets must be sorted.
pub fn spacings_from_offsets(offsets: &[Mm]) -> Vec<Mm> {
    offsets
        .windows(2)
        .map(|pair| pair[1].saturating_sub(pair[0]))
        .collect()
}

/// Rounds `value` to the nearest multiple of `step`, halves away from zero.
///
/// Results outside the [`Mm`] range saturate; NaN rounds to zero.
pub fn round_to_step(value: f64, step: Mm) -> Mm {
    let step = f64::from(step.max(1));
    let rounded = (value / step).round() * step;
    if rounded.is_nan() {
        return 0;
    }
    rounded.clamp(f64::from(Mm::MIN), f64::from(Mm::MAX)) as Mm
}

pub fn floor_to_step(value: Mm, step: Mm) -> Mm {
    let step = step.max(1);
    value.div_euclid(step) * step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_has_one_gap_fewer_than_rows() {
        assert_eq!(uniform_spacings(6, 300), vec![300; 5]);
        assert!(uniform_spacings(1, 300).is_empty());
        assert!(uniform_spacings(0, 300).is_empty());
    }

    #[test]
    fn set_gap_mirrored_writes_both_sides() {
        let mut gaps = vec![300; 5];
        set_gap_mirrored(&mut gaps, 1, 420);
        assert_eq!(gaps, vec![300, 420, 300, 420, 300]);
        set_gap_mirrored(&mut gaps, 2, 200);
        assert_eq!(gaps, vec![300, 420, 200, 420, 300]);
        assert!(is_mirror_symmetric(&gaps));
    }

    #[test]
    fn set_gap_mirrored_ignores_out_of_range() {
        let mut gaps = vec![300; 3];
        set_gap_mirrored(&mut gaps, 7, 10);
        assert_eq!(gaps, vec![300; 3]);
    }

    #[test]
    fn mirrored_count_detects_centre_gap() {
        assert_eq!(mirrored_count(5, 2), 1);
        assert_eq!(mirrored_count(5, 1), 2);
        assert_eq!(mirrored_count(4, 1), 2);
    }

    #[test]
    fn offsets_round_trip() {
        let gaps = vec![250, 400, 250];
        let offsets = row_offsets(&gaps);
        assert_eq!(offsets, vec![0, 250, 650, 900]);
        assert_eq!(spacings_from_offsets(&offsets), gaps);
    }

    #[test]
    fn rounding_helpers() {
        assert_eq!(round_to_step(344.9, 10), 340);
        assert_eq!(round_to_step(345.0, 10), 350);
        assert_eq!(round_to_step(-26.0, 50), -50);
        assert_eq!(floor_to_step(333, 10), 330);
    }

    #[test]
    fn rounding_saturates_extreme_values() {
        assert_eq!(round_to_step(1e10, 10), Mm::MAX);
        assert_eq!(round_to_step(-1e10, 50), Mm::MIN);
        assert_eq!(round_to_step(f64::INFINITY, 10), Mm::MAX);
        assert_eq!(round_to_step(f64::NAN, 10), 0);
    }

    #[test]
    fn span_saturates_instead_of_overflowing() {
        assert_eq!(span_of(&[300, 400, 300]), 1000);
        assert_eq!(span_of(&[2_000_000_000, 2_000_000_000]), Mm::MAX);
        assert_eq!(row_offsets(&[Mm::MAX, 10]), vec![0, Mm::MAX, Mm::MAX]);
    }
}
