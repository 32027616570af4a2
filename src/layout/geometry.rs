use crate::config::ConstraintTable;
use crate::model::{FrontWheelKind, Mm};

use super::WheelPositions;
use super::spacing::span_of;

/// Lateral row positions centred on zero: the first row sits at `-span / 2`
/// and each following row adds the next gap.
pub fn row_positions(spacings: &[Mm], active_rows: usize) -> Vec<f64> {
    if active_rows == 0 {
        return Vec::new();
    }
    let span = span_of(spacings);
    let mut positions = Vec::with_capacity(active_rows);
    let mut current = -f64::from(span) / 2.0;
    positions.push(current);
    for gap in spacings.iter().take(active_rows - 1) {
        current += f64::from(*gap);
        positions.push(current);
    }
    positions
}

pub fn wheel_positions(wheel_spacing: Mm, front_wheel: FrontWheelKind) -> WheelPositions {
    let half = f64::from(wheel_spacing) / 2.0;
    WheelPositions {
        left: -half,
        right: half,
        front: match front_wheel {
            FrontWheelKind::ThreeWheel => Some(0.0),
            FrontWheelKind::FourWheel => None,
        },
    }
}

/// True when a row at `position` falls inside the tyre plus the proximity margin.
pub fn near_wheel(position: f64, wheel_center: f64, table: &ConstraintTable) -> bool {
    (position - wheel_center).abs() < table.wheel_clearance()
}

/// Advisory flags, one per row; never used to reject a layout.
pub fn proximity_flags(
    positions: &[f64],
    wheels: &WheelPositions,
    table: &ConstraintTable,
) -> Vec<bool> {
    positions
        .iter()
        .map(|pos| wheels.centers().any(|wheel| near_wheel(*pos, wheel, table)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_centred() {
        let positions = row_positions(&[300; 5], 6);
        assert_eq!(positions, vec![-750.0, -450.0, -150.0, 150.0, 450.0, 750.0]);
    }

    #[test]
    fn odd_span_produces_half_millimetres() {
        let positions = row_positions(&[155], 2);
        assert_eq!(positions, vec![-77.5, 77.5]);
    }

    #[test]
    fn single_and_empty_layouts() {
        assert_eq!(row_positions(&[], 1), vec![0.0]);
        assert!(row_positions(&[], 0).is_empty());
    }

    #[test]
    fn front_wheel_is_centred_only_for_three_wheel() {
        let three = wheel_positions(1800, FrontWheelKind::ThreeWheel);
        assert_eq!((three.left, three.right, three.front), (-900.0, 900.0, Some(0.0)));
        let four = wheel_positions(1800, FrontWheelKind::FourWheel);
        assert_eq!(four.front, None);
        assert_eq!(four.centers().count(), 2);
    }

    #[test]
    fn rows_near_wheels_are_flagged() {
        let table = ConstraintTable::default();
        // clearance is 100 + 50 = 150 mm
        let wheels = wheel_positions(1800, FrontWheelKind::ThreeWheel);
        let flags = proximity_flags(&[-750.0, -100.0, 149.0, 151.0, 760.0], &wheels, &table);
        assert_eq!(flags, vec![false, true, true, false, true]);
    }
}
