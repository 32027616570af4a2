use crate::config::ConstraintTable;
use crate::model::{Mm, RowConfiguration, WidthMode};

use super::PassSpacing;

/// Smallest `p` such that the sequence repeats with period `p`.
fn smallest_period(spacings: &[Mm]) -> usize {
    let len = spacings.len();
    (1..=len)
        .find(|p| (0..len - p).all(|idx| spacings[idx] == spacings[idx + p]))
        .unwrap_or(len)
}

/// Gap that continues the spacing pattern across the pass boundary.
///
/// A uniform sequence continues with its gap, an alternating `a,b,a` sequence
/// continues with `b`. Layouts without gaps fall back to `row_distance`.
pub fn pattern_pass_spacing(spacings: &[Mm], row_distance: Mm) -> Mm {
    if spacings.is_empty() {
        return row_distance;
    }
    let period = smallest_period(spacings);
    spacings[spacings.len() % period]
}

fn raw_pass_spacing(config: &RowConfiguration, span: Mm) -> Mm {
    match config.width_mode {
        WidthMode::FollowWheels => config.wheel_spacing.saturating_sub(span),
        WidthMode::Manual { width } => width.saturating_sub(span),
        WidthMode::Pattern => pattern_pass_spacing(&config.row_spacings, config.row_distance),
    }
}

fn clamp_pass(span: Mm, raw: Mm, min_distance: Mm, table: &ConstraintTable) -> (Mm, Mm) {
    let pass = raw.max(min_distance);
    let width = span
        .saturating_add(pass)
        .min(table.max_working_width)
        .max(span);
    (width.saturating_sub(span), width)
}

pub fn resolve_pass_spacing(config: &RowConfiguration, table: &ConstraintTable) -> PassSpacing {
    let span = config.row_span();
    let raw = raw_pass_spacing(config, span);
    let (pass_spacing, working_width) =
        clamp_pass(span, raw, config.min_row_distance(table), table);
    PassSpacing {
        pass_spacing,
        working_width,
        mode: config.width_mode,
    }
}

/// Working width pattern mode would produce for this configuration.
pub fn pattern_working_width(config: &RowConfiguration, table: &ConstraintTable) -> Mm {
    let span = config.row_span();
    let raw = pattern_pass_spacing(&config.row_spacings, config.row_distance);
    clamp_pass(span, raw, config.min_row_distance(table), table).1
}

/// Clamps a requested working width into what the layout allows.
pub fn clamp_working_width(config: &RowConfiguration, width: Mm, table: &ConstraintTable) -> Mm {
    let span = config.row_span();
    clamp_pass(span, width.saturating_sub(span), config.min_row_distance(table), table).1
}

/// Width mode for a manually requested working width.
///
/// Asking for exactly what pattern mode already yields clears the override.
pub fn manual_width_mode(config: &RowConfiguration, width: Mm, table: &ConstraintTable) -> WidthMode {
    let clamped = clamp_working_width(config, width, table);
    if clamped == pattern_working_width(config, table) {
        WidthMode::Pattern
    } else {
        WidthMode::Manual { width: clamped }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SeedSize;

    fn table() -> ConstraintTable {
        ConstraintTable::default()
    }

    #[test]
    fn uniform_pattern_continues_with_the_gap() {
        assert_eq!(pattern_pass_spacing(&[300; 5], 250), 300);
    }

    #[test]
    fn alternating_pattern_continues_the_alternation() {
        assert_eq!(pattern_pass_spacing(&[250, 500, 250, 500, 250], 300), 500);
        assert_eq!(pattern_pass_spacing(&[250, 500, 250], 300), 500);
    }

    #[test]
    fn irregular_pattern_repeats_its_period() {
        // period 4: 200, 300, 400, 300
        assert_eq!(pattern_pass_spacing(&[200, 300, 400, 300, 200], 300), 300);
    }

    #[test]
    fn empty_pattern_uses_row_distance() {
        assert_eq!(pattern_pass_spacing(&[], 320), 320);
    }

    #[test]
    fn pattern_mode_adds_one_uniform_gap() {
        let config = RowConfiguration::uniform(SeedSize::Small, 6, 300);
        let pass = resolve_pass_spacing(&config, &table());
        assert_eq!(pass.pass_spacing, 300);
        assert_eq!(pass.working_width, 1800);
    }

    #[test]
    fn follow_wheels_is_clamped_to_min_row_distance() {
        let mut config = RowConfiguration::uniform(SeedSize::Large, 6, 300);
        config.width_mode = WidthMode::FollowWheels;
        config.wheel_spacing = 1550;
        let pass = resolve_pass_spacing(&config, &table());
        assert_eq!(pass.pass_spacing, 100);
        assert_eq!(pass.working_width, 1600);

        config.wheel_spacing = 2400;
        let pass = resolve_pass_spacing(&config, &table());
        assert_eq!(pass.pass_spacing, 900);
        assert_eq!(pass.working_width, 2400);
    }

    #[test]
    fn manual_width_is_capped_at_maximum() {
        let mut config = RowConfiguration::uniform(SeedSize::Small, 6, 300);
        config.width_mode = WidthMode::Manual { width: 9000 };
        let pass = resolve_pass_spacing(&config, &table());
        assert_eq!(pass.working_width, 5000);
        assert_eq!(pass.pass_spacing, 3500);
    }

    #[test]
    fn manual_width_equal_to_pattern_clears_override() {
        let config = RowConfiguration::uniform(SeedSize::Small, 6, 300);
        assert_eq!(manual_width_mode(&config, 1800, &table()), WidthMode::Pattern);
        assert_eq!(
            manual_width_mode(&config, 2000, &table()),
            WidthMode::Manual { width: 2000 }
        );
        assert_eq!(
            manual_width_mode(&config, 1510, &table()),
            WidthMode::Manual { width: 1550 }
        );
    }

    #[test]
    fn extreme_requested_widths_clamp() {
        let config = RowConfiguration::uniform(SeedSize::Small, 6, 300);
        assert_eq!(clamp_working_width(&config, Mm::MIN, &table()), 1550);
        assert_eq!(clamp_working_width(&config, -2_147_483_647, &table()), 1550);
        assert_eq!(clamp_working_width(&config, Mm::MAX, &table()), 5000);

        let mut follow = config.clone();
        follow.width_mode = WidthMode::FollowWheels;
        follow.wheel_spacing = Mm::MIN;
        assert_eq!(resolve_pass_spacing(&follow, &table()).working_width, 1550);
    }
}
