pub mod geometry;
pub mod passive;
pub mod spacing;
pub(crate) mod types;
pub mod validate;
pub mod wheels;
pub mod working_width;
pub use types::*;
pub use validate::{Validation, ValidationIssue, validate};

use crate::config::ConstraintTable;
use crate::model::RowConfiguration;

use geometry::{proximity_flags, row_positions, wheel_positions};
use passive::compute_passive_rows;
use wheels::suggest_wheel_spacing;
use working_width::resolve_pass_spacing;

/// Derives every secondary quantity of a configuration from scratch.
///
/// Nothing is cached between calls; renderer and pricing read the result of
/// the latest call only. A configuration with stale spacings is laid out with
/// regenerated uniform gaps, while the validation report still names the
/// stored mismatch.
pub fn derive_layout(config: &RowConfiguration, table: &ConstraintTable) -> RowLayout {
    let validation = validate(config, table);
    let config = config.clone().normalized();

    let positions = row_positions(&config.row_spacings, config.active_rows);
    let wheels = wheel_positions(config.wheel_spacing, config.front_wheel);
    let passive = compute_passive_rows(&config.row_spacings, &positions, table);
    let pass = resolve_pass_spacing(&config, table);
    let proximity = proximity_flags(&positions, &wheels, table);
    let wheel_suggestion = suggest_wheel_spacing(config.wheel_spacing, &positions, table);

    RowLayout {
        row_span: config.row_span(),
        row_spacings: config.row_spacings,
        row_positions: positions,
        wheels,
        passive,
        pass,
        proximity,
        validation,
        wheel_suggestion,
        seed_size: config.seed_size,
    }
}
