use serde::Serialize;

use crate::config::ConstraintTable;
use crate::model::{Mm, RowConfiguration};

use super::spacing::{is_mirror_symmetric, mirror_index};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ValidationIssue {
    #[error(
        "row span {span} mm plus the minimum pass spacing {min_distance} mm exceeds the toolbeam limit of {max_span} mm"
    )]
    ToolbeamExceeded {
        span: Mm,
        min_distance: Mm,
        max_span: Mm,
    },
    #[error("{rows} active rows exceed the maximum of {max}")]
    TooManyRows { rows: usize, max: usize },
    #[error("a single centred front wheel needs an even row count, got {rows}")]
    OddRowsWithCentredFrontWheel { rows: usize },
    #[error("expected {expected} row gaps, found {actual}")]
    StaleSpacings { expected: usize, actual: usize },
    #[error("row gaps are not mirror-symmetric (gap {index} differs from gap {mirror})")]
    Asymmetric { index: usize, mirror: usize },
    #[error("row gap {index} is {gap} mm, below the {min} mm minimum for this seed size")]
    GapBelowMinimum { index: usize, gap: Mm, min: Mm },
    #[error("wheel spacing {spacing} mm is outside {min}..={max} mm")]
    WheelSpacingOutOfRange { spacing: Mm, min: Mm, max: Mm },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Validation {
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
    /// Whether the "add row" affordance should be offered.
    pub can_add_row: bool,
}

impl Validation {
    /// Message shown to the user for the first failing rule.
    pub fn reason(&self) -> Option<String> {
        self.issues.first().map(ToString::to_string)
    }
}

/// Checks a configuration against the constraint table. Never fails; every
/// broken rule is collected into the report.
pub fn validate(config: &RowConfiguration, table: &ConstraintTable) -> Validation {
    let mut issues = Vec::new();
    let min_distance = config.min_row_distance(table);
    let span = config.row_span();

    if span.saturating_add(min_distance) > table.max_toolbeam_span {
        issues.push(ValidationIssue::ToolbeamExceeded {
            span,
            min_distance,
            max_span: table.max_toolbeam_span,
        });
    }
    if config.active_rows > table.max_active_rows {
        issues.push(ValidationIssue::TooManyRows {
            rows: config.active_rows,
            max: table.max_active_rows,
        });
    }
    if config.front_wheel.requires_even_rows() && config.active_rows % 2 == 1 {
        issues.push(ValidationIssue::OddRowsWithCentredFrontWheel {
            rows: config.active_rows,
        });
    }
    if config.has_stale_spacings() {
        issues.push(ValidationIssue::StaleSpacings {
            expected: config.gap_count(),
            actual: config.row_spacings.len(),
        });
    } else if !is_mirror_symmetric(&config.row_spacings) {
        let len = config.row_spacings.len();
        let index = (0..len)
            .find(|idx| config.row_spacings[*idx] != config.row_spacings[mirror_index(len, *idx)])
            .unwrap_or(0);
        issues.push(ValidationIssue::Asymmetric {
            index,
            mirror: mirror_index(len, index),
        });
    }
    if let Some((index, gap)) = config
        .row_spacings
        .iter()
        .enumerate()
        .find(|(_, gap)| **gap < min_distance)
    {
        issues.push(ValidationIssue::GapBelowMinimum {
            index,
            gap: *gap,
            min: min_distance,
        });
    }
    if config.wheel_spacing < table.min_wheel_spacing
        || config.wheel_spacing > table.max_wheel_spacing
    {
        issues.push(ValidationIssue::WheelSpacingOutOfRange {
            spacing: config.wheel_spacing,
            min: table.min_wheel_spacing,
            max: table.max_wheel_spacing,
        });
    }

    let valid = issues.is_empty();
    Validation {
        valid,
        can_add_row: valid && config.active_rows.saturating_add(2) <= table.max_active_rows,
        issues,
    }
}
