use std::path::Path;

use crate::model::{Mm, RowConfiguration, WidthMode};

/// Saved files with more rows than this are rejected before any layout work.
pub const MAX_SAVED_ROWS: usize = 256;
/// Largest absolute length, in millimetres, a saved file may carry.
pub const MAX_SAVED_LENGTH: Mm = 100_000;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read saved configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed saved configuration: {0}")]
    Malformed(#[from] json5::Error),
    #[error("saved configuration field `{field}` is out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },
}

/// Parses a saved configuration. Comments and trailing commas are accepted;
/// stale spacings are regenerated.
///
/// Only physically meaningless values are rejected here. Anything else that
/// breaks the constraint table is left for the validator to report.
pub fn parse_row_configuration(text: &str) -> Result<RowConfiguration, ImportError> {
    let config: RowConfiguration = json5::from_str(text)?;
    check_ranges(&config)?;
    Ok(config.normalized())
}

fn check_ranges(config: &RowConfiguration) -> Result<(), ImportError> {
    for (field, count) in [
        ("activeRows", config.active_rows),
        ("rowSpacings", config.row_spacings.len()),
    ] {
        if count > MAX_SAVED_ROWS {
            return Err(ImportError::OutOfRange {
                field,
                value: i64::try_from(count).unwrap_or(i64::MAX),
            });
        }
    }

    let mut lengths = vec![
        ("rowDistance", config.row_distance),
        ("wheelSpacing", config.wheel_spacing),
        ("plantSpacing", config.plant_spacing),
    ];
    if let WidthMode::Manual { width } = config.width_mode {
        lengths.push(("widthMode.width", width));
    }
    lengths.extend(config.row_spacings.iter().map(|gap| ("rowSpacings", *gap)));

    match lengths
        .into_iter()
        .find(|(_, value)| value.unsigned_abs() > MAX_SAVED_LENGTH.unsigned_abs())
    {
        Some((field, value)) => Err(ImportError::OutOfRange {
            field,
            value: i64::from(value),
        }),
        None => Ok(()),
    }
}

pub fn load_row_configuration(path: &Path) -> Result<RowConfiguration, ImportError> {
    let text = std::fs::read_to_string(path)?;
    parse_row_configuration(&text)
}
