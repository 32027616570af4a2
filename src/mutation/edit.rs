use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ConstraintTable;
use crate::layout::working_width::resolve_pass_spacing;
use crate::model::{Mm, RowConfiguration};

use super::Command;

static LENGTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?)(\d+(?:[.,]\d*)?|[.,]\d+)\s*(mm|cm|m)?\s*$").unwrap()
});

/// Numeric fields the user can type into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    RowDistance,
    Gap(usize),
    WheelSpacing,
    WorkingWidth,
    PlantSpacing,
}

/// Parses a typed length into millimetres.
///
/// Bare numbers are centimetres. Both `.` and `,` work as the decimal
/// separator; an explicit `mm`, `cm` or `m` suffix overrides the unit.
pub fn parse_length(text: &str) -> Option<Mm> {
    let caps = LENGTH_RE.captures(text)?;
    let number: f64 = caps.get(2)?.as_str().replace(',', ".").parse().ok()?;
    let factor = match caps.get(3).map(|m| m.as_str()) {
        Some("mm") => 1.0,
        Some("m") => 1000.0,
        _ => 10.0,
    };
    let sign = if caps.get(1).is_some_and(|m| m.as_str() == "-") {
        -1.0
    } else {
        1.0
    };
    let value = (sign * number * factor).round();
    if !value.is_finite() || value.abs() > f64::from(Mm::MAX) {
        return None;
    }
    Some(value as Mm)
}

/// Centimetre text shown in a field, without trailing zeros.
pub fn format_length(value: Mm) -> String {
    if value % 10 == 0 {
        format!("{}", value / 10)
    } else {
        format!("{:.1}", f64::from(value) / 10.0)
    }
}

/// Current value of `field`, or `None` when it does not exist (a gap index
/// past the end).
pub fn field_value(field: NumericField, config: &RowConfiguration, table: &ConstraintTable) -> Option<Mm> {
    match field {
        NumericField::RowDistance => Some(config.row_distance),
        NumericField::Gap(idx) => config.row_spacings.get(idx).copied(),
        NumericField::WheelSpacing => Some(config.wheel_spacing),
        NumericField::WorkingWidth => Some(resolve_pass_spacing(config, table).working_width),
        NumericField::PlantSpacing => Some(config.plant_spacing),
    }
}

pub fn field_command(field: NumericField, value: Mm) -> Command {
    match field {
        NumericField::RowDistance => Command::SetRowDistance(value),
        NumericField::Gap(index) => Command::SetGap { index, value },
        NumericField::WheelSpacing => Command::SetWheelSpacing(value),
        NumericField::WorkingWidth => Command::SetWorkingWidth(value),
        NumericField::PlantSpacing => Command::SetPlantSpacing(value),
    }
}

/// Text being typed into a field; nothing is applied until it is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub field: NumericField,
    pub text: String,
}

impl TextEdit {
    pub fn new(field: NumericField, config: &RowConfiguration, table: &ConstraintTable) -> Self {
        let text = field_value(field, config, table)
            .map(format_length)
            .unwrap_or_default();
        Self { field, text }
    }

    /// Command for the typed text, or `None` if it does not parse.
    pub fn command(&self) -> Option<Command> {
        parse_length(&self.text).map(|value| field_command(self.field, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_decimal_separators() {
        assert_eq!(parse_length("30"), Some(300));
        assert_eq!(parse_length("30.5"), Some(305));
        assert_eq!(parse_length("30,5"), Some(305));
        assert_eq!(parse_length(" 22,25 "), Some(223));
        assert_eq!(parse_length(",5"), Some(5));
    }

    #[test]
    fn parses_unit_suffixes() {
        assert_eq!(parse_length("450 mm"), Some(450));
        assert_eq!(parse_length("1,8m"), Some(1800));
        assert_eq!(parse_length("-3cm"), Some(-30));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_length(""), None);
        assert_eq!(parse_length("abc"), None);
        assert_eq!(parse_length("3.0.1"), None);
        assert_eq!(parse_length("12 inches"), None);
        assert_eq!(parse_length("99999999999"), None);
    }

    #[test]
    fn formats_centimetres() {
        assert_eq!(format_length(300), "30");
        assert_eq!(format_length(305), "30.5");
    }

    #[test]
    fn text_edit_starts_from_current_value() {
        let table = ConstraintTable::default();
        let config = RowConfiguration::default();
        let edit = TextEdit::new(NumericField::WorkingWidth, &config, &table);
        assert_eq!(edit.text, "180");
        let edit = TextEdit::new(NumericField::Gap(9), &config, &table);
        assert_eq!(edit.text, "");
        assert_eq!(edit.command(), None);
    }
}
