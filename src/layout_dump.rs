use crate::layout::RowLayout;
use crate::model::{Mm, RowConfiguration};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Flat view of a derived layout for external renderers and pricing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub configuration: RowConfiguration,
    pub rows: Vec<RowDump>,
    pub row_span: Mm,
    pub pass_spacing: Mm,
    pub working_width: Mm,
    pub wheels: WheelDump,
    pub passive_rows: PassiveDump,
    pub valid: bool,
    pub reason: Option<String>,
    pub can_add_row: bool,
    pub suggested_wheel_spacing: Mm,
    pub wheel_spacing_optimal: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowDump {
    pub index: usize,
    pub x: f64,
    pub near_wheel: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelDump {
    pub left: f64,
    pub right: f64,
    pub front: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassiveDump {
    pub inner: usize,
    pub outer: usize,
    pub positions: Vec<f64>,
}

impl LayoutDump {
    pub fn from_layout(layout: &RowLayout, config: &RowConfiguration) -> Self {
        let rows = layout
            .row_positions
            .iter()
            .zip(&layout.proximity)
            .enumerate()
            .map(|(index, (x, near))| RowDump {
                index,
                x: *x,
                near_wheel: *near,
            })
            .collect();

        LayoutDump {
            configuration: config.clone(),
            rows,
            row_span: layout.row_span,
            pass_spacing: layout.pass_spacing(),
            working_width: layout.working_width(),
            wheels: WheelDump {
                left: layout.wheels.left,
                right: layout.wheels.right,
                front: layout.wheels.front,
            },
            passive_rows: PassiveDump {
                inner: layout.passive.inner,
                outer: layout.passive.outer,
                positions: layout.passive.positions.clone(),
            },
            valid: layout.validation.valid,
            reason: layout.validation.reason(),
            can_add_row: layout.validation.can_add_row,
            suggested_wheel_spacing: layout.wheel_suggestion.spacing,
            wheel_spacing_optimal: layout.wheel_suggestion.already_optimal,
        }
    }
}

pub fn write_layout_dump(
    path: Option<&Path>,
    layout: &RowLayout,
    config: &RowConfiguration,
) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout, config);
    match path {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(writer, &dump)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, &dump)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConstraintTable;
    use crate::layout::derive_layout;

    #[test]
    fn dump_serializes_renderer_fields() {
        let config = RowConfiguration::default();
        let layout = derive_layout(&config, &ConstraintTable::default());
        let value = serde_json::to_value(LayoutDump::from_layout(&layout, &config)).unwrap();
        assert_eq!(value["rowSpan"], 1500);
        assert_eq!(value["workingWidth"], 1800);
        assert_eq!(value["rows"].as_array().unwrap().len(), 6);
        assert_eq!(value["rows"][0]["x"], -750.0);
        assert_eq!(value["wheels"]["front"], 0.0);
        assert_eq!(value["configuration"]["widthMode"]["mode"], "pattern");
        assert_eq!(value["reason"], serde_json::Value::Null);
    }
}
