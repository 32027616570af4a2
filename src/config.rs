use crate::model::{Mm, RowConfiguration, SeedSize};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Physical limits of the robot and the fixed constants of the layout rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintTable {
    pub min_row_distance_small: Mm,
    pub min_row_distance_large: Mm,
    pub max_toolbeam_span: Mm,
    pub min_wheel_spacing: Mm,
    pub max_wheel_spacing: Mm,
    pub max_active_rows: usize,
    pub passive_unit: Mm,
    pub wheel_width: Mm,
    pub proximity_margin: Mm,
    pub row_drag_step: Mm,
    pub wheel_drag_step: Mm,
    pub wheel_search_step: Mm,
    pub max_working_width: Mm,
    pub min_plant_spacing: Mm,
    pub max_plant_spacing: Mm,
}

impl Default for ConstraintTable {
    fn default() -> Self {
        Self {
            min_row_distance_small: 50,
            min_row_distance_large: 100,
            max_toolbeam_span: 3000,
            min_wheel_spacing: 1500,
            max_wheel_spacing: 3000,
            max_active_rows: 12,
            passive_unit: 250,
            wheel_width: 200,
            proximity_margin: 50,
            row_drag_step: 10,
            wheel_drag_step: 50,
            wheel_search_step: 10,
            max_working_width: 5000,
            min_plant_spacing: 20,
            max_plant_spacing: 1000,
        }
    }
}

impl ConstraintTable {
    pub fn min_row_distance(&self, seed_size: SeedSize) -> Mm {
        match seed_size {
            SeedSize::Small => self.min_row_distance_small,
            SeedSize::Large => self.min_row_distance_large,
        }
    }

    pub fn clamp_wheel_spacing(&self, spacing: Mm) -> Mm {
        spacing.clamp(self.min_wheel_spacing, self.max_wheel_spacing.max(self.min_wheel_spacing))
    }

    /// Largest row span a layout may have for the given seed size.
    pub fn max_row_span(&self, seed_size: SeedSize) -> Mm {
        self.max_toolbeam_span
            .saturating_sub(self.min_row_distance(seed_size))
    }

    /// Distance from a wheel centre within which a row counts as too close.
    pub fn wheel_clearance(&self) -> f64 {
        f64::from(self.wheel_width) / 2.0 + f64::from(self.proximity_margin)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub constraints: ConstraintTable,
    pub defaults: RowConfiguration,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConstraintTableFile {
    min_row_distance_small: Option<Mm>,
    min_row_distance_large: Option<Mm>,
    max_toolbeam_span: Option<Mm>,
    min_wheel_spacing: Option<Mm>,
    max_wheel_spacing: Option<Mm>,
    max_active_rows: Option<usize>,
    passive_unit: Option<Mm>,
    wheel_width: Option<Mm>,
    proximity_margin: Option<Mm>,
    row_drag_step: Option<Mm>,
    wheel_drag_step: Option<Mm>,
    wheel_search_step: Option<Mm>,
    max_working_width: Option<Mm>,
    min_plant_spacing: Option<Mm>,
    max_plant_spacing: Option<Mm>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct DefaultsFile {
    seed_size: Option<String>,
    active_rows: Option<usize>,
    row_distance: Option<Mm>,
    wheel_spacing: Option<Mm>,
    front_wheel: Option<String>,
    plant_spacing: Option<Mm>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    constraints: Option<ConstraintTableFile>,
    defaults: Option<DefaultsFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(file) = parsed.constraints {
        let table = &mut config.constraints;
        if let Some(v) = file.min_row_distance_small {
            table.min_row_distance_small = v;
        }
        if let Some(v) = file.min_row_distance_large {
            table.min_row_distance_large = v;
        }
        if let Some(v) = file.max_toolbeam_span {
            table.max_toolbeam_span = v;
        }
        if let Some(v) = file.min_wheel_spacing {
            table.min_wheel_spacing = v;
        }
        if let Some(v) = file.max_wheel_spacing {
            table.max_wheel_spacing = v;
        }
        if let Some(v) = file.max_active_rows {
            table.max_active_rows = v;
        }
        if let Some(v) = file.passive_unit {
            table.passive_unit = v;
        }
        if let Some(v) = file.wheel_width {
            table.wheel_width = v;
        }
        if let Some(v) = file.proximity_margin {
            table.proximity_margin = v;
        }
        if let Some(v) = file.row_drag_step {
            table.row_drag_step = v;
        }
        if let Some(v) = file.wheel_drag_step {
            table.wheel_drag_step = v;
        }
        if let Some(v) = file.wheel_search_step {
            table.wheel_search_step = v;
        }
        if let Some(v) = file.max_working_width {
            table.max_working_width = v;
        }
        if let Some(v) = file.min_plant_spacing {
            table.min_plant_spacing = v;
        }
        if let Some(v) = file.max_plant_spacing {
            table.max_plant_spacing = v;
        }
    }
    sanitize_table(&mut config.constraints);

    if let Some(file) = parsed.defaults {
        let defaults = &mut config.defaults;
        if let Some(size) = file.seed_size.as_deref().and_then(SeedSize::from_token) {
            defaults.seed_size = size;
        }
        if let Some(kind) = file
            .front_wheel
            .as_deref()
            .and_then(crate::model::FrontWheelKind::from_token)
        {
            defaults.front_wheel = kind;
        }
        if let Some(v) = file.active_rows {
            defaults.active_rows = v;
        }
        if let Some(v) = file.row_distance {
            defaults.row_distance = v;
        }
        if let Some(v) = file.wheel_spacing {
            defaults.wheel_spacing = v;
        }
        if let Some(v) = file.plant_spacing {
            defaults.plant_spacing = v;
        }
        defaults.row_spacings.clear();
        // Oversized counts are left for the configurator to clamp.
        if defaults.active_rows <= config.constraints.max_active_rows {
            config.defaults = config.defaults.clone().normalized();
        }
    }

    Ok(config)
}

// Zero steps would stall the drag rounding and the wheel search.
fn sanitize_table(table: &mut ConstraintTable) {
    table.row_drag_step = table.row_drag_step.max(1);
    table.wheel_drag_step = table.wheel_drag_step.max(1);
    table.wheel_search_step = table.wheel_search_step.max(1);
    table.passive_unit = table.passive_unit.max(1);
    table.max_wheel_spacing = table.max_wheel_spacing.max(table.min_wheel_spacing);
    table.max_plant_spacing = table.max_plant_spacing.max(table.min_plant_spacing);
}
