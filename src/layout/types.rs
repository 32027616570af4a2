use serde::Serialize;

use crate::model::{Mm, SeedSize, WidthMode};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WheelPositions {
    pub left: f64,
    pub right: f64,
    /// Present only for the single centred front wheel, always at 0.
    pub front: Option<f64>,
}

impl WheelPositions {
    pub fn centers(&self) -> impl Iterator<Item = f64> + '_ {
        [Some(self.left), Some(self.right), self.front]
            .into_iter()
            .flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PassiveRows {
    /// Passive rows riding in each gap, indexed like the spacing sequence.
    pub per_gap: Vec<usize>,
    pub inner: usize,
    /// Spare toolbeam slot reported beyond the last active row.
    pub outer: usize,
    pub positions: Vec<f64>,
}

impl PassiveRows {
    pub fn total(&self) -> usize {
        self.inner + self.outer
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PassSpacing {
    pub pass_spacing: Mm,
    pub working_width: Mm,
    pub mode: WidthMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WheelSuggestion {
    pub spacing: Mm,
    pub already_optimal: bool,
    /// False when no spacing in range keeps every wheel clear of the rows.
    pub clear: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PricingInput {
    pub active_rows: usize,
    pub seed_size: SeedSize,
    pub passive_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowLayout {
    pub row_positions: Vec<f64>,
    pub row_spacings: Vec<Mm>,
    pub row_span: Mm,
    pub wheels: WheelPositions,
    pub passive: PassiveRows,
    pub pass: PassSpacing,
    /// One flag per active row; set when the row sits close to a wheel.
    pub proximity: Vec<bool>,
    pub validation: super::validate::Validation,
    pub wheel_suggestion: WheelSuggestion,
    pub seed_size: SeedSize,
}

impl RowLayout {
    pub fn active_rows(&self) -> usize {
        self.row_positions.len()
    }

    pub fn working_width(&self) -> Mm {
        self.pass.working_width
    }

    pub fn pass_spacing(&self) -> Mm {
        self.pass.pass_spacing
    }

    pub fn has_proximity_warning(&self) -> bool {
        self.proximity.iter().any(|flag| *flag)
    }

    pub fn pricing(&self) -> PricingInput {
        PricingInput {
            active_rows: self.active_rows(),
            seed_size: self.seed_size,
            passive_rows: self.passive.total(),
        }
    }
}
