use serde::{Deserialize, Serialize};

use crate::config::ConstraintTable;
use crate::layout::spacing::{span_of, uniform_spacings};

/// Lengths are stored as whole millimetres.
pub type Mm = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedSize {
    Small,
    Large,
}

impl SeedSize {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "small" | "s" => Some(Self::Small),
            "large" | "l" => Some(Self::Large),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrontWheelKind {
    /// One front wheel on the lateral centreline.
    ThreeWheel,
    /// Two front wheels tracking the rear wheels.
    FourWheel,
}

impl FrontWheelKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "three-wheel" | "3-wheel" | "3" | "single" => Some(Self::ThreeWheel),
            "four-wheel" | "4-wheel" | "4" | "dual" => Some(Self::FourWheel),
            _ => None,
        }
    }

    pub fn requires_even_rows(self) -> bool {
        matches!(self, Self::ThreeWheel)
    }

    /// Fewest rows a configuration may be reduced to by pair removal.
    pub fn min_rows(self) -> usize {
        match self {
            Self::ThreeWheel => 2,
            Self::FourWheel => 1,
        }
    }
}

/// How the distance to the next pass is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum WidthMode {
    #[default]
    Pattern,
    FollowWheels,
    Manual { width: Mm },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowConfiguration {
    pub seed_size: SeedSize,
    pub active_rows: usize,
    pub row_distance: Mm,
    #[serde(default)]
    pub row_spacings: Vec<Mm>,
    pub wheel_spacing: Mm,
    pub front_wheel: FrontWheelKind,
    #[serde(default)]
    pub width_mode: WidthMode,
    pub plant_spacing: Mm,
}

impl Default for RowConfiguration {
    fn default() -> Self {
        Self::uniform(SeedSize::Small, 6, 300)
    }
}

impl RowConfiguration {
    pub fn uniform(seed_size: SeedSize, active_rows: usize, row_distance: Mm) -> Self {
        Self {
            seed_size,
            active_rows,
            row_distance,
            row_spacings: uniform_spacings(active_rows, row_distance),
            wheel_spacing: 1800,
            front_wheel: FrontWheelKind::ThreeWheel,
            width_mode: WidthMode::Pattern,
            plant_spacing: 150,
        }
    }

    pub fn gap_count(&self) -> usize {
        self.active_rows.saturating_sub(1)
    }

    pub fn has_stale_spacings(&self) -> bool {
        self.row_spacings.len() != self.gap_count()
    }

    /// Regenerates the spacing sequence when its length no longer matches the row count.
    pub fn normalized(mut self) -> Self {
        if self.has_stale_spacings() {
            self.row_spacings = uniform_spacings(self.active_rows, self.row_distance);
        }
        self
    }

    pub fn row_span(&self) -> Mm {
        span_of(&self.row_spacings)
    }

    pub fn min_row_distance(&self, table: &ConstraintTable) -> Mm {
        table.min_row_distance(self.seed_size)
    }
}
