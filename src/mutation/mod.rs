//! Interactive editing of a [`RowConfiguration`].
//!
//! Every mutation maps one configuration to the next in a single step. Values
//! out of range are clamped, structurally impossible requests are refused
//! with a [`Refusal`] and leave the configuration untouched.

mod edit;
mod gesture;
mod structure;

pub use edit::{NumericField, TextEdit, field_command, field_value, format_length, parse_length};
pub use gesture::{DragTarget, Gesture, WheelSide, drag_row, drag_wheel, drag_working_width};
pub use structure::{
    InsertTarget, Mutation, insert_row_pair, max_gap, remove_row_pair, set_front_wheel, set_gap,
    set_plant_spacing, set_row_count, set_row_distance, set_seed_size, set_wheel_spacing,
    set_width_mode, set_working_width,
};

use crate::config::{Config, ConstraintTable};
use crate::layout::wheels::suggest_wheel_spacing;
use crate::layout::{RowLayout, derive_layout, geometry::row_positions, validate};
use crate::model::{FrontWheelKind, Mm, RowConfiguration, SeedSize, WidthMode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Refusal {
    #[error("{requested} rows would exceed the maximum of {max}")]
    TooManyRows { requested: usize, max: usize },
    #[error("{requested} rows is below the minimum of {min} for this front wheel")]
    TooFewRows { requested: usize, min: usize },
    #[error("a single centred front wheel needs an even row count, not {rows}")]
    OddRowCount { rows: usize },
    #[error("row span {span} mm would exceed the toolbeam limit of {max} mm")]
    ToolbeamExceeded { span: Mm, max: Mm },
    #[error("gap {index} is {gap} mm; splitting it needs at least {needed} mm")]
    GapTooNarrow { index: usize, gap: Mm, needed: Mm },
    #[error("there is no gap {index}")]
    NoSuchGap { index: usize },
    #[error("there is no row {row}")]
    NoSuchRow { row: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    InsertRowPair(InsertTarget),
    RemoveRowPair(usize),
    SetRowCount(usize),
    SetRowDistance(Mm),
    SetGap { index: usize, value: Mm },
    SetWheelSpacing(Mm),
    SetWorkingWidth(Mm),
    SetPlantSpacing(Mm),
    SetSeedSize(SeedSize),
    SetFrontWheel(FrontWheelKind),
    SetWidthMode(WidthMode),
    OptimizeWheelSpacing,
    Reset,
    Load(RowConfiguration),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The command was valid but produced the same configuration.
    Unchanged,
    Refused(Refusal),
    /// Typed text did not parse as a length; nothing was applied.
    InvalidInput { field: NumericField, text: String },
}

/// Applies one discrete command to `config`.
pub fn apply_command(
    config: &RowConfiguration,
    command: &Command,
    defaults: &RowConfiguration,
    table: &ConstraintTable,
) -> Mutation {
    match command {
        Command::InsertRowPair(target) => insert_row_pair(config, *target, table),
        Command::RemoveRowPair(row) => remove_row_pair(config, *row),
        Command::SetRowCount(rows) => set_row_count(config, *rows, table),
        Command::SetRowDistance(distance) => Ok(set_row_distance(config, *distance, table)),
        Command::SetGap { index, value } => set_gap(config, *index, *value, table),
        Command::SetWheelSpacing(spacing) => Ok(set_wheel_spacing(config, *spacing, table)),
        Command::SetWorkingWidth(width) => Ok(set_working_width(config, *width, table)),
        Command::SetPlantSpacing(spacing) => Ok(set_plant_spacing(config, *spacing, table)),
        Command::SetSeedSize(size) => set_seed_size(config, *size, table),
        Command::SetFrontWheel(kind) => set_front_wheel(config, *kind, table),
        Command::SetWidthMode(mode) => Ok(set_width_mode(config, *mode, table)),
        Command::OptimizeWheelSpacing => {
            let positions = row_positions(&config.row_spacings, config.active_rows);
            let suggestion = suggest_wheel_spacing(config.wheel_spacing, &positions, table);
            Ok(set_wheel_spacing(config, suggestion.spacing, table))
        }
        Command::Reset => Ok(defaults.clone()),
        Command::Load(loaded) => Ok(loaded.clone().normalized()),
    }
}

/// The single writer of the current configuration.
///
/// At most one drag and one text edit are active at a time. Readers take the
/// configuration or a freshly derived [`RowLayout`] after each call.
#[derive(Debug, Clone)]
pub struct Configurator {
    config: RowConfiguration,
    defaults: RowConfiguration,
    table: ConstraintTable,
    gesture: Option<Gesture>,
    edit: Option<TextEdit>,
}

impl Default for Configurator {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Passes configured defaults through the same rules as any other edit, so
/// the initial state and every reset satisfy the layout invariants.
fn conform_defaults(defaults: &RowConfiguration, table: &ConstraintTable) -> RowConfiguration {
    if defaults.active_rows <= table.max_active_rows {
        let normalized = defaults.clone().normalized();
        if validate(&normalized, table).valid {
            return clamp_scalars(&normalized, table);
        }
    }

    // Row counts are rebuilt without parity rules first; set_front_wheel then
    // fixes the parity the same way a user switch would.
    let empty = RowConfiguration {
        active_rows: 0,
        row_spacings: Vec::new(),
        front_wheel: FrontWheelKind::FourWheel,
        ..defaults.clone()
    };
    let empty = set_row_distance(&empty, defaults.row_distance, table);
    let rebuilt = set_row_count(&empty, defaults.active_rows, table)
        .and_then(|next| set_front_wheel(&next, defaults.front_wheel, table));
    match rebuilt {
        Ok(next) => {
            tracing::warn!(
                rows = next.active_rows,
                "configured defaults break the constraint table; adjusted"
            );
            clamp_scalars(&next, table)
        }
        Err(refusal) => {
            tracing::warn!(%refusal, "configured defaults rejected; using built-in defaults");
            let fallback = RowConfiguration::default();
            if validate(&fallback, table).valid {
                clamp_scalars(&fallback, table)
            } else {
                clamp_scalars(&RowConfiguration { front_wheel: defaults.front_wheel, ..empty }, table)
            }
        }
    }
}

fn clamp_scalars(config: &RowConfiguration, table: &ConstraintTable) -> RowConfiguration {
    let next = set_wheel_spacing(config, config.wheel_spacing, table);
    let next = set_plant_spacing(&next, next.plant_spacing, table);
    set_width_mode(&next, next.width_mode, table)
}

impl Configurator {
    pub fn new(config: Config) -> Self {
        let defaults = conform_defaults(&config.defaults, &config.constraints);
        Self {
            config: defaults.clone(),
            defaults,
            table: config.constraints,
            gesture: None,
            edit: None,
        }
    }

    pub fn configuration(&self) -> &RowConfiguration {
        &self.config
    }

    pub fn constraints(&self) -> &ConstraintTable {
        &self.table
    }

    pub fn layout(&self) -> RowLayout {
        derive_layout(&self.config, &self.table)
    }

    pub fn apply(&mut self, command: Command) -> Outcome {
        self.gesture = None;
        match apply_command(&self.config, &command, &self.defaults, &self.table) {
            Ok(next) => {
                if matches!(command, Command::Load(_)) {
                    let report = validate(&next, &self.table);
                    if let Some(reason) = report.reason() {
                        tracing::warn!(%reason, "loaded configuration fails validation");
                    }
                }
                self.commit(next, &command)
            }
            Err(refusal) => {
                tracing::debug!(?command, %refusal, "mutation refused");
                Outcome::Refused(refusal)
            }
        }
    }

    fn commit(&mut self, next: RowConfiguration, command: &Command) -> Outcome {
        if next == self.config {
            return Outcome::Unchanged;
        }
        tracing::debug!(
            ?command,
            rows = next.active_rows,
            span = next.row_span(),
            "mutation applied"
        );
        self.config = next;
        Outcome::Applied
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Starts a drag; any drag already in progress is committed first.
    pub fn begin_drag(&mut self, target: DragTarget, pointer_x: f64) {
        if self.gesture.is_some() {
            self.end_drag();
        }
        tracing::debug!(drag = ?target, pointer_x, "drag started");
        self.gesture = Some(Gesture::begin(&self.config, target, pointer_x));
    }

    /// Recomputes the configuration for the current pointer position.
    /// Returns false when no drag is active.
    pub fn drag_to(&mut self, pointer_x: f64) -> bool {
        let Some(gesture) = &self.gesture else {
            return false;
        };
        self.config = gesture.resolve(pointer_x, &self.table);
        true
    }

    pub fn end_drag(&mut self) {
        if let Some(gesture) = self.gesture.take() {
            tracing::debug!(drag = ?gesture.target(), "drag ended");
        }
    }

    /// Restores the configuration from before the drag.
    pub fn cancel_drag(&mut self) {
        if let Some(gesture) = self.gesture.take() {
            tracing::debug!(drag = ?gesture.target(), "drag cancelled");
            self.config = gesture.snapshot().clone();
        }
    }

    pub fn begin_edit(&mut self, field: NumericField) -> &TextEdit {
        self.edit.insert(TextEdit::new(field, &self.config, &self.table))
    }

    pub fn set_edit_text(&mut self, text: impl Into<String>) {
        if let Some(edit) = &mut self.edit {
            edit.text = text.into();
        }
    }

    pub fn editing(&self) -> Option<&TextEdit> {
        self.edit.as_ref()
    }

    /// Applies the typed value. Unparseable text is dropped, the field keeps
    /// its previous value and the text comes back in the outcome.
    pub fn commit_edit(&mut self) -> Outcome {
        let Some(edit) = self.edit.take() else {
            return Outcome::Unchanged;
        };
        match edit.command() {
            Some(command) => self.apply(command),
            None => {
                tracing::debug!(field = ?edit.field, text = %edit.text, "discarding unparseable input");
                Outcome::InvalidInput {
                    field: edit.field,
                    text: edit.text,
                }
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }
}
