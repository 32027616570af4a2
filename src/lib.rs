#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod import;
pub mod layout;
pub mod layout_dump;
pub mod model;
pub mod mutation;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, ConstraintTable, load_config};
pub use import::{ImportError, load_row_configuration, parse_row_configuration};
pub use layout::{RowLayout, Validation, ValidationIssue, derive_layout, validate};
pub use model::{FrontWheelKind, Mm, RowConfiguration, SeedSize, WidthMode};
pub use mutation::{Command, Configurator, DragTarget, InsertTarget, Outcome, Refusal, WheelSide};
