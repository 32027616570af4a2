use crate::config::load_config;
use crate::import::load_row_configuration;
use crate::layout_dump::write_layout_dump;
use crate::model::{FrontWheelKind, SeedSize};
use crate::mutation::{Command, Configurator, NumericField, Outcome};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rowcfg", version, about = "Row layout calculator for multi-row field robots")]
pub struct Args {
    /// Saved row configuration (JSON5). Defaults are used if omitted.
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the layout dump. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Constraint table overrides (JSON)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Seed size class
    #[arg(short = 's', long = "seed-size", value_enum)]
    pub seed_size: Option<SeedSizeArg>,

    /// Front wheel arrangement
    #[arg(short = 'f', long = "front-wheel", value_enum)]
    pub front_wheel: Option<FrontWheelArg>,

    /// Regenerate a uniform layout with this many rows
    #[arg(short = 'r', long = "rows")]
    pub rows: Option<usize>,

    /// Uniform row distance, in cm unless suffixed (e.g. "30", "22,5", "300mm")
    #[arg(short = 'd', long = "row-distance")]
    pub row_distance: Option<String>,

    /// Rear wheel spacing, in cm unless suffixed
    #[arg(short = 'w', long = "wheel-spacing")]
    pub wheel_spacing: Option<String>,

    /// Manual working width, in cm unless suffixed
    #[arg(long = "working-width")]
    pub working_width: Option<String>,

    /// Derive the working width from the wheel spacing
    #[arg(long = "follow-wheels", conflicts_with = "working_width")]
    pub follow_wheels: bool,

    /// Move the rear wheels to the nearest spacing clear of all rows
    #[arg(long = "optimize-wheels")]
    pub optimize_wheels: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum SeedSizeArg {
    Small,
    Large,
}

impl From<SeedSizeArg> for SeedSize {
    fn from(arg: SeedSizeArg) -> Self {
        match arg {
            SeedSizeArg::Small => SeedSize::Small,
            SeedSizeArg::Large => SeedSize::Large,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum FrontWheelArg {
    ThreeWheel,
    FourWheel,
}

impl From<FrontWheelArg> for FrontWheelKind {
    fn from(arg: FrontWheelArg) -> Self {
        match arg {
            FrontWheelArg::ThreeWheel => FrontWheelKind::ThreeWheel,
            FrontWheelArg::FourWheel => FrontWheelKind::FourWheel,
        }
    }
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let mut configurator = Configurator::new(config);

    if let Some(path) = args.input.as_deref() {
        let saved = load_row_configuration(path)?;
        configurator.apply(Command::Load(saved));
    }

    let mut commands = Vec::new();
    if let Some(size) = args.seed_size {
        commands.push(Command::SetSeedSize(size.into()));
    }
    if let Some(kind) = args.front_wheel {
        commands.push(Command::SetFrontWheel(kind.into()));
    }
    for command in commands {
        report(configurator.apply(command));
    }

    if let Some(text) = args.row_distance.as_deref() {
        edit_field(&mut configurator, NumericField::RowDistance, text);
    }
    if let Some(rows) = args.rows {
        report(configurator.apply(Command::SetRowCount(rows)));
    }
    if let Some(text) = args.wheel_spacing.as_deref() {
        edit_field(&mut configurator, NumericField::WheelSpacing, text);
    }
    if args.optimize_wheels {
        report(configurator.apply(Command::OptimizeWheelSpacing));
    }
    if args.follow_wheels {
        report(configurator.apply(Command::SetWidthMode(
            crate::model::WidthMode::FollowWheels,
        )));
    }
    if let Some(text) = args.working_width.as_deref() {
        edit_field(&mut configurator, NumericField::WorkingWidth, text);
    }

    let layout = configurator.layout();
    if let Some(reason) = layout.validation.reason() {
        eprintln!("warning: {reason}");
    }
    write_layout_dump(args.output.as_deref(), &layout, configurator.configuration())
}

fn edit_field(configurator: &mut Configurator, field: NumericField, text: &str) {
    configurator.begin_edit(field);
    configurator.set_edit_text(text);
    report(configurator.commit_edit());
}

fn report(outcome: Outcome) {
    match outcome {
        Outcome::Refused(refusal) => eprintln!("warning: {refusal}"),
        Outcome::InvalidInput { field, text } => {
            eprintln!("warning: ignoring unparseable value {text:?} for {field:?}")
        }
        Outcome::Applied | Outcome::Unchanged => {}
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
