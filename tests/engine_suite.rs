use row_config_engine::layout::spacing::is_mirror_symmetric;
use row_config_engine::{
    Command, Configurator, ConstraintTable, DragTarget, InsertTarget, Outcome, RowConfiguration,
    SeedSize, WheelSide, WidthMode, derive_layout, load_config,
};

fn uniform_configurator(rows: usize) -> Configurator {
    let mut configurator = Configurator::default();
    configurator.apply(Command::Load(RowConfiguration::uniform(
        SeedSize::Small,
        rows,
        300,
    )));
    configurator
}

#[test]
fn scenario_a_uniform_six_rows() {
    let table = ConstraintTable::default();
    let config = RowConfiguration::uniform(SeedSize::Small, 6, 300);
    assert_eq!(config.row_spacings, vec![300, 300, 300, 300, 300]);
    let layout = derive_layout(&config, &table);
    assert_eq!(layout.row_span, 1500);
    assert_eq!(layout.working_width(), 1800);
    assert_eq!(layout.pass_spacing(), 300);
}

#[test]
fn scenario_b_insert_into_centre_gap() {
    let mut configurator = uniform_configurator(4);
    let original = configurator.configuration().row_spacings.clone();
    assert_eq!(
        configurator.apply(Command::InsertRowPair(InsertTarget::Gap(1))),
        Outcome::Applied
    );
    let config = configurator.configuration();
    assert_eq!(config.active_rows, 6);
    assert_eq!(config.row_spacings.len(), 5);
    assert_eq!(config.row_spacings[1..4].iter().sum::<i32>(), original[1]);
    assert_eq!(config.row_spacings[0], original[0]);
    assert_eq!(config.row_spacings[4], original[2]);
}

#[test]
fn scenario_c_remove_then_regenerate() {
    let mut configurator = uniform_configurator(6);
    let original = configurator.configuration().row_spacings.clone();
    assert_eq!(configurator.apply(Command::RemoveRowPair(1)), Outcome::Applied);
    assert_eq!(configurator.configuration().active_rows, 4);
    assert_eq!(configurator.apply(Command::SetRowCount(6)), Outcome::Applied);
    assert_eq!(configurator.configuration().row_spacings, original);
}

#[test]
fn scenario_d_wheel_drag_clamps_to_minimum() {
    let mut configurator = Configurator::default();
    let min = configurator.constraints().min_wheel_spacing;
    configurator.begin_drag(DragTarget::Wheel(WheelSide::Right), 500.0);
    configurator.drag_to(-50_000.0);
    configurator.end_drag();
    assert_eq!(configurator.configuration().wheel_spacing, min);
}

#[test]
fn insert_then_remove_keeps_total_span() {
    let mut configurator = uniform_configurator(4);
    configurator.apply(Command::SetGap { index: 0, value: 420 });
    let span = configurator.configuration().row_span();
    configurator.apply(Command::InsertRowPair(InsertTarget::Gap(0)));
    assert_eq!(configurator.configuration().active_rows, 6);
    configurator.apply(Command::RemoveRowPair(1));
    assert_eq!(configurator.configuration().active_rows, 4);
    assert_eq!(configurator.configuration().row_span(), span);
}

#[test]
fn width_mode_round_trip_is_idempotent() {
    let mut configurator = Configurator::default();
    configurator.apply(Command::SetWheelSpacing(2200));
    configurator.apply(Command::SetWidthMode(WidthMode::FollowWheels));
    let following = configurator.layout().working_width();
    assert_eq!(following, 2200);

    configurator.apply(Command::SetWidthMode(WidthMode::Pattern));
    assert_eq!(configurator.layout().working_width(), 1800);
    configurator.apply(Command::SetWidthMode(WidthMode::FollowWheels));
    assert_eq!(configurator.layout().working_width(), following);
}

#[test]
fn dragging_the_pass_boundary_back_to_pattern_clears_override() {
    let mut configurator = Configurator::default();
    configurator.begin_drag(DragTarget::WorkingWidth, 0.0);
    configurator.drag_to(120.0);
    assert_eq!(
        configurator.configuration().width_mode,
        WidthMode::Manual { width: 1920 }
    );
    configurator.drag_to(0.0);
    configurator.end_drag();
    assert_eq!(configurator.configuration().width_mode, WidthMode::Pattern);
}

#[test]
fn interactive_session_keeps_symmetry() {
    let mut configurator = uniform_configurator(6);
    configurator.begin_drag(DragTarget::Row(1), 0.0);
    for x in [-5.0, -17.0, -33.0, -61.0] {
        configurator.drag_to(x);
        assert!(is_mirror_symmetric(&configurator.configuration().row_spacings));
    }
    configurator.end_drag();
    configurator.apply(Command::InsertRowPair(InsertTarget::Gap(1)));
    configurator.apply(Command::InsertRowPair(InsertTarget::Edge));
    configurator.apply(Command::RemoveRowPair(2));
    let config = configurator.configuration();
    assert!(is_mirror_symmetric(&config.row_spacings));
    assert!(configurator.layout().validation.valid);
}

#[test]
fn imported_invalid_configuration_is_reported_not_corrupted() {
    let mut configurator = Configurator::default();
    let mut loaded = RowConfiguration::uniform(SeedSize::Large, 12, 280);
    loaded.wheel_spacing = 1200;
    configurator.apply(Command::Load(loaded.clone()));
    assert_eq!(configurator.configuration(), &loaded);
    let layout = configurator.layout();
    assert!(!layout.validation.valid);
    assert!(!layout.validation.can_add_row);
    assert!(layout.validation.reason().unwrap().contains("toolbeam"));
}

#[test]
fn configured_odd_defaults_start_and_reset_valid() {
    let path = std::env::temp_dir().join(format!("rowcfg-suite-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"defaults": {"activeRows": 5, "wheelSpacing": 9000}}"#).unwrap();
    let config = load_config(Some(&path)).unwrap();
    std::fs::remove_file(&path).ok();

    let mut configurator = Configurator::new(config);
    let start = configurator.configuration().clone();
    assert_eq!(start.active_rows, 6);
    assert_eq!(start.wheel_spacing, 3000);
    assert!(configurator.layout().validation.valid);

    configurator.apply(Command::RemoveRowPair(0));
    assert_eq!(configurator.apply(Command::Reset), Outcome::Applied);
    assert_eq!(configurator.configuration(), &start);
    assert!(configurator.layout().validation.valid);
}
