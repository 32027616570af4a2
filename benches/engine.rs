use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use row_config_engine::config::ConstraintTable;
use row_config_engine::layout::derive_layout;
use row_config_engine::model::{RowConfiguration, SeedSize};
use row_config_engine::mutation::{Configurator, DragTarget, WheelSide};
use std::hint::black_box;

fn alternating_configuration(rows: usize) -> RowConfiguration {
    let mut config = RowConfiguration::uniform(SeedSize::Small, rows, 200);
    for (idx, gap) in config.row_spacings.iter_mut().enumerate() {
        *gap = if idx % 2 == 0 { 150 } else { 250 };
    }
    let len = config.row_spacings.len();
    for idx in 0..len / 2 {
        config.row_spacings[len - 1 - idx] = config.row_spacings[idx];
    }
    config
}

fn bench_derive(c: &mut Criterion) {
    let table = ConstraintTable::default();
    let mut group = c.benchmark_group("derive_layout");
    for rows in [2usize, 6, 12] {
        let config = alternating_configuration(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &config, |b, config| {
            b.iter(|| derive_layout(black_box(config), black_box(&table)))
        });
    }
    group.finish();
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag");
    group.bench_function("row_drag_120_events", |b| {
        b.iter(|| {
            let mut configurator = Configurator::default();
            configurator.begin_drag(DragTarget::Row(1), 0.0);
            for step in 0..120 {
                configurator.drag_to(black_box(-(step as f64) * 1.7));
                black_box(configurator.layout());
            }
            configurator.end_drag();
        })
    });
    group.bench_function("wheel_drag_120_events", |b| {
        b.iter(|| {
            let mut configurator = Configurator::default();
            configurator.begin_drag(DragTarget::Wheel(WheelSide::Right), 0.0);
            for step in 0..120 {
                configurator.drag_to(black_box(step as f64 * 4.0));
                black_box(configurator.layout());
            }
            configurator.end_drag();
        })
    });
    group.finish();
}

criterion_group!(benches, bench_derive, bench_drag);
criterion_main!(benches);
