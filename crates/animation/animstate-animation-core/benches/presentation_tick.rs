use std::sync::Arc;

use animstate_animation_core::{
    Config, EntityId, FrameOutputs, MapResolver, ObserverView, Outputs, PresentationSet,
    PresentationSynchronizer,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn beacon_vehicle() -> Arc<PresentationSet> {
    let json = animstate_test_fixtures::presentations::json("beacon-vehicle")
        .expect("load presentation fixture");
    let loaded = PresentationSet::from_json(&json).expect("parse presentation fixture");
    Arc::new(loaded.set)
}

fn driving_vars(tick: u64) -> MapResolver {
    MapResolver::new()
        .with("engine_running", 1.0)
        .with("throttle", (tick % 10) as f64 / 10.0)
        .with("rpm", 800.0 + (tick % 40) as f64 * 50.0)
        .with("horn", if tick % 17 == 0 { 1.0 } else { 0.0 })
        .with("beacon_lights", 1.0)
        .with("electric_power", 12.0)
        .with("gear", (tick % 4) as f64)
}

fn bench_tick(c: &mut Criterion) {
    let set = beacon_vehicle();
    let observer = ObserverView::default();
    let vars: Vec<MapResolver> = (0..64).map(driving_vars).collect();

    c.bench_function("tick_64_entities", |b| {
        let mut syncs: Vec<PresentationSynchronizer> = (0..64)
            .map(|i| {
                let cfg = Config {
                    log_unknown_variables: false,
                    ..Config::default()
                };
                let mut sync = PresentationSynchronizer::new(EntityId(i), cfg);
                sync.activate(Arc::clone(&set), 0);
                sync
            })
            .collect();
        let mut out = Outputs::default();
        let mut tick = 0u64;
        b.iter(|| {
            tick += 1;
            out.clear();
            for sync in syncs.iter_mut() {
                let resolver = &vars[(tick % 64) as usize];
                sync.tick(tick, resolver, &observer, &mut out);
            }
            black_box(&out);
        })
    });

    c.bench_function("frame_64_entities", |b| {
        let mut syncs: Vec<PresentationSynchronizer> = (0..64)
            .map(|i| {
                let mut sync = PresentationSynchronizer::new(EntityId(i), Config::default());
                sync.activate(Arc::clone(&set), 0);
                sync
            })
            .collect();
        let mut frame = FrameOutputs::default();
        b.iter(|| {
            frame.clear();
            for (i, sync) in syncs.iter_mut().enumerate() {
                sync.frame(0.5, &vars[i], &mut frame);
            }
            black_box(&frame);
        })
    });
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
