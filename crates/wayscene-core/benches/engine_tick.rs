use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use wayscene_core::{EngineConfig, PathAnimationEngine};
use wayscene_fixtures::capitals;

fn long_route_engine() -> PathAnimationEngine {
    let mut engine = PathAnimationEngine::new(EngineConfig::default());
    // 100 scenes by jittering the capitals route.
    let base = capitals();
    for i in 0..100 {
        let p = base[i % base.len()];
        engine.insert_at(
            i,
            wayscene_core::Waypoint::new(p.lat + (i as f64) * 0.01, p.lng),
        );
    }
    engine
}

fn bench_segment_traversal(c: &mut Criterion) {
    c.bench_function("segment_traversal_100_scenes", |b| {
        b.iter(|| {
            let mut engine = long_route_engine();
            engine.next(None);
            while engine.tick(0.05) {}
            black_box(engine.current_index())
        })
    });
}

criterion_group!(benches, bench_segment_traversal);
criterion_main!(benches);
