use backdrop_core::PointerNdc;
use backdrop_scene::{build_scene, SceneConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// One frame of each preset, pointer moving in a slow circle
fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_tick");

    for (name, config) in [
        ("cyber", SceneConfig::cyber()),
        ("minimal", SceneConfig::minimal()),
    ] {
        let mut scene = match build_scene(&config.with_seed(1)) {
            Ok(scene) => scene,
            Err(err) => panic!("preset {name} failed to build: {err}"),
        };
        let mut frame = 0u32;

        group.bench_with_input(BenchmarkId::from_parameter(name), &name, |b, _| {
            b.iter(|| {
                frame = frame.wrapping_add(1);
                let t = frame as f32 / 60.0;
                let pointer = PointerNdc::new(t.cos() * 0.5, t.sin() * 0.5);
                scene.tick(black_box(t), Some(pointer));
            })
        });
    }

    group.finish();
}

/// Building and serializing a frame snapshot
fn bench_snapshot(c: &mut Criterion) {
    let mut config = SceneConfig::cyber().with_seed(1);
    config.starfield.count = 500;
    let Ok(mut scene) = build_scene(&config) else {
        return;
    };
    scene.tick(1.0, None);

    c.bench_function("frame_snapshot_json", |b| {
        b.iter(|| black_box(scene.frame().to_json()))
    });
}

/// Particle clouds of increasing size following the pointer
fn bench_follow_pointer(c: &mut Criterion) {
    let mut group = c.benchmark_group("follow_pointer");

    for count in [100usize, 1_000, 10_000] {
        let mut config = SceneConfig::minimal().with_seed(3);
        config.particles[0].count = count;
        config.starfield.enabled = false;
        let Ok(mut scene) = build_scene(&config) else {
            continue;
        };

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| scene.tick(black_box(0.5), Some(PointerNdc::new(0.3, -0.2))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tick, bench_snapshot, bench_follow_pointer);
criterion_main!(benches);
