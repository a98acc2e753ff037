//! Benchmarks for the CPU side of a frame: easing, tween queues, the
//! frame step, and section mesh tessellation.
#![allow(missing_docs)] // `criterion_group!` generates an undocumented fn

use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use scrollscene::animation::SectionAnimator;
use scrollscene::engine::frame::FrameStep;
use scrollscene::input::InputState;
use scrollscene::options::{MotionOptions, Options};
use scrollscene::scene::{Scene, SectionShape};
use scrollscene::util::clock::Clock;
use scrollscene::util::easing::EasingFunction;
use web_time::Instant;

fn scene() -> Scene {
    let options = Options::default();
    let mut rng = StdRng::seed_from_u64(7);
    Scene::build_with_rng(&options, options.material.color, &mut rng)
}

fn easing_benchmark(c: &mut Criterion) {
    let f = EasingFunction::QuadraticInOut;
    let _ = c.bench_function("quadratic_in_out_easing", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.3))));
    });
}

fn frame_step_benchmark(c: &mut Criterion) {
    let step = FrameStep::new(&MotionOptions::default());
    let input = InputState {
        scroll_y: 1200.0,
        ..InputState::default()
    };
    let mut scene = scene();
    let _ = c.bench_function("frame_step_advance", |b| {
        b.iter(|| step.advance(black_box(1.0 / 60.0), &input, 800.0, &mut scene));
    });
}

fn animator_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("animator_update");
    let motion = MotionOptions::default();

    for tweens in [1_usize, 10, 100] {
        let start = Instant::now();
        let mut scene = scene();
        let mut animator = SectionAnimator::new(scene.section_count(), &motion);
        for i in 0..tweens {
            animator.trigger(i % scene.section_count(), start);
        }
        let mut clock = Clock::starting_at(start);
        let step = FrameStep::new(&motion);
        let now = start + Duration::from_millis(500);

        let _ = group.bench_function(format!("{tweens}_tweens"), |b| {
            b.iter(|| {
                black_box(step.run(
                    &mut clock,
                    now,
                    &InputState::default(),
                    800.0,
                    &mut scene,
                    &mut animator,
                ))
            });
        });
    }
    group.finish();
}

fn tessellation_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("tessellate");
    for shape in SectionShape::LANDING {
        let _ = group.bench_function(shape.name(), |b| {
            b.iter(|| black_box(shape.build()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    easing_benchmark,
    frame_step_benchmark,
    animator_benchmark,
    tessellation_benchmark
);
criterion_main!(benches);
