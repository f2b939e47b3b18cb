use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gyro_space::{GyroSpace, OrientationContext, Sensitivity, transform_local, transform_world};
use nalgebra::Vector3;
use rand::prelude::*;
use rand_pcg::Pcg64;
use std::f32::consts::PI;

// Pre-generated controller samples to keep RNG cost out of the measurement
struct PreGeneratedData {
    samples: Vec<(Vector3<f32>, Vector3<f32>)>,
    index: usize,
}

impl PreGeneratedData {
    fn new(count: usize, seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);
        let mut samples = Vec::with_capacity(count);

        for i in 0..count {
            let time = i as f32 * 0.004; // 250Hz controller report rate

            // Slow wrist tilt between upright and flat with aiming jitter on top
            let tilt = 0.5 * (1.0 + (time * 0.25 * 2.0 * PI).sin()) * 0.5 * PI;

            let accelerometer = Vector3::new(
                rng.random_range(-0.02..0.02),
                tilt.cos() + rng.random_range(-0.02..0.02),
                tilt.sin() + rng.random_range(-0.02..0.02),
            );

            let gyro_rotation = Vector3::new(
                0.01 * (time * 3.0).sin() + rng.random_range(-0.001..0.001),
                0.02 * (time * 1.7).cos() + rng.random_range(-0.001..0.001),
                0.005 * (time * 0.9).sin() + rng.random_range(-0.001..0.001),
            );

            samples.push((accelerometer, gyro_rotation));
        }

        Self { samples, index: 0 }
    }

    fn next(&mut self) -> (Vector3<f32>, Vector3<f32>) {
        let sample = self.samples[self.index];
        self.index = (self.index + 1) % self.samples.len();
        sample
    }
}

/// Benchmark one gravity fusion step
fn bench_update_gravity(c: &mut Criterion) {
    let mut context = OrientationContext::new();
    let mut data = PreGeneratedData::new(1000, 42);

    c.bench_function("update_gravity", |b| {
        b.iter(|| {
            let (accelerometer, gyro_rotation) = data.next();
            let _ = context.update_gravity(
                black_box(accelerometer),
                black_box(gyro_rotation),
                black_box(0.05),
            );
        })
    });
}

/// Benchmark the pure local space transform
fn bench_transform_local(c: &mut Criterion) {
    let sensitivity = Sensitivity::new(1.5, 1.0, 0.5);

    c.bench_function("transform_local", |b| {
        b.iter(|| {
            black_box(transform_local(
                black_box(10.0),
                black_box(5.0),
                black_box(3.0),
                sensitivity,
                black_box(0.075),
            ))
        })
    });
}

/// Benchmark the pure world space transform with a tilted gravity
fn bench_transform_world(c: &mut Criterion) {
    let gravity = Vector3::new(0.1, 0.6, 0.79);
    let sensitivity = Sensitivity::default();

    c.bench_function("transform_world", |b| {
        b.iter(|| {
            black_box(transform_world(
                black_box(10.0),
                black_box(5.0),
                black_box(3.0),
                black_box(gravity),
                sensitivity,
                black_box(0.4),
            ))
        })
    });
}

/// Benchmark dynamic orientation including tilt smoothing
fn bench_transform_dynamic(c: &mut Criterion) {
    let mut context = OrientationContext::new();
    let _ = context.set_gravity(0.0, 0.7, 0.7);

    c.bench_function("transform_dynamic", |b| {
        b.iter(|| {
            black_box(context.transform_dynamic(
                black_box(10.0),
                black_box(5.0),
                black_box(3.0),
                Sensitivity::default(),
                black_box(0.075),
            ))
        })
    });
}

/// Benchmark a full input tick: fuse sensors then transform
fn bench_full_tick(c: &mut Criterion) {
    let mut context = OrientationContext::new();
    let mut data = PreGeneratedData::new(1000, 7);

    c.bench_function("full_tick_100", |b| {
        b.iter(|| {
            for _ in 0..100 {
                let (accelerometer, gyro_rotation) = data.next();
                let _ = context.update_gravity_default(accelerometer, gyro_rotation);
                black_box(context.transform(
                    GyroSpace::World,
                    black_box(gyro_rotation.y),
                    black_box(gyro_rotation.x),
                    black_box(gyro_rotation.z),
                ));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_update_gravity,
    bench_transform_local,
    bench_transform_world,
    bench_transform_dynamic,
    bench_full_tick
);

criterion_main!(benches);
