//! Replays recorded controller motion through the gyro space pipeline
//!
//! Each sample updates the gravity estimate and is then transformed with
//! dynamic orientation, so the output switches from player space to world
//! space as the controller is tipped flat.
//!
//! Features demonstrated:
//! - Gravity fusion from accelerometer and gyroscope
//! - Custom settings configuration
//! - Smoothed tilt factor monitoring
//! - Plots of gravity, tilt and camera deltas
//!
//! Run with: `cargo run --example replay`

use gyro_space::{GyroSpaceSettings, OrientationContext, Sensitivity, TransformSettings};
use nalgebra::Vector3;
use plotters::coord::types::RangedCoordf32;
use plotters::prelude::*;
use serde::Deserialize;
use std::error::Error;

#[derive(Debug, Deserialize)]
struct SensorData {
    #[serde(rename = "Time (s)")]
    time: f32,
    #[serde(rename = "Gyroscope X (deg/s)")]
    gyro_x: f32,
    #[serde(rename = "Gyroscope Y (deg/s)")]
    gyro_y: f32,
    #[serde(rename = "Gyroscope Z (deg/s)")]
    gyro_z: f32,
    #[serde(rename = "Accelerometer X (g)")]
    accel_x: f32,
    #[serde(rename = "Accelerometer Y (g)")]
    accel_y: f32,
    #[serde(rename = "Accelerometer Z (g)")]
    accel_z: f32,
}

struct TickOutput {
    gravity: Vector3<f32>,
    tilt: f32,
    delta: Vector3<f32>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    println!("Gyro space replay - dynamic orientation over recorded motion");

    let mut reader = csv::Reader::from_path("testdata/controller_motion.csv")?;
    let mut sensor_data = Vec::new();
    for result in reader.deserialize() {
        let record: SensorData = result?;
        sensor_data.push(record);
    }

    let settings = GyroSpaceSettings {
        transform: TransformSettings {
            coupling_factor: 0.075,
            ..Default::default()
        },
        sensitivity: Sensitivity::new(1.0, 1.0, 1.0),
        fusion_factor: 0.05,
    };
    let mut context = OrientationContext::with_settings(settings);

    println!("Processing {} sensor samples...", sensor_data.len());

    let mut outputs = Vec::with_capacity(sensor_data.len());
    let mut previous_time = 0.0;
    for (i, data) in sensor_data.iter().enumerate() {
        let delta_time = data.time - previous_time;
        previous_time = data.time;

        // Angle turned this tick, in degrees for the transforms and radians for fusion
        let gyro_delta = Vector3::new(data.gyro_x, data.gyro_y, data.gyro_z) * delta_time;
        let accelerometer = Vector3::new(data.accel_x, data.accel_y, data.accel_z);

        let gyro_rotation = gyro_delta.map(f32::to_radians);
        if let Err(err) = context.update_gravity_default(accelerometer, gyro_rotation) {
            println!("Sample {}: gravity update rejected: {}", i, err);
        }

        let delta = context.transform_dynamic(
            gyro_delta.y,
            gyro_delta.x,
            gyro_delta.z,
            settings.sensitivity,
            settings.transform.coupling_factor,
        );

        let output = TickOutput {
            gravity: context.gravity(),
            tilt: context.smoothed_tilt(),
            delta,
        };

        if i % 100 == 0 {
            println!(
                "Sample {}: gravity=({:.2},{:.2},{:.2}) tilt={:.2} delta=({:.3},{:.3},{:.3})",
                i,
                output.gravity.x,
                output.gravity.y,
                output.gravity.z,
                output.tilt,
                output.delta.x,
                output.delta.y,
                output.delta.z
            );
        }
        outputs.push(output);
    }

    println!("Generating plots...");
    create_plots(&sensor_data, &outputs)?;
    println!("✓ Plots saved to gyro_space_plots.png");
    Ok(())
}

/// Three panels: gravity estimate, smoothed tilt, camera deltas
fn create_plots(sensor_data: &[SensorData], outputs: &[TickOutput]) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new("gyro_space_plots.png", (1200, 900)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((3, 1));

    let time_end = sensor_data.last().map(|d| d.time).unwrap_or(1.0);
    let time_range = 0.0f32..time_end;

    let mut gravity_chart = ChartBuilder::on(&panels[0])
        .caption("Gravity estimate", ("sans-serif", 20))
        .margin(5)
        .y_label_area_size(50)
        .build_cartesian_2d(time_range.clone(), -1.1f32..1.1f32)?;
    gravity_chart.configure_mesh().draw()?;
    draw_component(&mut gravity_chart, sensor_data, outputs, |o| o.gravity.x, "X", &RED)?;
    draw_component(&mut gravity_chart, sensor_data, outputs, |o| o.gravity.y, "Y", &GREEN)?;
    draw_component(&mut gravity_chart, sensor_data, outputs, |o| o.gravity.z, "Z", &BLUE)?;
    gravity_chart.configure_series_labels().draw()?;

    let mut tilt_chart = ChartBuilder::on(&panels[1])
        .caption("Smoothed tilt factor", ("sans-serif", 20))
        .margin(5)
        .y_label_area_size(50)
        .build_cartesian_2d(time_range.clone(), -0.1f32..1.1f32)?;
    tilt_chart.configure_mesh().draw()?;
    draw_component(&mut tilt_chart, sensor_data, outputs, |o| o.tilt, "Tilt", &MAGENTA)?;
    tilt_chart.configure_series_labels().draw()?;

    let delta_limit = outputs
        .iter()
        .flat_map(|o| o.delta.iter().copied())
        .fold(0.1f32, |acc, v| acc.max(v.abs()))
        * 1.1;
    let mut delta_chart = ChartBuilder::on(&panels[2])
        .caption("Camera delta (deg)", ("sans-serif", 20))
        .margin(5)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(time_range, -delta_limit..delta_limit)?;
    delta_chart.configure_mesh().x_desc("Time (s)").draw()?;
    draw_component(&mut delta_chart, sensor_data, outputs, |o| o.delta.x, "Yaw", &RED)?;
    draw_component(&mut delta_chart, sensor_data, outputs, |o| o.delta.y, "Pitch", &GREEN)?;
    draw_component(&mut delta_chart, sensor_data, outputs, |o| o.delta.z, "Roll", &BLUE)?;
    delta_chart.configure_series_labels().draw()?;

    root.present()?;
    Ok(())
}

fn draw_component(
    chart: &mut ChartContext<'_, BitMapBackend<'_>, Cartesian2d<RangedCoordf32, RangedCoordf32>>,
    sensor_data: &[SensorData],
    outputs: &[TickOutput],
    value: impl Fn(&TickOutput) -> f32,
    label: &str,
    color: &'static RGBColor,
) -> Result<(), Box<dyn Error>> {
    chart
        .draw_series(LineSeries::new(
            sensor_data
                .iter()
                .zip(outputs.iter())
                .map(|(d, o)| (d.time, value(o))),
            color,
        ))?
        .label(label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], color));
    Ok(())
}
