use gyro_space::{GyroSpace, GyroSpaceError, OrientationContext, Sensitivity};
use nalgebra::Vector3;

const COUPLING_FACTOR: f32 = 0.075;

/// Routes one gyro sample to the frame picked by a numeric selector
/// (1 = Local, 2 = Player, 3 = World), as an input loop would.
fn process_gyro_input(
    context: &mut OrientationContext,
    raw_gyro: Vector3<f32>,
    sensitivity: Sensitivity,
    mode: u8,
) -> Result<Vector3<f32>, GyroSpaceError> {
    let gravity = context.gravity();
    let output = match GyroSpace::try_from(mode)? {
        GyroSpace::Local => context.transform_local(
            raw_gyro.x,
            raw_gyro.y,
            raw_gyro.z,
            sensitivity,
            COUPLING_FACTOR,
        ),
        GyroSpace::Player => {
            context.transform_player(raw_gyro.x, raw_gyro.y, raw_gyro.z, gravity, sensitivity)
        }
        GyroSpace::World => {
            context.transform_world(raw_gyro.x, raw_gyro.y, raw_gyro.z, gravity, sensitivity)
        }
    };
    Ok(output)
}

fn main() {
    env_logger::init();

    let mut context = OrientationContext::new();

    // replace with actual gyro (yaw, pitch, roll) data
    let raw_gyro = Vector3::new(10.0, 5.0, 3.0);
    let sensitivity = Sensitivity::new(1.0, 1.0, 1.0);

    for mode in [1, 2, 3, 4] {
        let transformed = process_gyro_input(&mut context, raw_gyro, sensitivity, mode)
            .unwrap_or_else(|err| {
                println!("Error: {err}");
                Vector3::zeros()
            });

        println!(
            "Mode {}: X: {:.3}, Y: {:.3}, Z: {:.3}",
            mode, transformed.x, transformed.y, transformed.z
        );
    }

    // Dynamic orientation picks the frame itself
    let dynamic = context.transform_dynamic(
        raw_gyro.x,
        raw_gyro.y,
        raw_gyro.z,
        sensitivity,
        COUPLING_FACTOR,
    );
    println!(
        "Dynamic: X: {:.3}, Y: {:.3}, Z: {:.3}",
        dynamic.x, dynamic.y, dynamic.z
    );
}
