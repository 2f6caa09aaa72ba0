//! Angle wrapping helpers

use std::f32::consts::{PI, TAU};

/// Wrap `angle` into the half-open window `(center - PI, center + PI]`.
///
/// Picks the branch of `angle` closest to `center`, so a joint never winds
/// through a full turn when its parent spins.
pub fn wrap_around(angle: f32, center: f32) -> f32 {
    angle - TAU * ((angle - center) / TAU - 0.5).ceil()
}

/// Wrap `angle` into `(-PI, PI]`.
pub fn wrap_angle(angle: f32) -> f32 {
    wrap_around(angle, 0.0)
}

/// Signed shortest rotation that takes `from` onto `to`.
pub fn angle_diff(to: f32, from: f32) -> f32 {
    wrap_angle(to - from)
}

/// True when `angle` lies in `(center - PI, center + PI]`, allowing `epsilon` slack.
pub fn is_wrapped_around(angle: f32, center: f32, epsilon: f32) -> bool {
    angle > center - PI - epsilon && angle <= center + PI + epsilon
}
