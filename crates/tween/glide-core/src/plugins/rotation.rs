//! Rotation plugins.
//!
//! [`RotationPlugin`] drives a quaternion accessor through Euler angles in
//! degrees, so multi-turn rotations are expressible. [`QuatPlugin`] blends
//! quaternions directly along the shortest arc.

use serde::{Deserialize, Serialize};

use super::ValuePlugin;
use crate::interp::functions::{
    add_n, euler_to_quat, nlerp_quat, normalize4, offset_lerp_n, quat_conjugate, quat_mul,
    quat_pow, quat_to_euler, scale_n, sub_n, wrap_degrees,
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotateMode {
    /// Each axis takes the short way round (at most 180 degrees).
    #[default]
    Fast,
    /// Raw Euler difference; 0 -> 720 spins twice.
    FastBeyond360,
}

/// Quaternion accessor animated through Euler angles (`R = Rz * Ry * Rx`, degrees).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationPlugin {
    pub mode: RotateMode,
}

impl RotationPlugin {
    pub fn new(mode: RotateMode) -> Self {
        Self { mode }
    }
}

impl ValuePlugin for RotationPlugin {
    type Value = [f32; 4];
    type Stored = [f32; 3];

    fn name(&self) -> &'static str {
        "rotation"
    }

    fn to_stored(&self, value: [f32; 4]) -> [f32; 3] {
        quat_to_euler(value)
    }

    fn to_value(&self, stored: &[f32; 3]) -> [f32; 4] {
        euler_to_quat(*stored)
    }

    fn add(&self, a: &[f32; 3], b: &[f32; 3]) -> [f32; 3] {
        add_n(a, b)
    }

    fn subtract(&self, a: &[f32; 3], b: &[f32; 3]) -> [f32; 3] {
        sub_n(a, b)
    }

    fn scale(&self, a: &[f32; 3], k: f32) -> [f32; 3] {
        scale_n(a, k)
    }

    fn change(&self, start: &[f32; 3], end: &[f32; 3]) -> [f32; 3] {
        let raw = sub_n(end, start);
        match self.mode {
            RotateMode::Fast => raw.map(wrap_degrees),
            RotateMode::FastBeyond360 => raw,
        }
    }

    fn interpolate(&self, start: &[f32; 3], change: &[f32; 3], eased: f32) -> [f32; 4] {
        euler_to_quat(offset_lerp_n(start, change, eased))
    }
}

/// Direct quaternion tweens. The change value is the delta rotation
/// `conj(start) * end`; relative ends compose as `start * end`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct QuatPlugin;

impl ValuePlugin for QuatPlugin {
    type Value = [f32; 4];
    type Stored = [f32; 4];

    fn name(&self) -> &'static str {
        "quaternion"
    }

    fn to_stored(&self, value: [f32; 4]) -> [f32; 4] {
        normalize4(value)
    }

    fn to_value(&self, stored: &[f32; 4]) -> [f32; 4] {
        *stored
    }

    fn add(&self, a: &[f32; 4], b: &[f32; 4]) -> [f32; 4] {
        normalize4(quat_mul(*a, *b))
    }

    fn subtract(&self, a: &[f32; 4], b: &[f32; 4]) -> [f32; 4] {
        normalize4(quat_mul(quat_conjugate(*b), *a))
    }

    fn scale(&self, a: &[f32; 4], k: f32) -> [f32; 4] {
        quat_pow(*a, k)
    }

    fn resolve_end(&self, start: &[f32; 4], end: &[f32; 4], relative: bool) -> [f32; 4] {
        if relative {
            self.add(start, end)
        } else {
            normalize4(*end)
        }
    }

    fn interpolate(&self, start: &[f32; 4], change: &[f32; 4], eased: f32) -> [f32; 4] {
        let end = quat_mul(*start, *change);
        nlerp_quat(*start, end, eased)
    }
}
