//! RGBA color plugin with alpha-only fades.

use super::ValuePlugin;
use crate::interp::functions::{add_n, offset_lerp_n, scale_n, sub_n};

/// Linear RGBA tweens. With `alpha_only` set, only alpha is written; RGB is
/// left to whatever else drives it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColorPlugin {
    pub alpha_only: bool,
}

impl ColorPlugin {
    pub fn alpha_only() -> Self {
        Self { alpha_only: true }
    }
}

impl ValuePlugin for ColorPlugin {
    type Value = [f32; 4];
    type Stored = [f32; 4];

    fn name(&self) -> &'static str {
        "color"
    }

    fn to_stored(&self, value: [f32; 4]) -> [f32; 4] {
        value
    }

    fn to_value(&self, stored: &[f32; 4]) -> [f32; 4] {
        *stored
    }

    fn add(&self, a: &[f32; 4], b: &[f32; 4]) -> [f32; 4] {
        add_n(a, b)
    }

    fn subtract(&self, a: &[f32; 4], b: &[f32; 4]) -> [f32; 4] {
        sub_n(a, b)
    }

    fn scale(&self, a: &[f32; 4], k: f32) -> [f32; 4] {
        scale_n(a, k)
    }

    fn resolve_end(&self, start: &[f32; 4], end: &[f32; 4], relative: bool) -> [f32; 4] {
        let out = if relative { add_n(start, end) } else { *end };
        if self.alpha_only {
            [start[0], start[1], start[2], out[3]]
        } else {
            out
        }
    }

    fn is_partial(&self) -> bool {
        self.alpha_only
    }

    fn merge(&self, current: [f32; 4], value: [f32; 4]) -> [f32; 4] {
        if self.alpha_only {
            [current[0], current[1], current[2], value[3]]
        } else {
            value
        }
    }

    fn interpolate(&self, start: &[f32; 4], change: &[f32; 4], eased: f32) -> [f32; 4] {
        offset_lerp_n(start, change, eased)
    }
}
