//! Scalar plugins.

use super::ValuePlugin;

/// `f32` tweens, optionally snapped to whole numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FloatPlugin {
    pub snapping: bool,
}

impl FloatPlugin {
    pub fn snapped() -> Self {
        Self { snapping: true }
    }
}

impl ValuePlugin for FloatPlugin {
    type Value = f32;
    type Stored = f32;

    fn name(&self) -> &'static str {
        "float"
    }

    fn to_stored(&self, value: f32) -> f32 {
        value
    }

    fn to_value(&self, stored: &f32) -> f32 {
        *stored
    }

    fn add(&self, a: &f32, b: &f32) -> f32 {
        a + b
    }

    fn subtract(&self, a: &f32, b: &f32) -> f32 {
        a - b
    }

    fn scale(&self, a: &f32, k: f32) -> f32 {
        a * k
    }

    fn interpolate(&self, start: &f32, change: &f32, eased: f32) -> f32 {
        let v = start + change * eased;
        if self.snapping {
            v.round()
        } else {
            v
        }
    }
}

/// `i32` tweens; intermediate values are rounded to the nearest integer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IntPlugin;

impl ValuePlugin for IntPlugin {
    type Value = i32;
    type Stored = i32;

    fn name(&self) -> &'static str {
        "int"
    }

    fn to_stored(&self, value: i32) -> i32 {
        value
    }

    fn to_value(&self, stored: &i32) -> i32 {
        *stored
    }

    fn add(&self, a: &i32, b: &i32) -> i32 {
        a.wrapping_add(*b)
    }

    fn subtract(&self, a: &i32, b: &i32) -> i32 {
        a.wrapping_sub(*b)
    }

    fn scale(&self, a: &i32, k: f32) -> i32 {
        (*a as f32 * k).round() as i32
    }

    fn interpolate(&self, start: &i32, change: &i32, eased: f32) -> i32 {
        (*start as f32 + *change as f32 * eased).round() as i32
    }
}
