//! Fixed-size vector plugins with axis filtering and snapping.

use serde::{Deserialize, Serialize};

use super::ValuePlugin;
use crate::error::TweenError;
use crate::interp::functions::{add_n, offset_lerp_n, round_n, scale_n, sub_n};
use crate::Result;

/// Restricts a vector tween to one axis; the other axes are never written, so
/// concurrent tweens on different axes of one vector compose.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisConstraint {
    #[default]
    None,
    X,
    Y,
    Z,
    W,
}

impl AxisConstraint {
    #[inline]
    pub fn index(&self) -> Option<usize> {
        match self {
            AxisConstraint::None => None,
            AxisConstraint::X => Some(0),
            AxisConstraint::Y => Some(1),
            AxisConstraint::Z => Some(2),
            AxisConstraint::W => Some(3),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VectorPlugin<const N: usize> {
    pub axis: AxisConstraint,
    pub snapping: bool,
}

pub type Vector2Plugin = VectorPlugin<2>;
pub type Vector3Plugin = VectorPlugin<3>;
pub type Vector4Plugin = VectorPlugin<4>;

impl<const N: usize> VectorPlugin<N> {
    pub fn new() -> Self {
        Self {
            axis: AxisConstraint::None,
            snapping: false,
        }
    }

    pub fn with_axis(mut self, axis: AxisConstraint) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_snapping(mut self, snapping: bool) -> Self {
        self.snapping = snapping;
        self
    }
}

impl<const N: usize> ValuePlugin for VectorPlugin<N> {
    type Value = [f32; N];
    type Stored = [f32; N];

    fn name(&self) -> &'static str {
        match N {
            2 => "vector2",
            3 => "vector3",
            4 => "vector4",
            _ => "vector",
        }
    }

    fn validate(&self) -> Result<()> {
        match self.axis.index() {
            Some(i) if i >= N => Err(TweenError::invalid(format!(
                "axis constraint {:?} is outside a {N}-component vector",
                self.axis
            ))),
            _ => Ok(()),
        }
    }

    fn to_stored(&self, value: [f32; N]) -> [f32; N] {
        value
    }

    fn to_value(&self, stored: &[f32; N]) -> [f32; N] {
        *stored
    }

    fn add(&self, a: &[f32; N], b: &[f32; N]) -> [f32; N] {
        add_n(a, b)
    }

    fn subtract(&self, a: &[f32; N], b: &[f32; N]) -> [f32; N] {
        sub_n(a, b)
    }

    fn scale(&self, a: &[f32; N], k: f32) -> [f32; N] {
        scale_n(a, k)
    }

    fn resolve_end(&self, start: &[f32; N], end: &[f32; N], relative: bool) -> [f32; N] {
        let mut out = if relative { add_n(start, end) } else { *end };
        if let Some(keep) = self.axis.index() {
            for (i, c) in out.iter_mut().enumerate() {
                if i != keep {
                    *c = start[i];
                }
            }
        }
        out
    }

    fn is_partial(&self) -> bool {
        self.axis.index().is_some()
    }

    fn merge(&self, mut current: [f32; N], value: [f32; N]) -> [f32; N] {
        match self.axis.index() {
            Some(i) if i < N => {
                current[i] = value[i];
                current
            }
            _ => value,
        }
    }

    fn interpolate(&self, start: &[f32; N], change: &[f32; N], eased: f32) -> [f32; N] {
        let v = offset_lerp_n(start, change, eased);
        if self.snapping {
            round_n(&v)
        } else {
            v
        }
    }
}
