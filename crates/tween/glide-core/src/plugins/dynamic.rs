//! Plugin over the dynamically typed [`Value`].
//!
//! The plugin is bound to the kind of the end value when it is built. Bool and
//! Text ends, or start values of another kind, are rejected with
//! `PluginMismatch`. If the accessor later returns a different kind the blend
//! prefers the left operand and logs a warning instead of failing mid-tick.

use super::ValuePlugin;
use crate::error::TweenError;
use crate::interp::functions::{
    add_n, nlerp_quat, normalize4, offset_lerp_n, quat_conjugate, quat_mul, quat_pow, scale_n,
    sub_n,
};
use crate::value::{Value, ValueKind};
use crate::Result;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DynamicPlugin {
    kind: ValueKind,
}

impl DynamicPlugin {
    pub fn for_kind(kind: ValueKind) -> Result<Self> {
        if !kind.is_interpolable() {
            return Err(TweenError::mismatch(
                "dynamic",
                format!("no interpolation plugin for {} values", kind.name()),
            ));
        }
        Ok(Self { kind })
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    fn binary(&self, a: &Value, b: &Value, op: Op) -> Value {
        match (a, b) {
            (Value::Float(x), Value::Float(y)) => Value::Float(match op {
                Op::Add => x + y,
                Op::Sub => x - y,
            }),
            (Value::Vec2(x), Value::Vec2(y)) => Value::Vec2(op.apply(x, y)),
            (Value::Vec3(x), Value::Vec3(y)) => Value::Vec3(op.apply(x, y)),
            (Value::Vec4(x), Value::Vec4(y)) => Value::Vec4(op.apply(x, y)),
            (Value::ColorRgba(x), Value::ColorRgba(y)) => Value::ColorRgba(op.apply(x, y)),
            (Value::Quat(x), Value::Quat(y)) => Value::Quat(match op {
                Op::Add => normalize4(quat_mul(*x, *y)),
                Op::Sub => normalize4(quat_mul(quat_conjugate(*y), *x)),
            }),
            _ => {
                tracing::warn!(
                    left = a.kind().name(),
                    right = b.kind().name(),
                    "dynamic tween value changed kind; holding left operand"
                );
                a.clone()
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Op {
    Add,
    Sub,
}

impl Op {
    fn apply<const N: usize>(self, a: &[f32; N], b: &[f32; N]) -> [f32; N] {
        match self {
            Op::Add => add_n(a, b),
            Op::Sub => sub_n(a, b),
        }
    }
}

impl ValuePlugin for DynamicPlugin {
    type Value = Value;
    type Stored = Value;

    fn name(&self) -> &'static str {
        "dynamic"
    }

    fn validate(&self) -> Result<()> {
        Self::for_kind(self.kind).map(|_| ())
    }

    fn check_stored(&self, value: &Value) -> Result<()> {
        if value.kind() == self.kind {
            Ok(())
        } else {
            Err(TweenError::mismatch(
                "dynamic",
                format!(
                    "expected a {} value, got {}",
                    self.kind.name(),
                    value.kind().name()
                ),
            ))
        }
    }

    fn to_stored(&self, value: Value) -> Value {
        value
    }

    fn to_value(&self, stored: &Value) -> Value {
        stored.clone()
    }

    fn add(&self, a: &Value, b: &Value) -> Value {
        self.binary(a, b, Op::Add)
    }

    fn subtract(&self, a: &Value, b: &Value) -> Value {
        self.binary(a, b, Op::Sub)
    }

    fn scale(&self, a: &Value, k: f32) -> Value {
        match a {
            Value::Float(x) => Value::Float(x * k),
            Value::Vec2(x) => Value::Vec2(scale_n(x, k)),
            Value::Vec3(x) => Value::Vec3(scale_n(x, k)),
            Value::Vec4(x) => Value::Vec4(scale_n(x, k)),
            Value::ColorRgba(x) => Value::ColorRgba(scale_n(x, k)),
            Value::Quat(x) => Value::Quat(quat_pow(*x, k)),
            other => other.clone(),
        }
    }

    fn interpolate(&self, start: &Value, change: &Value, eased: f32) -> Value {
        match (start, change) {
            (Value::Float(s), Value::Float(c)) => Value::Float(s + c * eased),
            (Value::Vec2(s), Value::Vec2(c)) => Value::Vec2(offset_lerp_n(s, c, eased)),
            (Value::Vec3(s), Value::Vec3(c)) => Value::Vec3(offset_lerp_n(s, c, eased)),
            (Value::Vec4(s), Value::Vec4(c)) => Value::Vec4(offset_lerp_n(s, c, eased)),
            (Value::ColorRgba(s), Value::ColorRgba(c)) => {
                Value::ColorRgba(offset_lerp_n(s, c, eased))
            }
            (Value::Quat(s), Value::Quat(c)) => {
                Value::Quat(nlerp_quat(*s, quat_mul(*s, *c), eased))
            }
            _ => start.clone(),
        }
    }
}
