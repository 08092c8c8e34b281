//! Value plugins: per-type interpolation contract used by [`crate::Tweener`].
//!
//! A plugin owns its options (axis constraint, snapping, rotation mode, path
//! geometry...) and defines the arithmetic needed by the tweener:
//! - `to_stored` / `to_value` convert between the accessor type and the
//!   representation used for start, end and change
//! - `add` / `subtract` / `scale` provide relative ends, change values and
//!   incremental loop offsets
//! - `interpolate` maps eased progress to an output value
//!
//! Value types without a plugin are rejected by the type system; the dynamic
//! [`DynamicPlugin`] reports [`crate::TweenError::PluginMismatch`] instead.

use std::fmt;

use crate::Result;

pub mod color;
pub mod dynamic;
pub mod keyframes;
pub mod numeric;
pub mod path;
pub mod rotation;
pub mod vector;

pub use color::ColorPlugin;
pub use dynamic::DynamicPlugin;
pub use keyframes::{Keyframe, KeyframePlugin};
pub use numeric::{FloatPlugin, IntPlugin};
pub use path::{Path, PathPlugin, PathType};
pub use rotation::{QuatPlugin, RotateMode, RotationPlugin};
pub use vector::{AxisConstraint, Vector2Plugin, Vector3Plugin, Vector4Plugin, VectorPlugin};

/// Interpolation contract for one value type.
pub trait ValuePlugin: 'static {
    /// Type exchanged with the caller's accessor.
    type Value: 'static;
    /// Representation of start, end and change values.
    type Stored: Clone + fmt::Debug + 'static;

    fn name(&self) -> &'static str;

    /// Check plugin options. Called when the tweener is built.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Check a caller-supplied end or start value.
    fn check_stored(&self, _value: &Self::Stored) -> Result<()> {
        Ok(())
    }

    fn to_stored(&self, value: Self::Value) -> Self::Stored;
    fn to_value(&self, stored: &Self::Stored) -> Self::Value;

    fn add(&self, a: &Self::Stored, b: &Self::Stored) -> Self::Stored;
    fn subtract(&self, a: &Self::Stored, b: &Self::Stored) -> Self::Stored;
    fn scale(&self, a: &Self::Stored, k: f32) -> Self::Stored;

    /// One-time setup once the start value is known.
    fn prepare(&mut self, _start: &Self::Stored, _relative: bool) {}

    /// Absolute end value, given the captured start.
    fn resolve_end(
        &self,
        start: &Self::Stored,
        end: &Self::Stored,
        relative: bool,
    ) -> Self::Stored {
        if relative {
            self.add(start, end)
        } else {
            end.clone()
        }
    }

    fn change(&self, start: &Self::Stored, end: &Self::Stored) -> Self::Stored {
        self.subtract(end, start)
    }

    /// Start of cycle `cycles` for incremental loops.
    fn advance(&self, start: &Self::Stored, change: &Self::Stored, cycles: u32) -> Self::Stored {
        if cycles == 0 {
            start.clone()
        } else {
            self.add(start, &self.scale(change, cycles as f32))
        }
    }

    /// True when the plugin owns only part of the value (one axis, alpha); the
    /// tweener then reads the accessor each render and [`Self::merge`]s into it.
    fn is_partial(&self) -> bool {
        false
    }

    /// Write the owned channels of `value` into `current`.
    fn merge(&self, _current: Self::Value, value: Self::Value) -> Self::Value {
        value
    }

    /// Value at eased progress `eased` (not clamped; overshooting eases pass through).
    fn interpolate(&self, start: &Self::Stored, change: &Self::Stored, eased: f32) -> Self::Value {
        self.to_value(&self.add(start, &self.scale(change, eased)))
    }
}

/// Types with a default plugin, usable with [`crate::shortcuts::to`].
pub trait Tweenable: Sized + 'static {
    type Plugin: ValuePlugin<Value = Self, Stored = Self> + Default;
}

impl Tweenable for f32 {
    type Plugin = FloatPlugin;
}

impl Tweenable for i32 {
    type Plugin = IntPlugin;
}

impl Tweenable for [f32; 2] {
    type Plugin = Vector2Plugin;
}

impl Tweenable for [f32; 3] {
    type Plugin = Vector3Plugin;
}

impl Tweenable for [f32; 4] {
    type Plugin = Vector4Plugin;
}
