//! Constructors pairing an accessor with the matching plugin.
//!
//! Every shortcut returns an unregistered playable; hand it to
//! [`crate::TweenEngine::add`] or nest it in a [`Sequence`].

use crate::accessor::Accessor;
use crate::ease::Ease;
use crate::error::TweenError;
use crate::generators::{punch_keyframes, shake_keyframes, ShakeOptions};
use crate::playable::TweenSettings;
use crate::plugins::{
    AxisConstraint, ColorPlugin, DynamicPlugin, KeyframePlugin, Path, PathPlugin, PathType,
    QuatPlugin, RotateMode, RotationPlugin, Tweenable, VectorPlugin,
};
use crate::sequence::Sequence;
use crate::tweener::Tweener;
use crate::value::Value;
use crate::Result;

/// Tween any [`Tweenable`] value with its default plugin.
pub fn to<T: Tweenable>(
    accessor: Accessor<T>,
    end: T,
    duration: f32,
) -> Result<Tweener<T::Plugin>> {
    Tweener::new(T::Plugin::default(), accessor, end, duration)
}

/// RGBA color fade.
pub fn to_color(
    accessor: Accessor<[f32; 4]>,
    end: [f32; 4],
    duration: f32,
) -> Result<Tweener<ColorPlugin>> {
    Tweener::new(ColorPlugin::default(), accessor, end, duration)
}

/// Fade only the alpha channel; RGB is never written.
pub fn to_alpha(
    accessor: Accessor<[f32; 4]>,
    alpha: f32,
    duration: f32,
) -> Result<Tweener<ColorPlugin>> {
    Tweener::new(ColorPlugin::alpha_only(), accessor, [0.0, 0.0, 0.0, alpha], duration)
}

/// Move a single component of a vector; the other components are left alone.
pub fn to_axis<const N: usize>(
    accessor: Accessor<[f32; N]>,
    axis: AxisConstraint,
    end: f32,
    duration: f32,
) -> Result<Tweener<VectorPlugin<N>>> {
    let mut target = [0.0; N];
    let slot = axis
        .index()
        .and_then(|i| target.get_mut(i))
        .ok_or_else(|| {
            TweenError::invalid(format!("{axis:?} is not an axis of a {N}-vector"))
        })?;
    *slot = end;
    Tweener::new(VectorPlugin::new().with_axis(axis), accessor, target, duration)
}

/// Rotate a quaternion accessor towards Euler angles in degrees.
pub fn rotate(
    accessor: Accessor<[f32; 4]>,
    euler_end: [f32; 3],
    duration: f32,
    mode: RotateMode,
) -> Result<Tweener<RotationPlugin>> {
    Tweener::new(RotationPlugin::new(mode), accessor, euler_end, duration)
}

/// Rotate along the shortest arc towards `end` (x, y, z, w).
pub fn rotate_quat(
    accessor: Accessor<[f32; 4]>,
    end: [f32; 4],
    duration: f32,
) -> Result<Tweener<QuatPlugin>> {
    if end.iter().all(|c| *c == 0.0) {
        return Err(TweenError::invalid("end rotation must be a non-zero quaternion"));
    }
    Tweener::new(QuatPlugin, accessor, end, duration)
}

/// Decaying pseudo-random shake around the start value.
pub fn shake(
    accessor: Accessor<[f32; 3]>,
    duration: f32,
    options: &ShakeOptions,
) -> Result<Tweener<KeyframePlugin>> {
    let plugin = KeyframePlugin::new(shake_keyframes(duration, options)?)?;
    Ok(Tweener::new(plugin, accessor, [0.0; 3], duration)?.with_ease(Ease::Linear))
}

/// Elastic push towards `direction` and back.
pub fn punch(
    accessor: Accessor<[f32; 3]>,
    direction: [f32; 3],
    duration: f32,
    vibrato: u32,
    elasticity: f32,
) -> Result<Tweener<KeyframePlugin>> {
    let plugin = KeyframePlugin::new(punch_keyframes(direction, duration, vibrato, elasticity)?)?;
    Ok(Tweener::new(plugin, accessor, [0.0; 3], duration)?.with_ease(Ease::Linear))
}

/// Follow `waypoints` from the captured start value, at constant speed.
pub fn path(
    accessor: Accessor<[f32; 3]>,
    waypoints: Vec<[f32; 3]>,
    duration: f32,
    kind: PathType,
    resolution: u32,
) -> Result<Tweener<PathPlugin>> {
    let path = Path::new(kind, waypoints, resolution)?;
    // The end is resolved from the built path at startup.
    Tweener::new(PathPlugin::new(path), accessor, [0.0; 3], duration)
}

/// Tween a dynamically typed value; the plugin is chosen from `end`'s kind.
pub fn to_value(
    accessor: Accessor<Value>,
    end: Value,
    duration: f32,
) -> Result<Tweener<DynamicPlugin>> {
    let plugin = DynamicPlugin::for_kind(end.kind())?;
    Tweener::new(plugin, accessor, end, duration)
}

pub fn sequence() -> Sequence {
    Sequence::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playable::Playable;
    use crate::plugins::ValuePlugin;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn axis_outside_vector_is_rejected() {
        let cell = Rc::new(Cell::new([0.0f32; 2]));
        let err = to_axis(Accessor::cell(&cell), AxisConstraint::Z, 1.0, 1.0).unwrap_err();
        assert_eq!(err.category(), "configuration");
        assert!(to_axis(Accessor::cell(&cell), AxisConstraint::None, 1.0, 1.0).is_err());
        assert!(to_axis(Accessor::cell(&cell), AxisConstraint::Y, 1.0, 1.0).is_ok());
    }

    #[test]
    fn non_interpolable_values_mismatch() {
        let cell = Rc::new(std::cell::RefCell::new(Value::Bool(false)));
        let err = to_value(Accessor::shared(&cell), Value::Bool(true), 1.0).unwrap_err();
        assert_eq!(err.category(), "plugin");
    }

    #[test]
    fn keyframe_shortcuts_default_to_linear() {
        let cell = Rc::new(Cell::new([0.0f32; 3]));
        let t = punch(Accessor::cell(&cell), [1.0, 0.0, 0.0], 1.0, 10, 1.0).expect("punch");
        assert_eq!(t.core().ease(), &Ease::Linear);
        assert_eq!(t.plugin().name(), "keyframes");
        assert!(shake(Accessor::cell(&cell), -1.0, &ShakeOptions::default()).is_err());
    }
}
