//! Keyframe offsets around the start value; used by shake and punch.

use super::ValuePlugin;
use crate::error::TweenError;
use crate::interp::functions::{add_n, lerp_n, round_n, scale_n, sub_n};
use crate::Result;

/// Offset from the start value reached after `duration` time units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    pub offset: [f32; 3],
    pub duration: f32,
}

/// Walks a list of keyframes; the segment before key `i` blends from key `i-1`
/// (or zero offset) to key `i`. The end value equals the start value.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframePlugin {
    keys: Vec<Keyframe>,
    total: f32,
    pub snapping: bool,
}

impl KeyframePlugin {
    pub fn new(keys: Vec<Keyframe>) -> Result<Self> {
        if keys.is_empty() {
            return Err(TweenError::invalid("keyframe tween needs at least one key"));
        }
        if keys
            .iter()
            .any(|k| !(k.duration.is_finite() && k.duration >= 0.0))
        {
            return Err(TweenError::invalid(
                "keyframe durations must be finite and non-negative",
            ));
        }
        let total = keys.iter().map(|k| k.duration).sum::<f32>();
        if total <= 0.0 {
            return Err(TweenError::invalid("keyframe durations must sum to > 0"));
        }
        Ok(Self {
            keys,
            total,
            snapping: false,
        })
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Sum of all key durations.
    pub fn total_duration(&self) -> f32 {
        self.total
    }

    /// Offset at fraction `t` of the keyframe timeline.
    pub fn offset_at(&self, t: f32) -> [f32; 3] {
        let mut at = t.clamp(0.0, 1.0) * self.total;
        let mut prev = [0.0; 3];
        for key in &self.keys {
            if at <= key.duration {
                let s = if key.duration > 0.0 { at / key.duration } else { 1.0 };
                return lerp_n(&prev, &key.offset, s);
            }
            at -= key.duration;
            prev = key.offset;
        }
        prev
    }
}

impl ValuePlugin for KeyframePlugin {
    type Value = [f32; 3];
    type Stored = [f32; 3];

    fn name(&self) -> &'static str {
        "keyframes"
    }

    fn to_stored(&self, value: [f32; 3]) -> [f32; 3] {
        value
    }

    fn to_value(&self, stored: &[f32; 3]) -> [f32; 3] {
        *stored
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

    fn resolve_end(&self, start: &[f32; 3], _end: &[f32; 3], _relative: bool) -> [f32; 3] {
        *start
    }

    fn interpolate(&self, start: &[f32; 3], _change: &[f32; 3], eased: f32) -> [f32; 3] {
        let v = add_n(start, &self.offset_at(eased));
        if self.snapping {
            round_n(&v)
        } else {
            v
        }
    }
}
