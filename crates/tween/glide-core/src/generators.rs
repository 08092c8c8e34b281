//! Keyframe generators for shake and punch effects.
//!
//! Both produce `max(2, floor(vibrato * duration))` keyframes whose durations
//! grow linearly and sum to `duration`. Magnitudes decay linearly and the last
//! key is always a zero offset, so the tween settles back on its start value.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_positive, TweenError};
use crate::interp::functions::{length_n, scale_n};
use crate::plugins::Keyframe;
use crate::Result;

const DEFAULT_SEED: u32 = 0x9E37_79B9;

/// Small deterministic RNG; shakes built from the same seed are identical.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// A zero seed would stick at zero and is replaced by a fixed constant.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { DEFAULT_SEED } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform in `[lo, hi)`.
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ShakeStrength {
    /// Same magnitude in every direction.
    Uniform(f32),
    /// Per-axis limits; each axis is clamped separately.
    PerAxis([f32; 3]),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakeOptions {
    pub strength: ShakeStrength,
    /// Oscillations per time unit.
    pub vibrato: u32,
    /// Angular deviation in degrees from a straight reversal, 0..=180.
    pub randomness: f32,
    pub ignore_z_axis: bool,
    pub seed: u32,
}

impl Default for ShakeOptions {
    fn default() -> Self {
        Self {
            strength: ShakeStrength::Uniform(1.0),
            vibrato: 10,
            randomness: 90.0,
            ignore_z_axis: false,
            seed: DEFAULT_SEED,
        }
    }
}

impl ShakeOptions {
    pub fn uniform(strength: f32) -> Self {
        Self {
            strength: ShakeStrength::Uniform(strength),
            ..Self::default()
        }
    }

    pub fn per_axis(strength: [f32; 3]) -> Self {
        Self {
            strength: ShakeStrength::PerAxis(strength),
            ..Self::default()
        }
    }

    pub fn with_vibrato(mut self, vibrato: u32) -> Self {
        self.vibrato = vibrato;
        self
    }

    pub fn with_randomness(mut self, randomness: f32) -> Self {
        self.randomness = randomness;
        self
    }

    /// Keep every offset in the XY plane.
    pub fn ignoring_z(mut self) -> Self {
        self.ignore_z_axis = true;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.vibrato == 0 {
            return Err(TweenError::invalid("shake vibrato must be at least 1"));
        }
        ensure_non_negative("shake randomness", self.randomness)?;
        match self.strength {
            ShakeStrength::Uniform(s) => ensure_non_negative("shake strength", s),
            ShakeStrength::PerAxis(axes) => axes
                .iter()
                .try_for_each(|s| ensure_non_negative("shake strength", *s)),
        }
    }
}

/// Number of keyframes for `vibrato` oscillations per time unit over `duration`.
pub fn keyframe_count(duration: f32, vibrato: u32) -> usize {
    ((vibrato as f32 * duration).floor() as usize).max(2)
}

/// `count` durations growing linearly and summing to `duration`.
pub fn keyframe_durations(count: usize, duration: f32) -> Vec<f32> {
    let weights: Vec<f32> = (1..=count).map(|i| duration * i as f32 / count as f32).collect();
    let sum: f32 = weights.iter().sum();
    if sum <= 0.0 {
        return vec![0.0; count];
    }
    weights.into_iter().map(|w| w * duration / sum).collect()
}

/// Linear decay factor for key `i` of `count`; the last key decays to zero.
fn decay(i: usize, count: usize) -> f32 {
    if count <= 1 {
        return 0.0;
    }
    (count - 1 - i) as f32 / (count - 1) as f32
}

/// Pseudo-random decaying offsets reversing direction by `180° ± randomness`.
pub fn shake_keyframes(duration: f32, options: &ShakeOptions) -> Result<Vec<Keyframe>> {
    ensure_positive("duration", duration)?;
    options.validate()?;

    let count = keyframe_count(duration, options.vibrato);
    let durations = keyframe_durations(count, duration);
    let randomness = options.randomness.min(180.0);
    let mut rng = XorShift32::new(options.seed);

    let (magnitude, limits) = match options.strength {
        ShakeStrength::Uniform(s) => (s, None),
        ShakeStrength::PerAxis(axes) => (length_n(&axes), Some(axes)),
    };

    let mut heading = rng.range(0.0, 360.0);
    let mut keys = Vec::with_capacity(count);
    for (i, duration) in durations.into_iter().enumerate() {
        let factor = decay(i, count);
        if i + 1 == count {
            keys.push(Keyframe {
                offset: [0.0; 3],
                duration,
            });
            break;
        }
        if i > 0 {
            heading += 180.0 + rng.range(-randomness, randomness);
        }
        let elevation = if options.ignore_z_axis {
            0.0
        } else {
            rng.range(-90.0, 90.0) * (randomness / 180.0)
        };
        let (h, e) = (heading.to_radians(), elevation.to_radians());
        let dir = [h.cos() * e.cos(), h.sin() * e.cos(), e.sin()];
        let mut offset = scale_n(&dir, magnitude * factor);
        if let Some(limits) = limits {
            for (axis, limit) in offset.iter_mut().zip(limits) {
                let limit = limit * factor;
                *axis = axis.clamp(-limit, limit);
            }
        }
        if options.ignore_z_axis {
            offset[2] = 0.0;
        }
        keys.push(Keyframe { offset, duration });
    }
    Ok(keys)
}

/// Offsets alternating `+direction` and `-direction * elasticity`, decaying to zero.
pub fn punch_keyframes(
    direction: [f32; 3],
    duration: f32,
    vibrato: u32,
    elasticity: f32,
) -> Result<Vec<Keyframe>> {
    ensure_positive("duration", duration)?;
    if vibrato == 0 {
        return Err(TweenError::invalid("punch vibrato must be at least 1"));
    }
    if direction.iter().any(|c| !c.is_finite()) {
        return Err(TweenError::invalid("punch direction must be finite"));
    }
    let elasticity = if elasticity.is_nan() {
        0.0
    } else {
        elasticity.clamp(0.0, 1.0)
    };

    let count = keyframe_count(duration, vibrato);
    let keys = keyframe_durations(count, duration)
        .into_iter()
        .enumerate()
        .map(|(i, duration)| {
            let factor = decay(i, count);
            let offset = if i + 1 == count {
                [0.0; 3]
            } else if i % 2 == 0 {
                scale_n(&direction, factor)
            } else {
                scale_n(&direction, -elasticity * factor)
            };
            Keyframe { offset, duration }
        })
        .collect();
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn xorshift_is_reproducible() {
        let mut a = XorShift32::new(7);
        let mut b = XorShift32::new(7);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
        let mut zero = XorShift32::new(0);
        assert_ne!(zero.next_u32(), 0);
        let f = XorShift32::new(3).next_f32();
        assert!((0.0..1.0).contains(&f));
    }

    #[test]
    fn durations_grow_and_sum_to_total() {
        let d = keyframe_durations(4, 2.0);
        assert_eq!(d.len(), 4);
        assert!(d.windows(2).all(|w| w[0] < w[1]));
        assert_relative_eq!(d.iter().sum::<f32>(), 2.0, epsilon = 1e-5);
        assert_eq!(keyframe_count(0.1, 1), 2);
        assert_eq!(keyframe_count(1.0, 10), 10);
    }

    #[test]
    fn shake_ends_at_zero_and_decays() {
        let opts = ShakeOptions::uniform(2.0).with_seed(42);
        let keys = shake_keyframes(1.0, &opts).expect("shake");
        assert_eq!(keys.len(), 10);
        assert_eq!(keys.last().map(|k| k.offset), Some([0.0; 3]));
        let first = length_n(&keys[0].offset);
        assert_relative_eq!(first, 2.0, epsilon = 1e-4);
        for pair in keys.windows(2) {
            assert!(length_n(&pair[1].offset) <= length_n(&pair[0].offset) + 1e-4);
        }
        assert_eq!(keys, shake_keyframes(1.0, &opts).expect("shake"));
    }

    #[test]
    fn shake_respects_axis_limits() {
        let opts = ShakeOptions::per_axis([1.0, 0.0, 0.5]).ignoring_z();
        for key in shake_keyframes(2.0, &opts).expect("shake") {
            assert!(key.offset[0].abs() <= 1.0 + 1e-5);
            assert_eq!(key.offset[1], 0.0);
            assert_eq!(key.offset[2], 0.0);
        }
    }

    #[test]
    fn shake_rejects_bad_settings() {
        let opts = ShakeOptions::uniform(1.0).with_vibrato(0);
        assert!(shake_keyframes(1.0, &opts).is_err());
        assert!(shake_keyframes(0.0, &ShakeOptions::default()).is_err());
        assert!(shake_keyframes(1.0, &ShakeOptions::uniform(-1.0)).is_err());
    }

    #[test]
    fn punch_alternates_with_elasticity() {
        let keys = punch_keyframes([0.0, 4.0, 0.0], 1.0, 4, 0.5).expect("punch");
        assert_eq!(keys.len(), 4);
        assert_relative_eq!(keys[0].offset[1], 4.0);
        assert!(keys[1].offset[1] < 0.0);
        assert_relative_eq!(keys[1].offset[1], -4.0 * 0.5 * 2.0 / 3.0, epsilon = 1e-5);
        assert!(keys[2].offset[1] > 0.0);
        assert_eq!(keys[3].offset, [0.0; 3]);

        let clamped = punch_keyframes([1.0, 0.0, 0.0], 1.0, 4, 3.0).expect("punch");
        assert_relative_eq!(clamped[1].offset[0], -2.0 / 3.0, epsilon = 1e-5);
        assert!(punch_keyframes([1.0; 3], 1.0, 0, 0.5).is_err());
    }
}
