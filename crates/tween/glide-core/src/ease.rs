//! Ease evaluator: normalized time in, normalized progress out.
//!
//! Every built-in ease returns exactly 0 at `t <= 0` and exactly 1 at `t >= 1`,
//! including the overshooting families (Back, Elastic). Custom curves are sampled
//! as authored and are not forced to those endpoints.

use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::error::TweenError;

/// Default overshoot for Back eases and amplitude for Elastic eases.
pub const DEFAULT_OVERSHOOT: f32 = 1.70158;

/// Ease kind applied to normalized time before value interpolation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub enum Ease {
    Linear,
    InSine,
    OutSine,
    InOutSine,
    InQuad,
    #[default]
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    InExpo,
    OutExpo,
    InOutExpo,
    InCirc,
    OutCirc,
    InOutCirc,
    InElastic,
    OutElastic,
    InOutElastic,
    InBack,
    OutBack,
    InOutBack,
    InBounce,
    OutBounce,
    InOutBounce,
    /// CSS-style cubic bezier timing curve (x1, y1, x2, y2).
    CubicBezier(f32, f32, f32, f32),
    /// Keyframed curve sampled as authored.
    Curve(EaseCurve),
}

impl Ease {
    /// Every closed-form ease kind, in declaration order.
    pub fn built_in() -> [Ease; 31] {
        use Ease::*;
        [
            Linear, InSine, OutSine, InOutSine, InQuad, OutQuad, InOutQuad, InCubic, OutCubic,
            InOutCubic, InQuart, OutQuart, InOutQuart, InQuint, OutQuint, InOutQuint, InExpo,
            OutExpo, InOutExpo, InCirc, OutCirc, InOutCirc, InElastic, OutElastic, InOutElastic,
            InBack, OutBack, InOutBack, InBounce, OutBounce, InOutBounce,
        ]
    }

    /// True for eases whose output leaves [0, 1] between the endpoints.
    pub fn overshoots(&self) -> bool {
        matches!(
            self,
            Ease::InElastic
                | Ease::OutElastic
                | Ease::InOutElastic
                | Ease::InBack
                | Ease::OutBack
                | Ease::InOutBack
                | Ease::CubicBezier(..)
                | Ease::Curve(_)
        )
    }

    /// Evaluate with default overshoot/amplitude and period.
    #[inline]
    pub fn apply(&self, t: f32) -> f32 {
        self.evaluate(t, DEFAULT_OVERSHOOT, 0.0)
    }

    /// Map normalized time to eased progress.
    ///
    /// `overshoot_or_amplitude` drives Back (overshoot) and Elastic (amplitude).
    /// `period` drives Elastic; 0 selects the default period.
    pub fn evaluate(&self, t: f32, overshoot_or_amplitude: f32, period: f32) -> f32 {
        if let Ease::Curve(curve) = self {
            return curve.evaluate(t);
        }
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let s = overshoot_or_amplitude;
        match self {
            Ease::Linear => t,
            Ease::InSine => 1.0 - (t * FRAC_PI_2).cos(),
            Ease::OutSine => (t * FRAC_PI_2).sin(),
            Ease::InOutSine => -0.5 * ((PI * t).cos() - 1.0),
            Ease::InQuad => t * t,
            Ease::OutQuad => -t * (t - 2.0),
            Ease::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Ease::InCubic => t * t * t,
            Ease::OutCubic => 1.0 + (t - 1.0).powi(3),
            Ease::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Ease::InQuart => t.powi(4),
            Ease::OutQuart => 1.0 - (t - 1.0).powi(4),
            Ease::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Ease::InQuint => t.powi(5),
            Ease::OutQuint => 1.0 + (t - 1.0).powi(5),
            Ease::InOutQuint => {
                if t < 0.5 {
                    16.0 * t.powi(5)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
                }
            }
            Ease::InExpo => 2f32.powf(10.0 * (t - 1.0)),
            Ease::OutExpo => 1.0 - 2f32.powf(-10.0 * t),
            Ease::InOutExpo => {
                if t < 0.5 {
                    0.5 * 2f32.powf(20.0 * t - 10.0)
                } else {
                    0.5 * (2.0 - 2f32.powf(-20.0 * t + 10.0))
                }
            }
            Ease::InCirc => 1.0 - (1.0 - t * t).sqrt(),
            Ease::OutCirc => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Ease::InOutCirc => {
                if t < 0.5 {
                    0.5 * (1.0 - (1.0 - 4.0 * t * t).sqrt())
                } else {
                    0.5 * ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0)
                }
            }
            Ease::InElastic => {
                let (a, p, shift) = elastic_params(s, period, 0.3);
                let t = t - 1.0;
                -(a * 2f32.powf(10.0 * t) * ((t - shift) * TAU / p).sin())
            }
            Ease::OutElastic => {
                let (a, p, shift) = elastic_params(s, period, 0.3);
                a * 2f32.powf(-10.0 * t) * ((t - shift) * TAU / p).sin() + 1.0
            }
            Ease::InOutElastic => {
                let (a, p, shift) = elastic_params(s, period, 0.45);
                let t = t * 2.0 - 1.0;
                if t < 0.0 {
                    -0.5 * (a * 2f32.powf(10.0 * t) * ((t - shift) * TAU / p).sin())
                } else {
                    a * 2f32.powf(-10.0 * t) * ((t - shift) * TAU / p).sin() * 0.5 + 1.0
                }
            }
            Ease::InBack => t * t * ((s + 1.0) * t - s),
            Ease::OutBack => {
                let t = t - 1.0;
                t * t * ((s + 1.0) * t + s) + 1.0
            }
            Ease::InOutBack => {
                let s = s * 1.525;
                let t = t * 2.0;
                if t < 1.0 {
                    0.5 * (t * t * ((s + 1.0) * t - s))
                } else {
                    let t = t - 2.0;
                    0.5 * (t * t * ((s + 1.0) * t + s) + 2.0)
                }
            }
            Ease::InBounce => 1.0 - out_bounce(1.0 - t),
            Ease::OutBounce => out_bounce(t),
            Ease::InOutBounce => {
                if t < 0.5 {
                    (1.0 - out_bounce(1.0 - 2.0 * t)) * 0.5
                } else {
                    out_bounce(2.0 * t - 1.0) * 0.5 + 0.5
                }
            }
            Ease::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
            Ease::Curve(curve) => curve.evaluate(t),
        }
    }
}

/// Amplitude, period and phase shift for the elastic family.
fn elastic_params(amplitude: f32, period: f32, default_period: f32) -> (f32, f32, f32) {
    let p = if period > 0.0 { period } else { default_period };
    if amplitude < 1.0 {
        (1.0, p, p / 4.0)
    } else {
        (amplitude, p, p / TAU * (1.0 / amplitude).asin())
    }
}

fn out_bounce(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

/// Cubic bezier timing curve through (0,0), (x1,y1), (x2,y2), (1,1).
///
/// Newton-Raphson on x with a bisection fallback; evaluated in f64.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let x = t as f64;
    let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);

    let mut p = x;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2) as f32;
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = x;
    for _ in 0..24 {
        let val = bezier_sample(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }
    bezier_sample(p, y1, y2) as f32
}

#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

/// One key of an [`EaseCurve`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
    #[serde(default)]
    pub in_tangent: f32,
    #[serde(default)]
    pub out_tangent: f32,
}

impl CurveKey {
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            in_tangent: 0.0,
            out_tangent: 0.0,
        }
    }

    pub fn with_tangents(mut self, in_tangent: f32, out_tangent: f32) -> Self {
        self.in_tangent = in_tangent;
        self.out_tangent = out_tangent;
        self
    }
}

/// Hermite keyframe curve. Times outside the key range hold the first/last value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EaseCurve {
    keys: Vec<CurveKey>,
}

impl EaseCurve {
    /// Build from keys with explicit tangents. Times must be finite and strictly increasing.
    pub fn new(keys: Vec<CurveKey>) -> crate::Result<Self> {
        if keys.is_empty() {
            return Err(TweenError::invalid("ease curve needs at least one key"));
        }
        for k in &keys {
            if !(k.time.is_finite()
                && k.value.is_finite()
                && k.in_tangent.is_finite()
                && k.out_tangent.is_finite())
            {
                return Err(TweenError::invalid("ease curve keys must be finite"));
            }
        }
        if keys.windows(2).any(|w| w[1].time <= w[0].time) {
            return Err(TweenError::invalid(
                "ease curve key times must be strictly increasing",
            ));
        }
        Ok(Self { keys })
    }

    /// Build from `(time, value)` points with finite-difference tangents.
    pub fn smooth(points: &[(f32, f32)]) -> crate::Result<Self> {
        let n = points.len();
        let mut keys: Vec<CurveKey> = points.iter().map(|&(t, v)| CurveKey::new(t, v)).collect();
        if n >= 2 {
            for i in 0..n {
                let (a, b) = match i {
                    0 => (points[0], points[1]),
                    i if i + 1 == n => (points[n - 2], points[n - 1]),
                    i => (points[i - 1], points[i + 1]),
                };
                let dt = b.0 - a.0;
                let slope = if dt != 0.0 { (b.1 - a.1) / dt } else { 0.0 };
                keys[i].in_tangent = slope;
                keys[i].out_tangent = slope;
            }
        }
        Self::new(keys)
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    pub fn evaluate(&self, t: f32) -> f32 {
        let keys = &self.keys;
        let first = keys[0];
        let last = keys[keys.len() - 1];
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }
        let idx = keys.partition_point(|k| k.time <= t);
        let k0 = keys[idx - 1];
        let k1 = keys[idx];
        let dt = k1.time - k0.time;
        let s = (t - k0.time) / dt;
        let s2 = s * s;
        let s3 = s2 * s;
        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;
        h00 * k0.value + h10 * k0.out_tangent * dt + h01 * k1.value + h11 * k1.in_tangent * dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_exact_for_built_ins() {
        for ease in Ease::built_in() {
            assert_eq!(ease.apply(0.0), 0.0, "{ease:?} at 0");
            assert_eq!(ease.apply(1.0), 1.0, "{ease:?} at 1");
            assert_eq!(ease.apply(-0.5), 0.0, "{ease:?} below 0");
            assert_eq!(ease.apply(1.5), 1.0, "{ease:?} above 1");
        }
    }

    #[test]
    fn symmetric_in_out_pass_midpoint() {
        for ease in [
            Ease::InOutSine,
            Ease::InOutQuad,
            Ease::InOutCubic,
            Ease::InOutQuart,
            Ease::InOutQuint,
            Ease::InOutExpo,
            Ease::InOutCirc,
            Ease::InOutBounce,
        ] {
            assert!((ease.apply(0.5) - 0.5).abs() < 1e-5, "{ease:?}");
        }
    }

    #[test]
    fn back_overshoots() {
        assert!(Ease::OutBack.apply(0.8) > 1.0);
        assert!(Ease::InBack.apply(0.2) < 0.0);
        assert!(Ease::OutBack.overshoots());
        assert!(!Ease::OutQuad.overshoots());
    }

    #[test]
    fn out_bounce_hits_one_at_the_first_landing() {
        assert!((Ease::OutBounce.apply(1.0 / 2.75) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn elastic_period_changes_shape() {
        let a = Ease::OutElastic.evaluate(0.3, 1.0, 0.0);
        let b = Ease::OutElastic.evaluate(0.3, 1.0, 0.8);
        assert!((a - b).abs() > 1e-3);
    }

    #[test]
    fn cubic_bezier_linear_control_points_is_identity() {
        let ease = Ease::CubicBezier(0.25, 0.25, 0.75, 0.75);
        for i in 1..10 {
            let t = i as f32 / 10.0;
            assert!((ease.apply(t) - t).abs() < 1e-4);
        }
    }

    #[test]
    fn curve_holds_outside_range_and_hits_keys() {
        let curve = EaseCurve::smooth(&[(0.0, 0.0), (0.5, 0.8), (1.0, 1.0)]).expect("curve");
        assert_eq!(curve.evaluate(-1.0), 0.0);
        assert_eq!(curve.evaluate(2.0), 1.0);
        assert!((curve.evaluate(0.5) - 0.8).abs() < 1e-6);
        let ease = Ease::Curve(curve);
        assert!((ease.apply(0.5) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn curve_rejects_bad_keys() {
        assert!(EaseCurve::new(Vec::new()).is_err());
        assert!(EaseCurve::new(vec![CurveKey::new(0.5, 0.0), CurveKey::new(0.5, 1.0)]).is_err());
        assert!(EaseCurve::new(vec![CurveKey::new(0.0, f32::NAN)]).is_err());
    }

    #[test]
    fn ease_serializes_by_name() {
        let json = serde_json::to_string(&Ease::InOutBack).expect("serialize");
        assert_eq!(json, "\"InOutBack\"");
        let back: Ease = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, Ease::InOutBack);
    }
}
