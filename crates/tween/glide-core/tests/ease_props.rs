use approx::assert_relative_eq;
use glide_core::{CurveKey, Ease, EaseCurve};

#[test]
fn monotone_eases_stay_in_range() {
    for ease in Ease::built_in().iter().filter(|e| !e.overshoots()) {
        let mut prev = 0.0;
        for i in 0..=50 {
            let v = ease.apply(i as f32 / 50.0);
            assert!((-1e-5..=1.0 + 1e-5).contains(&v), "{ease:?} -> {v}");
            if !matches!(ease, Ease::InBounce | Ease::OutBounce | Ease::InOutBounce) {
                assert!(v + 1e-5 >= prev, "{ease:?} not monotone at step {i}");
            }
            prev = v;
        }
    }
}

#[test]
fn back_overshoot_scales_with_parameter() {
    let mild = Ease::InBack.evaluate(0.2, 1.0, 0.0);
    let strong = Ease::InBack.evaluate(0.2, 3.0, 0.0);
    assert!(mild < 0.0);
    assert!(strong < mild);
    assert!(Ease::OutBack.apply(0.8) > 1.0);
}

#[test]
fn reference_points() {
    assert_relative_eq!(Ease::Linear.apply(0.25), 0.25);
    assert_relative_eq!(Ease::InQuad.apply(0.5), 0.25);
    assert_relative_eq!(Ease::OutQuad.apply(0.5), 0.75);
    assert_relative_eq!(Ease::InOutCubic.apply(0.5), 0.5, epsilon = 1e-6);
    assert_relative_eq!(Ease::OutBounce.apply(0.5), 0.765625, epsilon = 1e-5);
}

#[test]
fn cubic_bezier_linear_control_points() {
    let ease = Ease::CubicBezier(0.25, 0.25, 0.75, 0.75);
    for i in 0..=10 {
        let t = i as f32 / 10.0;
        assert_relative_eq!(ease.apply(t), t, epsilon = 1e-3);
    }
}

#[test]
fn curve_uses_its_own_keys() {
    let curve = EaseCurve::new(vec![
        CurveKey::new(0.0, 0.0).with_tangents(0.0, 0.0),
        CurveKey::new(0.5, 1.2).with_tangents(0.0, 0.0),
        CurveKey::new(1.0, 1.0).with_tangents(0.0, 0.0),
    ])
    .expect("curve");
    let ease = Ease::Curve(curve);
    assert_relative_eq!(ease.apply(0.5), 1.2, epsilon = 1e-5);
    assert_relative_eq!(ease.apply(1.0), 1.0, epsilon = 1e-5);
    assert!(ease.overshoots());
}

#[test]
fn ease_roundtrips_through_json() {
    let ease = Ease::CubicBezier(0.1, 0.7, 0.3, 1.0);
    let json = serde_json::to_string(&ease).expect("serialize");
    let back: Ease = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, ease);
}
