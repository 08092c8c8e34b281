//! Numeric helpers shared by the value plugins:
//! - component-wise arithmetic over `[f32; N]`
//! - quaternion NLERP with shortest-arc normalization
//! - quaternion product, conjugate and power
//! - Euler (degrees) <-> quaternion, `R = Rz * Ry * Rx`

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn add_n<const N: usize>(a: &[f32; N], b: &[f32; N]) -> [f32; N] {
    std::array::from_fn(|i| a[i] + b[i])
}

#[inline]
pub fn sub_n<const N: usize>(a: &[f32; N], b: &[f32; N]) -> [f32; N] {
    std::array::from_fn(|i| a[i] - b[i])
}

#[inline]
pub fn scale_n<const N: usize>(a: &[f32; N], k: f32) -> [f32; N] {
    std::array::from_fn(|i| a[i] * k)
}

/// `start + change * t`, component-wise.
#[inline]
pub fn offset_lerp_n<const N: usize>(start: &[f32; N], change: &[f32; N], t: f32) -> [f32; N] {
    std::array::from_fn(|i| start[i] + change[i] * t)
}

#[inline]
pub fn lerp_n<const N: usize>(a: &[f32; N], b: &[f32; N], t: f32) -> [f32; N] {
    std::array::from_fn(|i| lerp_f32(a[i], b[i], t))
}

#[inline]
pub fn length_n<const N: usize>(a: &[f32; N]) -> f32 {
    a.iter().map(|c| c * c).sum::<f32>().sqrt()
}

#[inline]
pub fn round_n<const N: usize>(a: &[f32; N]) -> [f32; N] {
    std::array::from_fn(|i| a[i].round())
}

#[inline]
fn dot4(a: [f32; 4], b: [f32; 4]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

#[inline]
pub fn normalize4(mut q: [f32; 4]) -> [f32; 4] {
    let len2 = dot4(q, q);
    if len2 > 0.0 {
        let inv_len = len2.sqrt().recip();
        q[0] *= inv_len;
        q[1] *= inv_len;
        q[2] *= inv_len;
        q[3] *= inv_len;
    }
    q
}

/// Quaternion NLERP with shortest-arc correction.
/// If dot < 0, negate the second quaternion to ensure the shortest path.
/// Returns a normalized quaternion (x,y,z,w).
#[inline]
pub fn nlerp_quat(a: [f32; 4], mut b: [f32; 4], t: f32) -> [f32; 4] {
    if dot4(a, b) < 0.0 {
        b = [-b[0], -b[1], -b[2], -b[3]];
    }
    normalize4(lerp_n(&a, &b, t))
}

/// Hamilton product `a * b` for (x,y,z,w) quaternions.
#[inline]
pub fn quat_mul(a: [f32; 4], b: [f32; 4]) -> [f32; 4] {
    let [ax, ay, az, aw] = a;
    let [bx, by, bz, bw] = b;
    [
        aw * bx + ax * bw + ay * bz - az * by,
        aw * by - ax * bz + ay * bw + az * bx,
        aw * bz + ax * by - ay * bx + az * bw,
        aw * bw - ax * bx - ay * by - az * bz,
    ]
}

#[inline]
pub fn quat_conjugate(q: [f32; 4]) -> [f32; 4] {
    [-q[0], -q[1], -q[2], q[3]]
}

/// Raise a unit quaternion to a real power by scaling its rotation angle.
pub fn quat_pow(q: [f32; 4], k: f32) -> [f32; 4] {
    let q = normalize4(q);
    let w = q[3].clamp(-1.0, 1.0);
    let half = w.acos();
    let s = half.sin();
    if s.abs() < 1e-6 {
        return [0.0, 0.0, 0.0, 1.0];
    }
    let axis = [q[0] / s, q[1] / s, q[2] / s];
    let new_half = half * k;
    let ns = new_half.sin();
    [axis[0] * ns, axis[1] * ns, axis[2] * ns, new_half.cos()]
}

/// Euler angles in degrees `[x, y, z]` to a quaternion, `R = Rz * Ry * Rx`.
pub fn euler_to_quat(euler_deg: [f32; 3]) -> [f32; 4] {
    let [x, y, z] = euler_deg.map(f32::to_radians);
    let (sr, cr) = (x * 0.5).sin_cos();
    let (sp, cp) = (y * 0.5).sin_cos();
    let (sy, cy) = (z * 0.5).sin_cos();
    [
        sr * cp * cy - cr * sp * sy,
        cr * sp * cy + sr * cp * sy,
        cr * cp * sy - sr * sp * cy,
        cr * cp * cy + sr * sp * sy,
    ]
}

/// Inverse of [`euler_to_quat`]; y (pitch) is clamped to ±90°.
pub fn quat_to_euler(q: [f32; 4]) -> [f32; 3] {
    let [x, y, z, w] = normalize4(q);
    let roll = (2.0 * (w * x + y * z)).atan2(1.0 - 2.0 * (x * x + y * y));
    let sinp = 2.0 * (w * y - z * x);
    let pitch = if sinp.abs() >= 1.0 {
        std::f32::consts::FRAC_PI_2.copysign(sinp)
    } else {
        sinp.asin()
    };
    let yaw = (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z));
    [roll.to_degrees(), pitch.to_degrees(), yaw.to_degrees()]
}

/// Wrap an angle difference in degrees into [-180, 180).
#[inline]
pub fn wrap_degrees(delta: f32) -> f32 {
    (delta + 180.0).rem_euclid(360.0) - 180.0
}
