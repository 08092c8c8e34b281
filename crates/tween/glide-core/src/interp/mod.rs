//! Interpolation math used by the value plugins.

pub mod functions;

pub use functions::{
    add_n, euler_to_quat, lerp_f32, lerp_n, nlerp_quat, quat_conjugate, quat_mul, quat_pow,
    quat_to_euler, scale_n, sub_n,
};
