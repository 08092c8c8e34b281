//! Glide Core (engine-agnostic tweening)
//!
//! Typed values in, typed values out: tweeners animate one value through a
//! getter/setter [`Accessor`] and a [`ValuePlugin`], sequences lay playables
//! out on a shared timeline, and the [`TweenEngine`] advances every root
//! playable from the host's frame loop.

pub mod accessor;
pub mod commands;
pub mod config;
pub mod ease;
pub mod engine;
pub mod error;
pub mod generators;
pub mod ids;
pub mod interp;
pub mod outputs;
pub mod playable;
pub mod plugins;
pub mod sequence;
pub mod shortcuts;
pub mod tweener;
pub mod value;

// Re-exports for hosts
pub use accessor::Accessor;
pub use commands::{CommandQueue, Filter, TweenCommand};
pub use config::Config;
pub use ease::{CurveKey, Ease, EaseCurve, DEFAULT_OVERSHOOT};
pub use engine::{TweenEngine, TweenStatus};
pub use error::TweenError;
pub use generators::{ShakeOptions, ShakeStrength};
pub use ids::{TargetRef, TweenId};
pub use outputs::{Outputs, TweenEvent};
pub use playable::{
    LoopType, Loops, PlaybackState, Playable, PlayableKind, TweenCore, TweenSettings,
};
pub use plugins::{AxisConstraint, PathType, RotateMode, Tweenable, ValuePlugin};
pub use sequence::Sequence;
pub use tweener::Tweener;
pub use value::{Value, ValueKind};

pub type Result<T> = core::result::Result<T, TweenError>;
