//! Engine configuration and per-playable defaults.

use serde::{Deserialize, Serialize};

use crate::ease::{Ease, DEFAULT_OVERSHOOT};

/// Engine sizing plus the defaults applied to playables that leave a setting unset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial capacity hint for the registry.
    pub initial_capacity: usize,

    /// Maximum events to retain per tick; extra events are dropped with a warning.
    pub max_events_per_tick: usize,

    /// Global multiplier applied to every tick delta.
    pub time_scale: f32,

    pub default_ease: Ease,
    pub default_overshoot_or_amplitude: f32,
    pub default_period: f32,
    pub default_auto_kill: bool,
    pub default_auto_play: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
            max_events_per_tick: 1024,
            time_scale: 1.0,
            default_ease: Ease::OutQuad,
            default_overshoot_or_amplitude: DEFAULT_OVERSHOOT,
            default_period: 0.0,
            default_auto_kill: true,
            default_auto_play: true,
        }
    }
}

impl Config {
    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
