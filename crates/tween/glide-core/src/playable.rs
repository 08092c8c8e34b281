//! Shared timing state machine for tweeners and sequences.
//!
//! A playable tracks `position` along its looped timeline, excluding the delay,
//! in `[0, duration * loops]`. The delay is tracked separately in
//! `elapsed_delay`. [`goto`] moves the position and renders it through
//! [`Playable::render`]; [`advance`] is the per-tick forward/backward step on top.
//!
//! Loop boundaries: position `k * duration` (0 < k < loops) is the start of cycle
//! `k`; the end of the timeline is the end of the last cycle. Yoyo mirrors odd
//! cycles.
//!
//! Infinite timelines keep `position` within one period (one cycle, two for
//! yoyo) and count whole periods in `folded_cycles`, so f32 precision does not
//! degrade with uptime.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::ease::Ease;
use crate::error::{ensure_non_negative, TweenError};
use crate::ids::TargetRef;
use crate::Result;

static FALLBACK_EASE: Ease = Ease::OutQuad;

/// Lifecycle of a playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Built or registered, not yet played.
    Init,
    Playing,
    Paused,
    /// Parked at the end of its last loop.
    Complete,
    /// Removed from the engine.
    Killed,
}

impl PlaybackState {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Complete => "complete",
            Self::Killed => "killed",
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    #[inline]
    pub fn can_pause(&self) -> bool {
        matches!(self, Self::Init | Self::Playing)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopType {
    /// Jump back to the start value each cycle.
    #[default]
    Restart,
    /// Alternate forward and backward cycles.
    Yoyo,
    /// Each cycle continues from where the previous one ended.
    Incremental,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Loops {
    Count(u32),
    Infinite,
}

impl Default for Loops {
    fn default() -> Self {
        Loops::Count(1)
    }
}

impl Loops {
    /// Cycle count, with 0 read as 1; `None` when infinite.
    #[inline]
    pub fn cycles(&self) -> Option<u32> {
        match self {
            Loops::Count(n) => Some((*n).max(1)),
            Loops::Infinite => None,
        }
    }
}

/// Callback slots shared by every playable.
#[derive(Default)]
pub struct Callbacks {
    pub(crate) on_start: Option<Box<dyn FnMut()>>,
    pub(crate) on_play: Option<Box<dyn FnMut()>>,
    pub(crate) on_pause: Option<Box<dyn FnMut()>>,
    pub(crate) on_update: Option<Box<dyn FnMut()>>,
    pub(crate) on_step_complete: Option<Box<dyn FnMut()>>,
    pub(crate) on_complete: Option<Box<dyn FnMut()>>,
    pub(crate) on_rewind: Option<Box<dyn FnMut()>>,
    pub(crate) on_kill: Option<Box<dyn FnMut()>>,
}

#[inline]
fn fire(slot: &mut Option<Box<dyn FnMut()>>) {
    if let Some(cb) = slot.as_mut() {
        cb();
    }
}

impl Callbacks {
    pub(crate) fn start(&mut self) {
        fire(&mut self.on_start)
    }
    pub(crate) fn play(&mut self) {
        fire(&mut self.on_play)
    }
    pub(crate) fn pause(&mut self) {
        fire(&mut self.on_pause)
    }
    pub(crate) fn update(&mut self) {
        fire(&mut self.on_update)
    }
    pub(crate) fn step_complete(&mut self) {
        fire(&mut self.on_step_complete)
    }
    pub(crate) fn complete(&mut self) {
        fire(&mut self.on_complete)
    }
    pub(crate) fn rewind(&mut self) {
        fire(&mut self.on_rewind)
    }
    pub(crate) fn kill(&mut self) {
        fire(&mut self.on_kill)
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = Vec::new();
        for (name, present) in [
            ("start", self.on_start.is_some()),
            ("play", self.on_play.is_some()),
            ("pause", self.on_pause.is_some()),
            ("update", self.on_update.is_some()),
            ("step_complete", self.on_step_complete.is_some()),
            ("complete", self.on_complete.is_some()),
            ("rewind", self.on_rewind.is_some()),
            ("kill", self.on_kill.is_some()),
        ] {
            if present {
                set.push(name);
            }
        }
        f.debug_tuple("Callbacks").field(&set).finish()
    }
}

/// Timing, settings and lifecycle state shared by tweeners and sequences.
#[derive(Debug)]
pub struct TweenCore {
    pub(crate) target: Option<TargetRef>,
    pub(crate) delay: f32,
    pub(crate) duration: f32,
    pub(crate) loops: Loops,
    pub(crate) loop_type: LoopType,
    pub(crate) ease: Option<Ease>,
    pub(crate) overshoot_or_amplitude: Option<f32>,
    pub(crate) period: Option<f32>,
    pub(crate) is_relative: bool,
    pub(crate) auto_kill: Option<bool>,
    pub(crate) auto_play: Option<bool>,
    pub(crate) time_scale: f32,

    pub(crate) state: PlaybackState,
    pub(crate) is_backwards: bool,
    pub(crate) position: f32,
    pub(crate) folded_cycles: u32,
    pub(crate) elapsed_delay: f32,
    pub(crate) startup_done: bool,

    pub(crate) callbacks: Callbacks,
}

/// Where a timeline position falls.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Located {
    pub cycle: u32,
    pub local: f32,
    pub completed: u32,
}

impl TweenCore {
    pub(crate) fn new(duration: f32) -> Self {
        Self {
            target: None,
            delay: 0.0,
            duration,
            loops: Loops::default(),
            loop_type: LoopType::Restart,
            ease: None,
            overshoot_or_amplitude: None,
            period: None,
            is_relative: false,
            auto_kill: None,
            auto_play: None,
            time_scale: 1.0,
            state: PlaybackState::Init,
            is_backwards: false,
            position: 0.0,
            folded_cycles: 0,
            elapsed_delay: 0.0,
            startup_done: false,
            callbacks: Callbacks::default(),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn target(&self) -> Option<TargetRef> {
        self.target
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// Length of one loop cycle.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn loops(&self) -> Loops {
        self.loops
    }

    pub fn loop_type(&self) -> LoopType {
        self.loop_type
    }

    pub fn is_backwards(&self) -> bool {
        self.is_backwards
    }

    pub fn is_relative(&self) -> bool {
        self.is_relative
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Timeline position excluding the delay.
    pub fn position(&self) -> f32 {
        (self.folded_cycles as f64 * self.duration as f64 + self.position as f64) as f32
    }

    pub fn elapsed_delay(&self) -> f32 {
        self.elapsed_delay
    }

    pub fn elapsed_total(&self) -> f32 {
        self.elapsed_delay + self.position()
    }

    pub fn has_started(&self) -> bool {
        self.startup_done
    }

    pub fn ease(&self) -> &Ease {
        self.ease.as_ref().unwrap_or(&FALLBACK_EASE)
    }

    pub fn overshoot_or_amplitude(&self) -> f32 {
        self.overshoot_or_amplitude
            .unwrap_or(crate::ease::DEFAULT_OVERSHOOT)
    }

    pub fn period(&self) -> f32 {
        self.period.unwrap_or(0.0)
    }

    pub fn auto_kill(&self) -> bool {
        self.auto_kill.unwrap_or(true)
    }

    pub fn auto_play(&self) -> bool {
        self.auto_play.unwrap_or(true)
    }

    /// `duration * loops`, or `None` for infinite loops.
    pub fn full_duration(&self) -> Option<f32> {
        self.loops.cycles().map(|n| self.duration * n as f32)
    }

    /// Delay plus [`Self::full_duration`]; the span a sequence reserves for this playable.
    pub fn span(&self) -> Option<f32> {
        self.full_duration().map(|d| self.delay + d)
    }

    pub fn completed_loops(&self) -> u32 {
        self.locate(self.position).completed
    }

    pub fn is_at_end(&self) -> bool {
        self.full_duration()
            .is_some_and(|full| self.position >= full)
    }

    pub fn is_complete(&self) -> bool {
        self.state == PlaybackState::Complete
    }

    /// Eased progress for a cycle-local position (already mirrored).
    pub(crate) fn eased(&self, local: f32) -> f32 {
        let t = if self.duration > 0.0 {
            local / self.duration
        } else {
            1.0
        };
        self.ease()
            .evaluate(t, self.overshoot_or_amplitude(), self.period())
    }

    pub(crate) fn clamp_position(&self, position: f32) -> f32 {
        let position = if position.is_nan() { 0.0 } else { position };
        match self.full_duration() {
            Some(full) => position.clamp(0.0, full),
            None => position.max(-(self.folded_cycles as f32 * self.duration)),
        }
    }

    /// Cycles per folding period of an infinite timeline.
    fn fold_cycles(&self) -> u32 {
        if self.loop_type == LoopType::Yoyo {
            2
        } else {
            1
        }
    }

    fn folds(&self) -> bool {
        self.loops.cycles().is_none() && self.duration > 0.0
    }

    /// Move whole periods between `position` and `folded_cycles`.
    pub(crate) fn fold(&mut self) {
        if !self.folds() {
            return;
        }
        let per = self.fold_cycles();
        let period = self.duration * per as f32;
        if self.position >= period {
            let k = (self.position / period).floor();
            self.position = (self.position - k * period).clamp(0.0, period);
            self.folded_cycles = self
                .folded_cycles
                .saturating_add((k as u32).saturating_mul(per));
        } else if self.position < 0.0 && self.folded_cycles > 0 {
            let k = ((-self.position / period).ceil() as u32).min(self.folded_cycles / per);
            self.position += k as f32 * period;
            self.folded_cycles -= k * per;
        }
    }

    /// Translate an absolute timeline position into the folded frame,
    /// refolding so that it lands in the first period.
    pub(crate) fn frame(&mut self, absolute: f32) -> f32 {
        if !self.folds() {
            return absolute;
        }
        let absolute = if absolute.is_nan() { 0.0 } else { absolute.max(0.0) } as f64;
        let per = self.fold_cycles();
        let duration = self.duration as f64;
        let periods = (absolute / (duration * per as f64)).floor() as u32;
        let folded = periods.saturating_mul(per);
        let shift = (folded as f64 - self.folded_cycles as f64) * duration;
        self.position = (self.position as f64 - shift) as f32;
        self.folded_cycles = folded;
        (absolute - folded as f64 * duration) as f32
    }

    pub(crate) fn locate(&self, position: f32) -> Located {
        if let Some(n) = self.loops.cycles() {
            let full = self.duration * n as f32;
            if position >= full {
                return Located {
                    cycle: n - 1,
                    local: self.duration,
                    completed: n,
                };
            }
        }
        if self.duration <= 0.0 {
            return Located {
                cycle: 0,
                local: 0.0,
                completed: 0,
            };
        }
        let base = self.folded_cycles as i64;
        let mut cycle = (base + (position / self.duration).floor() as i64).max(0);
        if let Some(n) = self.loops.cycles() {
            cycle = cycle.min(n as i64 - 1);
        }
        let cycle_start = (cycle - base) as f32 * self.duration;
        let local = (position - cycle_start).clamp(0.0, self.duration);
        let cycle = cycle.min(u32::MAX as i64) as u32;
        Located {
            cycle,
            local,
            completed: cycle,
        }
    }

    /// Local position as rendered: odd yoyo cycles run end to start.
    pub(crate) fn mirror(&self, cycle: u32, local: f32) -> f32 {
        if self.loop_type == LoopType::Yoyo && cycle % 2 == 1 {
            self.duration - local
        } else {
            local
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        ensure_non_negative("delay", self.delay)?;
        ensure_non_negative("duration", self.duration)?;
        ensure_non_negative("time scale", self.time_scale)?;
        if let Some(o) = self.overshoot_or_amplitude {
            if !o.is_finite() {
                return Err(TweenError::invalid("ease overshoot must be finite"));
            }
        }
        if let Some(p) = self.period {
            ensure_non_negative("ease period", p)?;
        }
        Ok(())
    }

    pub(crate) fn resolve_defaults(&mut self, cfg: &Config) {
        if self.ease.is_none() {
            self.ease = Some(cfg.default_ease.clone());
        }
        self.overshoot_or_amplitude
            .get_or_insert(cfg.default_overshoot_or_amplitude);
        self.period.get_or_insert(cfg.default_period);
        self.auto_kill.get_or_insert(cfg.default_auto_kill);
        self.auto_play.get_or_insert(cfg.default_auto_play);
    }
}

/// What [`Playable::render`] should draw.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cursor {
    /// Cycle index of the new position.
    pub cycle: u32,
    /// Cycle-local position, mirrored for odd yoyo cycles.
    pub local: f32,
    pub previous_cycle: u32,
    pub previous_local: f32,
    /// The timeline position increased (or stayed).
    pub forward: bool,
    /// Seek rather than continuous playback.
    pub jump: bool,
    /// Rewind-style reset: crossed loop boundaries and timed callbacks are skipped.
    pub reset: bool,
}

/// Timeline unit driven by the engine or by a parent sequence.
pub trait Playable {
    fn core(&self) -> &TweenCore;
    fn core_mut(&mut self) -> &mut TweenCore;

    /// One-time setup before the first render (capture start values, etc.).
    fn startup(&mut self);

    /// Apply the timeline position described by `cursor`.
    fn render(&mut self, cursor: &Cursor);

    /// Check settings before the playable is registered or nested.
    fn validate(&self) -> Result<()> {
        self.core().validate()
    }

    /// Visit nested playables, if any.
    fn visit_children(&mut self, _f: &mut dyn FnMut(&mut dyn Playable)) {}

    fn kind(&self) -> PlayableKind;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayableKind {
    Tweener,
    Sequence,
}

/// Side effects of one [`goto`] or [`advance`], consumed by the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub started: bool,
    pub steps: u32,
    pub completed: bool,
    pub rewound: bool,
}

/// Move `p` to timeline position `to` (clamped) and render it.
///
/// Runs startup on first use. Fires OnStart, OnUpdate, one OnStepComplete per
/// crossed loop boundary and OnComplete on arrival at the end. A playable that
/// leaves the end stops being `Complete` and is parked as `Paused`; callers
/// decide the final state.
pub fn goto(p: &mut dyn Playable, to: f32, jump: bool, report: &mut Report) {
    seek(p, to, jump, false, report);
}

/// [`goto`] for rewinds and loop re-entry: the value is rendered and OnUpdate
/// fires, but moving back over loop boundaries is not a step completion.
pub(crate) fn reset(p: &mut dyn Playable, to: f32, report: &mut Report) {
    seek(p, to, true, true, report);
}

pub(crate) fn seek(p: &mut dyn Playable, to: f32, jump: bool, reset: bool, report: &mut Report) {
    if !p.core().startup_done {
        p.startup();
        let core = p.core_mut();
        core.startup_done = true;
        report.started = true;
        core.callbacks.start();
    }

    let core = p.core();
    let to = core.clamp_position(to);
    let prev = core.position;
    let from = core.locate(prev);
    let at = core.locate(to);
    let cursor = Cursor {
        cycle: at.cycle,
        local: core.mirror(at.cycle, at.local),
        previous_cycle: from.cycle,
        previous_local: core.mirror(from.cycle, from.local),
        forward: to >= prev,
        jump,
        reset,
    };

    p.core_mut().position = to;
    p.render(&cursor);

    let core = p.core_mut();
    core.callbacks.update();
    if !reset {
        let steps = at.completed.abs_diff(from.completed);
        for _ in 0..steps {
            core.callbacks.step_complete();
        }
        report.steps += steps;
    }
    core.fold();

    if core.is_at_end() {
        if core.state != PlaybackState::Complete {
            core.state = PlaybackState::Complete;
            report.completed = true;
            core.callbacks.complete();
        }
    } else if core.state == PlaybackState::Complete {
        core.state = PlaybackState::Paused;
    }
}

/// Advance a playing root by `dt` in its current direction.
///
/// Forward playback consumes the delay first; the value is untouched until it
/// has elapsed. Backward playback inside the delay unwinds it, again without
/// touching the value. Reaching the start while backwards pauses and fires
/// OnRewind.
pub fn advance(p: &mut dyn Playable, dt: f32, report: &mut Report) {
    let core = p.core_mut();
    let mut dt = dt.max(0.0);
    if core.is_backwards && core.elapsed_delay < core.delay {
        core.elapsed_delay = (core.elapsed_delay - dt).max(0.0);
        if core.elapsed_delay <= 0.0 {
            core.state = PlaybackState::Paused;
            report.rewound = true;
            core.callbacks.rewind();
        }
        return;
    }
    if !core.is_backwards && core.elapsed_delay < core.delay {
        core.elapsed_delay += dt;
        if core.elapsed_delay < core.delay {
            return;
        }
        dt = core.elapsed_delay - core.delay;
        core.elapsed_delay = core.delay;
    }
    let target = if core.is_backwards {
        core.position - dt
    } else {
        core.position + dt
    };
    let backwards = core.is_backwards;
    goto(p, target, false, report);

    let core = p.core_mut();
    if backwards && core.position() <= 0.0 {
        core.state = PlaybackState::Paused;
        report.rewound = true;
        core.callbacks.rewind();
    } else if !core.is_at_end() {
        core.state = PlaybackState::Playing;
    }
}

/// Fluent settings shared by every playable; apply before registration.
pub trait TweenSettings: Playable + Sized {
    fn with_delay(mut self, delay: f32) -> Self {
        self.core_mut().delay = delay;
        self
    }

    /// Play `loops` cycles (0 is read as 1).
    fn with_loops(mut self, loops: u32, loop_type: LoopType) -> Self {
        let core = self.core_mut();
        core.loops = Loops::Count(loops);
        core.loop_type = loop_type;
        self
    }

    fn with_infinite_loops(mut self, loop_type: LoopType) -> Self {
        let core = self.core_mut();
        core.loops = Loops::Infinite;
        core.loop_type = loop_type;
        self
    }

    fn with_ease(mut self, ease: Ease) -> Self {
        self.core_mut().ease = Some(ease);
        self
    }

    /// Overshoot for Back eases, amplitude and period for Elastic eases.
    fn with_ease_params(mut self, overshoot_or_amplitude: f32, period: f32) -> Self {
        let core = self.core_mut();
        core.overshoot_or_amplitude = Some(overshoot_or_amplitude);
        core.period = Some(period);
        self
    }

    /// Treat the end value as an offset from the captured start.
    fn relative(mut self) -> Self {
        self.core_mut().is_relative = true;
        self
    }

    fn with_auto_kill(mut self, auto_kill: bool) -> Self {
        self.core_mut().auto_kill = Some(auto_kill);
        self
    }

    /// Register without starting; a later `play` starts it.
    fn paused(mut self) -> Self {
        self.core_mut().auto_play = Some(false);
        self
    }

    fn with_target(mut self, target: impl Into<TargetRef>) -> Self {
        self.core_mut().target = Some(target.into());
        self
    }

    fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.core_mut().time_scale = time_scale;
        self
    }

    fn on_start(mut self, f: impl FnMut() + 'static) -> Self {
        self.core_mut().callbacks.on_start = Some(Box::new(f));
        self
    }

    fn on_play(mut self, f: impl FnMut() + 'static) -> Self {
        self.core_mut().callbacks.on_play = Some(Box::new(f));
        self
    }

    fn on_pause(mut self, f: impl FnMut() + 'static) -> Self {
        self.core_mut().callbacks.on_pause = Some(Box::new(f));
        self
    }

    fn on_update(mut self, f: impl FnMut() + 'static) -> Self {
        self.core_mut().callbacks.on_update = Some(Box::new(f));
        self
    }

    fn on_step_complete(mut self, f: impl FnMut() + 'static) -> Self {
        self.core_mut().callbacks.on_step_complete = Some(Box::new(f));
        self
    }

    fn on_complete(mut self, f: impl FnMut() + 'static) -> Self {
        self.core_mut().callbacks.on_complete = Some(Box::new(f));
        self
    }

    fn on_rewind(mut self, f: impl FnMut() + 'static) -> Self {
        self.core_mut().callbacks.on_rewind = Some(Box::new(f));
        self
    }

    fn on_kill(mut self, f: impl FnMut() + 'static) -> Self {
        self.core_mut().callbacks.on_kill = Some(Box::new(f));
        self
    }
}

impl<T: Playable + Sized> TweenSettings for T {}

/// Apply config defaults to `p` and everything nested in it.
pub(crate) fn resolve_defaults(p: &mut dyn Playable, cfg: &Config) {
    p.core_mut().resolve_defaults(cfg);
    p.visit_children(&mut |child: &mut dyn Playable| resolve_defaults(child, cfg));
}

/// Mark `p` and its descendants killed, firing OnKill on each.
pub(crate) fn mark_killed(p: &mut dyn Playable) {
    let core = p.core_mut();
    core.state = PlaybackState::Killed;
    core.callbacks.kill();
    p.visit_children(&mut |child: &mut dyn Playable| mark_killed(child));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core(duration: f32, loops: Loops, loop_type: LoopType) -> TweenCore {
        let mut c = TweenCore::new(duration);
        c.loops = loops;
        c.loop_type = loop_type;
        c
    }

    #[test]
    fn locate_splits_cycles_and_pins_the_end() {
        let c = core(2.0, Loops::Count(3), LoopType::Restart);
        assert_eq!(
            c.locate(0.0),
            Located {
                cycle: 0,
                local: 0.0,
                completed: 0
            }
        );
        assert_eq!(c.locate(2.0).cycle, 1);
        assert_eq!(c.locate(2.0).local, 0.0);
        assert_eq!(c.locate(5.0).local, 1.0);
        let end = c.locate(6.0);
        assert_eq!((end.cycle, end.local, end.completed), (2, 2.0, 3));
    }

    #[test]
    fn zero_loops_reads_as_one() {
        let c = core(1.0, Loops::Count(0), LoopType::Restart);
        assert_eq!(c.full_duration(), Some(1.0));
        assert_eq!(core(1.0, Loops::Infinite, LoopType::Yoyo).full_duration(), None);
    }

    #[test]
    fn yoyo_mirrors_odd_cycles() {
        let c = core(2.0, Loops::Count(2), LoopType::Yoyo);
        assert_eq!(c.mirror(0, 0.5), 0.5);
        assert_eq!(c.mirror(1, 0.5), 1.5);
    }

    #[test]
    fn clamp_respects_infinite_loops() {
        let c = core(1.0, Loops::Infinite, LoopType::Restart);
        assert_eq!(c.clamp_position(50.0), 50.0);
        assert_eq!(c.clamp_position(-1.0), 0.0);
        let finite = core(1.0, Loops::Count(2), LoopType::Restart);
        assert_eq!(finite.clamp_position(50.0), 2.0);
    }

    #[test]
    fn infinite_positions_fold_into_one_period() {
        let mut c = core(1.0, Loops::Infinite, LoopType::Restart);
        let local = c.frame(600000.25);
        assert_eq!(local, 0.25);
        assert_eq!(c.folded_cycles, 600000);
        c.position = local;
        assert_eq!(c.completed_loops(), 600000);
        assert_eq!(c.locate(local).local, 0.25);

        c.position = 3.5;
        c.fold();
        assert_eq!((c.position, c.folded_cycles), (0.5, 600003));
        c.position = -0.25;
        c.fold();
        assert_eq!((c.position, c.folded_cycles), (0.75, 600002));
    }

    #[test]
    fn yoyo_folding_keeps_the_direction() {
        let mut c = core(1.0, Loops::Infinite, LoopType::Yoyo);
        let local = c.frame(1001.5);
        assert_eq!(c.folded_cycles % 2, 0);
        let at = c.locate(local);
        assert_eq!(at.cycle, 1001);
        assert_eq!(c.mirror(at.cycle, at.local), 0.5);
    }
}
