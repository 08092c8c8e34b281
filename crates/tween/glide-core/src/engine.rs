//! Engine: registry of root playables, the per-tick driver and control dispatch.
//!
//! Methods:
//! - new, add, commands, update (queue -> advance -> autokill -> queue)
//! - play, pause, toggle_pause, play_forward, play_backwards, restart, rewind,
//!   complete, goto, flip, kill; each takes a [`Filter`] and returns the count affected
//! - status, is_tweening, ids_for_target, len, playing_count, clear

use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::commands::{CommandQueue, Filter, Shared, TweenCommand};
use crate::config::Config;
use crate::ids::{TargetRef, TweenId};
use crate::outputs::{Outputs, TweenEvent};
use crate::playable::{
    advance, goto, mark_killed, reset, resolve_defaults, LoopType, Loops, PlaybackState, Playable,
    PlayableKind, Report, TweenCore,
};
use crate::Result;

/// Snapshot of one registered playable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TweenStatus {
    pub id: TweenId,
    pub kind: PlayableKind,
    pub state: PlaybackState,
    pub target: Option<TargetRef>,
    pub delay: f32,
    pub duration: f32,
    pub loops: Loops,
    pub loop_type: LoopType,
    pub position: f32,
    pub elapsed_delay: f32,
    pub completed_loops: u32,
    pub is_backwards: bool,
    pub auto_kill: bool,
}

#[derive(Default)]
struct Outcome {
    affected: bool,
    kill: bool,
}

impl Outcome {
    fn affected(affected: bool) -> Self {
        Self {
            affected,
            kill: false,
        }
    }
}

/// Owns every root playable and drives them from the host's frame loop.
pub struct TweenEngine {
    cfg: Config,
    time_scale: f32,
    shared: Rc<RefCell<Shared>>,
    tweens: IndexMap<TweenId, Box<dyn Playable>>,
    by_target: HashMap<TargetRef, IndexSet<TweenId>>,
    pending_events: Vec<TweenEvent>,
    outputs: Outputs,
}

impl Default for TweenEngine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl TweenEngine {
    pub fn new(cfg: Config) -> Self {
        Self {
            time_scale: cfg.time_scale,
            tweens: IndexMap::with_capacity(cfg.initial_capacity),
            by_target: HashMap::new(),
            shared: Rc::new(RefCell::new(Shared::default())),
            pending_events: Vec::new(),
            outputs: Outputs::default(),
            cfg,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Global multiplier for every tick delta; negative or non-finite input is ignored.
    pub fn set_time_scale(&mut self, time_scale: f32) {
        if time_scale.is_finite() && time_scale >= 0.0 {
            self.time_scale = time_scale;
        }
    }

    /// Queue handle for callbacks; work is applied at the next tick boundary.
    pub fn commands(&self) -> CommandQueue {
        CommandQueue::new(Rc::clone(&self.shared))
    }

    /// Validate and register a root playable. Unset settings take the config defaults.
    pub fn add<P: Playable + 'static>(&mut self, playable: P) -> Result<TweenId> {
        let id = self.shared.borrow_mut().ids.alloc_tween();
        self.register(id, Box::new(playable))?;
        Ok(id)
    }

    fn register(&mut self, id: TweenId, mut playable: Box<dyn Playable>) -> Result<()> {
        playable.validate()?;
        resolve_defaults(playable.as_mut(), &self.cfg);
        if let Some(target) = playable.core().target() {
            self.by_target.entry(target).or_default().insert(id);
        }
        debug!(%id, kind = ?playable.kind(), "registered playable");
        self.tweens.insert(id, playable);
        Ok(())
    }

    /// Advance every playing root by `dt` and return this tick's events.
    pub fn update(&mut self, dt: f32) -> &Outputs {
        self.outputs.clear();
        self.flush_queue();

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 } * self.time_scale;
        let mut finished = Vec::new();
        for (&id, playable) in self.tweens.iter_mut() {
            let p = playable.as_mut();
            if p.core().state() == PlaybackState::Init {
                if !p.core().auto_play() {
                    continue;
                }
                let core = p.core_mut();
                core.state = PlaybackState::Playing;
                core.callbacks.play();
                self.pending_events.push(TweenEvent::Played { id });
            }
            if p.core().state() != PlaybackState::Playing {
                continue;
            }
            let mut report = Report::default();
            let step = dt * p.core().time_scale();
            advance(p, step, &mut report);
            push_report(id, p.core(), &report, &mut self.pending_events);
            if report.completed && p.core().auto_kill() {
                finished.push(id);
            }
        }
        let autokilled = finished.len();
        for id in finished {
            self.remove(id);
        }
        self.flush_queue();

        let cap = self.cfg.max_events_per_tick;
        if self.pending_events.len() > cap {
            warn!(
                dropped = self.pending_events.len() - cap,
                cap, "event cap reached; dropping newest events"
            );
            self.pending_events.truncate(cap);
        }
        self.outputs.events.append(&mut self.pending_events);
        trace!(active = self.tweens.len(), autokilled, "tick");
        &self.outputs
    }

    /// Apply queued spawns and commands. Commands queued by callbacks fired
    /// here are picked up by the following rounds, up to a fixed bound.
    fn flush_queue(&mut self) {
        const MAX_ROUNDS: usize = 16;
        for _ in 0..MAX_ROUNDS {
            let (spawns, commands) = {
                let mut shared = self.shared.borrow_mut();
                (
                    std::mem::take(&mut shared.spawns),
                    std::mem::take(&mut shared.commands),
                )
            };
            if spawns.is_empty() && commands.is_empty() {
                return;
            }
            for (id, playable) in spawns {
                if let Err(err) = self.register(id, playable) {
                    warn!(%id, error = %err, "queued playable rejected");
                }
            }
            for command in commands {
                self.apply(command);
            }
        }
    }

    /// Run one command immediately; returns the count affected.
    pub fn apply(&mut self, command: TweenCommand) -> usize {
        match command {
            TweenCommand::Play { filter } => self.play(filter),
            TweenCommand::Pause { filter } => self.pause(filter),
            TweenCommand::TogglePause { filter } => self.toggle_pause(filter),
            TweenCommand::PlayForward { filter } => self.play_forward(filter),
            TweenCommand::PlayBackwards { filter } => self.play_backwards(filter),
            TweenCommand::Restart {
                filter,
                include_delay,
            } => self.restart(filter, include_delay),
            TweenCommand::Rewind {
                filter,
                include_delay,
            } => self.rewind(filter, include_delay),
            TweenCommand::Complete { filter } => self.complete(filter),
            TweenCommand::Goto {
                filter,
                to,
                and_play,
            } => self.goto(filter, to, and_play),
            TweenCommand::Flip { filter } => self.flip(filter),
            TweenCommand::Kill { filter, complete } => self.kill(filter, complete),
        }
    }

    pub fn play(&mut self, filter: impl Into<Filter>) -> usize {
        self.dispatch(filter.into(), |id, p, events| {
            Outcome::affected(start_playing(id, p, events))
        })
    }

    pub fn pause(&mut self, filter: impl Into<Filter>) -> usize {
        self.dispatch(filter.into(), |id, p, events| {
            Outcome::affected(pause_one(id, p, events))
        })
    }

    pub fn toggle_pause(&mut self, filter: impl Into<Filter>) -> usize {
        self.dispatch(filter.into(), |id, p, events| {
            let changed = if p.core().state().is_playing() {
                pause_one(id, p, events)
            } else {
                start_playing(id, p, events)
            };
            Outcome::affected(changed)
        })
    }

    /// Play towards the end.
    pub fn play_forward(&mut self, filter: impl Into<Filter>) -> usize {
        self.dispatch(filter.into(), |id, p, events| {
            let flipped = std::mem::replace(&mut p.core_mut().is_backwards, false);
            let started = start_playing(id, p, events);
            Outcome::affected(flipped || started)
        })
    }

    /// Play towards the start.
    pub fn play_backwards(&mut self, filter: impl Into<Filter>) -> usize {
        self.dispatch(filter.into(), |id, p, events| {
            let flipped = !std::mem::replace(&mut p.core_mut().is_backwards, true);
            let started = start_playing(id, p, events);
            Outcome::affected(flipped || started)
        })
    }

    /// Back to position 0 and play forward. With `include_delay` the delay runs again.
    pub fn restart(&mut self, filter: impl Into<Filter>, include_delay: bool) -> usize {
        self.dispatch(filter.into(), |id, p, events| {
            rewind_one(id, p, include_delay, events);
            let core = p.core_mut();
            core.is_backwards = false;
            if core.state != PlaybackState::Playing {
                core.state = PlaybackState::Playing;
                core.callbacks.play();
                events.push(TweenEvent::Played { id });
            }
            Outcome::affected(true)
        })
    }

    /// Back to position 0, applying the start value, and pause.
    pub fn rewind(&mut self, filter: impl Into<Filter>, include_delay: bool) -> usize {
        self.dispatch(filter.into(), |id, p, events| {
            let was_playing = p.core().state().is_playing();
            rewind_one(id, p, include_delay, events);
            let core = p.core_mut();
            core.state = PlaybackState::Paused;
            if was_playing {
                core.callbacks.pause();
                events.push(TweenEvent::Paused { id });
            }
            Outcome::affected(true)
        })
    }

    /// Jump to the end of the last loop. Infinite loops cannot complete.
    pub fn complete(&mut self, filter: impl Into<Filter>) -> usize {
        self.dispatch(filter.into(), complete_one)
    }

    /// Seek to `to` (clamped), then play or pause.
    pub fn goto(&mut self, filter: impl Into<Filter>, to: f32, and_play: bool) -> usize {
        self.dispatch(filter.into(), |id, p, events| {
            let core = p.core_mut();
            core.elapsed_delay = core.delay;
            let to = core.frame(to);
            let mut report = Report::default();
            goto(p, to, true, &mut report);
            push_report(id, p.core(), &report, events);
            let core = p.core_mut();
            if core.is_at_end() {
                core.state = PlaybackState::Complete;
                return Outcome {
                    affected: true,
                    kill: core.auto_kill(),
                };
            }
            if and_play {
                if core.state != PlaybackState::Playing {
                    core.state = PlaybackState::Playing;
                    core.callbacks.play();
                    events.push(TweenEvent::Played { id });
                }
            } else {
                core.state = PlaybackState::Paused;
            }
            Outcome::affected(true)
        })
    }

    /// Reverse the direction of subsequent advancement; the position is kept.
    pub fn flip(&mut self, filter: impl Into<Filter>) -> usize {
        self.dispatch(filter.into(), |_, p, _| {
            let core = p.core_mut();
            core.is_backwards = !core.is_backwards;
            Outcome::affected(true)
        })
    }

    /// Deregister, optionally completing first. Unknown or killed handles count 0.
    pub fn kill(&mut self, filter: impl Into<Filter>, complete: bool) -> usize {
        let ids = self.matching(filter.into());
        let mut killed = 0;
        for id in ids {
            if complete {
                if let Some(p) = self.tweens.get_mut(&id) {
                    complete_one(id, p.as_mut(), &mut self.pending_events);
                }
            }
            if self.remove(id) {
                killed += 1;
            }
        }
        killed
    }

    pub fn kill_all(&mut self, complete: bool) -> usize {
        self.kill(Filter::All, complete)
    }

    /// Kill everything without completing and drop queued work.
    pub fn clear(&mut self) -> usize {
        {
            let mut shared = self.shared.borrow_mut();
            shared.spawns.clear();
            shared.commands.clear();
        }
        self.kill(Filter::All, false)
    }

    pub fn status(&self, id: TweenId) -> Option<TweenStatus> {
        let p = self.tweens.get(&id)?;
        let core = p.core();
        Some(TweenStatus {
            id,
            kind: p.kind(),
            state: core.state(),
            target: core.target(),
            delay: core.delay(),
            duration: core.duration(),
            loops: core.loops(),
            loop_type: core.loop_type(),
            position: core.position(),
            elapsed_delay: core.elapsed_delay(),
            completed_loops: core.completed_loops(),
            is_backwards: core.is_backwards(),
            auto_kill: core.auto_kill(),
        })
    }

    /// Borrow a registered playable's shared state.
    pub fn core(&self, id: TweenId) -> Option<&TweenCore> {
        self.tweens.get(&id).map(|p| p.core())
    }

    pub fn contains(&self, id: TweenId) -> bool {
        self.tweens.contains_key(&id)
    }

    /// True if any registered playable carries `target`.
    pub fn is_tweening(&self, target: TargetRef) -> bool {
        self.by_target.get(&target).is_some_and(|s| !s.is_empty())
    }

    pub fn ids_for_target(&self, target: TargetRef) -> Vec<TweenId> {
        self.matching(Filter::Target(target))
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> Vec<TweenId> {
        self.tweens.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn playing_count(&self) -> usize {
        self.tweens
            .values()
            .filter(|p| p.core().state().is_playing())
            .count()
    }

    fn matching(&self, filter: Filter) -> Vec<TweenId> {
        match filter {
            Filter::All => self.tweens.keys().copied().collect(),
            Filter::Id(id) if self.tweens.contains_key(&id) => vec![id],
            Filter::Id(_) => Vec::new(),
            Filter::Target(target) => self
                .by_target
                .get(&target)
                .map(|ids| ids.iter().copied().collect())
                .unwrap_or_default(),
        }
    }

    fn dispatch(
        &mut self,
        filter: Filter,
        mut op: impl FnMut(TweenId, &mut dyn Playable, &mut Vec<TweenEvent>) -> Outcome,
    ) -> usize {
        let mut affected = 0;
        let mut kills = Vec::new();
        for id in self.matching(filter) {
            let Some(p) = self.tweens.get_mut(&id) else {
                continue;
            };
            let outcome = op(id, p.as_mut(), &mut self.pending_events);
            if outcome.affected {
                affected += 1;
            }
            if outcome.kill {
                kills.push(id);
            }
        }
        for id in kills {
            self.remove(id);
        }
        affected
    }

    fn remove(&mut self, id: TweenId) -> bool {
        let Some(mut playable) = self.tweens.shift_remove(&id) else {
            return false;
        };
        let state = playable.core().state();
        if let Some(target) = playable.core().target() {
            if let Some(ids) = self.by_target.get_mut(&target) {
                ids.shift_remove(&id);
                if ids.is_empty() {
                    self.by_target.remove(&target);
                }
            }
        }
        mark_killed(playable.as_mut());
        self.pending_events.push(TweenEvent::Killed { id });
        debug!(%id, from = state.name(), "killed playable");
        true
    }
}

impl Drop for TweenEngine {
    fn drop(&mut self) {
        // Queued spawns may hold callbacks that captured a CommandQueue.
        if let Ok(mut shared) = self.shared.try_borrow_mut() {
            shared.spawns.clear();
            shared.commands.clear();
        }
    }
}

impl std::fmt::Debug for TweenEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenEngine")
            .field("cfg", &self.cfg)
            .field("time_scale", &self.time_scale)
            .field("tweens", &self.tweens.len())
            .field("targets", &self.by_target.len())
            .finish()
    }
}

fn push_report(id: TweenId, core: &TweenCore, report: &Report, events: &mut Vec<TweenEvent>) {
    if report.started {
        events.push(TweenEvent::Started { id });
    }
    if report.steps > 0 {
        events.push(TweenEvent::StepCompleted {
            id,
            completed_loops: core.completed_loops(),
        });
    }
    if report.completed {
        events.push(TweenEvent::Completed { id });
    }
    if report.rewound {
        events.push(TweenEvent::Rewound { id });
    }
}

/// Enter `Playing` unless there is nothing left to play in the current direction.
fn start_playing(id: TweenId, p: &mut dyn Playable, events: &mut Vec<TweenEvent>) -> bool {
    let core = p.core_mut();
    let can_play = match core.state {
        PlaybackState::Playing | PlaybackState::Killed => false,
        PlaybackState::Complete => core.is_backwards,
        PlaybackState::Init | PlaybackState::Paused => {
            !(core.is_backwards && core.startup_done && core.position() <= 0.0)
        }
    };
    if can_play {
        core.state = PlaybackState::Playing;
        core.callbacks.play();
        events.push(TweenEvent::Played { id });
    }
    can_play
}

fn pause_one(id: TweenId, p: &mut dyn Playable, events: &mut Vec<TweenEvent>) -> bool {
    let core = p.core_mut();
    if !core.state.can_pause() {
        return false;
    }
    core.state = PlaybackState::Paused;
    core.callbacks.pause();
    events.push(TweenEvent::Paused { id });
    true
}

/// Position 0 with the start value applied. Leaves the state to the caller.
fn rewind_one(
    id: TweenId,
    p: &mut dyn Playable,
    include_delay: bool,
    events: &mut Vec<TweenEvent>,
) {
    let core = p.core_mut();
    core.elapsed_delay = if include_delay { 0.0 } else { core.delay };
    let to = core.frame(0.0);
    let mut report = Report::default();
    reset(p, to, &mut report);
    report.rewound = true;
    let core = p.core_mut();
    core.callbacks.rewind();
    push_report(id, core, &report, events);
}

fn complete_one(id: TweenId, p: &mut dyn Playable, events: &mut Vec<TweenEvent>) -> Outcome {
    let core = p.core();
    let Some(full) = core.full_duration() else {
        return Outcome::default();
    };
    if core.state() == PlaybackState::Complete {
        return Outcome::default();
    }
    let core = p.core_mut();
    core.elapsed_delay = core.delay;
    let mut report = Report::default();
    goto(p, full, true, &mut report);
    push_report(id, p.core(), &report, events);
    debug!(%id, "completed playable");
    let core = p.core_mut();
    core.state = PlaybackState::Complete;
    Outcome {
        affected: true,
        kill: core.auto_kill(),
    }
}
