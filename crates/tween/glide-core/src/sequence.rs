//! Sequence: composite playable laying children out on one timeline.
//!
//! Children are owned; their local time is the sequence's cycle-local position
//! minus their insertion offset, clamped to `[0, child span]`. A child that has
//! not been reached yet is left untouched; one that has been passed holds its
//! boundary value. Children are driven in offset order when moving forward and
//! in reverse order when moving backward, so the latest writer of a shared
//! property wins in both directions.

use std::fmt;

use crate::error::{ensure_non_negative, TweenError};
use crate::playable::{
    seek, Cursor, PlaybackState, Playable, PlayableKind, Report, TweenCore,
};
use crate::Result;

struct Item {
    offset: f32,
    playable: Box<dyn Playable>,
}

struct TimedCallback {
    at: f32,
    callback: Box<dyn FnMut()>,
}

pub struct Sequence {
    core: TweenCore,
    items: Vec<Item>,
    callbacks: Vec<TimedCallback>,
    last_offset: f32,
    cursor: f32,
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequence {
    pub fn new() -> Self {
        Self {
            core: TweenCore::new(0.0),
            items: Vec::new(),
            callbacks: Vec::new(),
            last_offset: 0.0,
            cursor: 0.0,
        }
    }

    /// Length of one cycle of the sequence.
    pub fn duration(&self) -> f32 {
        self.core.duration
    }

    /// Number of nested playables.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insertion offsets of the nested playables, in timeline order.
    pub fn offsets(&self) -> Vec<f32> {
        self.items.iter().map(|i| i.offset).collect()
    }

    /// Place `playable` at the current end of the sequence.
    pub fn append(&mut self, playable: impl Playable + 'static) -> Result<&mut Self> {
        let at = self.core.duration;
        self.insert(at, playable)
    }

    /// Place `playable` at the offset of the last appended or inserted child.
    pub fn join(&mut self, playable: impl Playable + 'static) -> Result<&mut Self> {
        let at = self.last_offset;
        self.insert(at, playable)
    }

    /// Place `playable` at offset `at`; it may overlap siblings.
    pub fn insert(&mut self, at: f32, playable: impl Playable + 'static) -> Result<&mut Self> {
        ensure_non_negative("insert offset", at)?;
        let span = Self::child_span(&playable)?;
        let idx = self.items.partition_point(|i| i.offset <= at);
        self.items.insert(
            idx,
            Item {
                offset: at,
                playable: Box::new(playable),
            },
        );
        self.last_offset = at;
        self.core.duration = self.core.duration.max(at + span);
        Ok(self)
    }

    /// Place `playable` at offset 0, pushing everything else back by its span.
    pub fn prepend(&mut self, playable: impl Playable + 'static) -> Result<&mut Self> {
        let span = Self::child_span(&playable)?;
        self.shift(span);
        self.items.insert(
            0,
            Item {
                offset: 0.0,
                playable: Box::new(playable),
            },
        );
        self.last_offset = 0.0;
        Ok(self)
    }

    /// Extend the end of the sequence by an empty gap.
    pub fn append_interval(&mut self, interval: f32) -> Result<&mut Self> {
        ensure_non_negative("interval", interval)?;
        self.core.duration += interval;
        Ok(self)
    }

    /// Push everything back by an empty gap at the start.
    pub fn prepend_interval(&mut self, interval: f32) -> Result<&mut Self> {
        ensure_non_negative("interval", interval)?;
        self.shift(interval);
        Ok(self)
    }

    /// Fire `callback` when playback reaches the current end of the sequence.
    pub fn append_callback(&mut self, callback: impl FnMut() + 'static) -> &mut Self {
        let at = self.core.duration;
        self.place_callback(at, Box::new(callback));
        self
    }

    /// Fire `callback` whenever the sequence's position crosses `at`.
    pub fn insert_callback(
        &mut self,
        at: f32,
        callback: impl FnMut() + 'static,
    ) -> Result<&mut Self> {
        ensure_non_negative("callback offset", at)?;
        self.place_callback(at, Box::new(callback));
        self.core.duration = self.core.duration.max(at);
        Ok(self)
    }

    fn place_callback(&mut self, at: f32, callback: Box<dyn FnMut()>) {
        let idx = self.callbacks.partition_point(|c| c.at <= at);
        self.callbacks.insert(idx, TimedCallback { at, callback });
    }

    fn shift(&mut self, by: f32) {
        for item in &mut self.items {
            item.offset += by;
        }
        for cb in &mut self.callbacks {
            cb.at += by;
        }
        self.last_offset += by;
        self.core.duration += by;
    }

    fn child_span(playable: &dyn Playable) -> Result<f32> {
        playable.validate()?;
        playable.core().span().ok_or_else(|| {
            TweenError::invalid("infinite loops are not allowed inside a sequence")
        })
    }

    /// Move every child to sequence-local position `to`. A `reset` move (rewind,
    /// loop re-entry) skips timed callbacks and children's step completions.
    fn drive(&mut self, to: f32, jump: bool, reset: bool) {
        let from = self.cursor;
        let forward = to >= from;
        if forward {
            for item in self.items.iter_mut() {
                drive_item(item, to, jump, reset);
            }
        } else {
            for item in self.items.iter_mut().rev() {
                drive_item(item, to, jump, reset);
            }
        }
        if !reset {
            if forward {
                for cb in self.callbacks.iter_mut() {
                    let crossed = (cb.at > from && cb.at <= to)
                        || (cb.at == 0.0 && from == 0.0 && to > 0.0);
                    if crossed {
                        (cb.callback)();
                    }
                }
            } else {
                for cb in self.callbacks.iter_mut().rev() {
                    if cb.at < from && cb.at >= to {
                        (cb.callback)();
                    }
                }
            }
        }
        self.cursor = to;
    }
}

fn drive_item(item: &mut Item, to: f32, jump: bool, reset: bool) {
    let child = item.playable.as_mut();
    let local = to - item.offset;
    let core = child.core();
    if !core.startup_done && local <= core.delay {
        return;
    }
    let position = core.clamp_position(local - core.delay);
    if core.startup_done && position == core.position {
        return;
    }
    let delay = core.delay;
    child.core_mut().elapsed_delay = local.clamp(0.0, delay);
    let mut report = Report::default();
    seek(child, position, jump || reset, reset, &mut report);
    let core = child.core_mut();
    if !core.is_at_end() {
        core.state = PlaybackState::Playing;
    }
}

impl Playable for Sequence {
    fn core(&self) -> &TweenCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut TweenCore {
        &mut self.core
    }

    fn startup(&mut self) {
        self.cursor = 0.0;
    }

    fn render(&mut self, cursor: &Cursor) {
        if cursor.reset {
            self.drive(cursor.local, true, true);
            return;
        }
        if !cursor.jump && cursor.cycle != cursor.previous_cycle {
            let d = self.core.duration;
            let (exit, entry) = if cursor.forward {
                (
                    self.core.mirror(cursor.previous_cycle, d),
                    self.core.mirror(cursor.cycle, 0.0),
                )
            } else {
                (
                    self.core.mirror(cursor.previous_cycle, 0.0),
                    self.core.mirror(cursor.cycle, d),
                )
            };
            self.drive(exit, false, false);
            self.drive(entry, true, true);
        }
        self.drive(cursor.local, cursor.jump, false);
    }

    fn validate(&self) -> Result<()> {
        self.core.validate()?;
        for item in &self.items {
            item.playable.validate()?;
        }
        Ok(())
    }

    fn visit_children(&mut self, f: &mut dyn FnMut(&mut dyn Playable)) {
        for item in &mut self.items {
            f(item.playable.as_mut());
        }
    }

    fn kind(&self) -> PlayableKind {
        PlayableKind::Sequence
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("core", &self.core)
            .field("offsets", &self.offsets())
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}
