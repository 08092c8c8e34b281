//! Tweener: leaf playable animating one value through a [`ValuePlugin`].

use std::fmt;

use crate::accessor::Accessor;
use crate::error::ensure_positive;
use crate::playable::{Cursor, LoopType, Playable, PlayableKind, TweenCore};
use crate::plugins::ValuePlugin;
use crate::Result;

/// Start, end and change captured at startup.
#[derive(Clone, Debug)]
struct Resolved<S> {
    start: S,
    end: S,
    change: S,
}

pub struct Tweener<P: ValuePlugin> {
    core: TweenCore,
    plugin: P,
    accessor: Accessor<P::Value>,
    end: P::Stored,
    explicit_start: Option<P::Stored>,
    resolved: Option<Resolved<P::Stored>>,
}

impl<P: ValuePlugin> Tweener<P> {
    /// Tween the accessor's value to `end` over `duration` per loop cycle.
    pub fn new(
        plugin: P,
        accessor: Accessor<P::Value>,
        end: P::Stored,
        duration: f32,
    ) -> Result<Self> {
        ensure_positive("duration", duration)?;
        plugin.validate()?;
        plugin.check_stored(&end)?;
        Ok(Self {
            core: TweenCore::new(duration),
            plugin,
            accessor,
            end,
            explicit_start: None,
            resolved: None,
        })
    }

    /// Start from `start` instead of reading the accessor at startup.
    pub fn with_start(mut self, start: P::Stored) -> Self {
        self.explicit_start = Some(start);
        self
    }

    pub fn plugin(&self) -> &P {
        &self.plugin
    }

    /// Captured start value; `None` before startup.
    pub fn start_value(&self) -> Option<&P::Stored> {
        self.resolved.as_ref().map(|r| &r.start)
    }

    /// Absolute end value; `None` before startup.
    pub fn end_value(&self) -> Option<&P::Stored> {
        self.resolved.as_ref().map(|r| &r.end)
    }

    pub fn change_value(&self) -> Option<&P::Stored> {
        self.resolved.as_ref().map(|r| &r.change)
    }

    fn value_at(&self, r: &Resolved<P::Stored>, cycle: u32, local: f32) -> P::Value {
        let plugin = &self.plugin;
        let incremental = self.core.loop_type == LoopType::Incremental && cycle > 0;
        if local <= 0.0 {
            if incremental {
                plugin.to_value(&plugin.advance(&r.start, &r.change, cycle))
            } else {
                plugin.to_value(&r.start)
            }
        } else if local >= self.core.duration {
            if incremental {
                plugin.to_value(&plugin.advance(&r.start, &r.change, cycle + 1))
            } else {
                plugin.to_value(&r.end)
            }
        } else {
            let eased = self.core.eased(local);
            if incremental {
                let base = plugin.advance(&r.start, &r.change, cycle);
                plugin.interpolate(&base, &r.change, eased)
            } else {
                plugin.interpolate(&r.start, &r.change, eased)
            }
        }
    }
}

impl<P: ValuePlugin> Playable for Tweener<P> {
    fn core(&self) -> &TweenCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut TweenCore {
        &mut self.core
    }

    fn startup(&mut self) {
        let start = match &self.explicit_start {
            Some(start) => start.clone(),
            None => {
                let current = self.accessor.get();
                self.plugin.to_stored(current)
            }
        };
        let relative = self.core.is_relative;
        self.plugin.prepare(&start, relative);
        let end = self.plugin.resolve_end(&start, &self.end, relative);
        let change = self.plugin.change(&start, &end);
        self.resolved = Some(Resolved { start, end, change });
    }

    fn render(&mut self, cursor: &Cursor) {
        let Some(resolved) = self.resolved.as_ref() else {
            return;
        };
        let mut value = self.value_at(resolved, cursor.cycle, cursor.local);
        if self.plugin.is_partial() {
            let current = self.accessor.get();
            value = self.plugin.merge(current, value);
        }
        self.accessor.set(value);
    }

    fn validate(&self) -> Result<()> {
        self.core.validate()?;
        ensure_positive("duration", self.core.duration)?;
        self.plugin.validate()?;
        self.plugin.check_stored(&self.end)?;
        if let Some(start) = &self.explicit_start {
            self.plugin.check_stored(start)?;
        }
        Ok(())
    }

    fn kind(&self) -> PlayableKind {
        PlayableKind::Tweener
    }
}

impl<P: ValuePlugin> fmt::Debug for Tweener<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tweener")
            .field("plugin", &self.plugin.name())
            .field("core", &self.core)
            .field("end", &self.end)
            .field("start", &self.start_value())
            .finish()
    }
}
