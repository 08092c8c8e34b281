//! Deferred control: commands and spawns applied at tick boundaries.
//!
//! Callbacks run while the engine is iterating its registry, so they cannot
//! borrow it. They capture a [`CommandQueue`] instead; whatever they push is
//! applied after the current advance pass, before `update` returns.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::ids::{IdAllocator, TargetRef, TweenId};
use crate::playable::Playable;

/// Selects the root playables a control operation applies to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Filter {
    All,
    Id(TweenId),
    Target(TargetRef),
}

impl From<TweenId> for Filter {
    fn from(id: TweenId) -> Self {
        Filter::Id(id)
    }
}

impl From<TargetRef> for Filter {
    fn from(target: TargetRef) -> Self {
        Filter::Target(target)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TweenCommand {
    Play {
        filter: Filter,
    },
    Pause {
        filter: Filter,
    },
    TogglePause {
        filter: Filter,
    },
    PlayForward {
        filter: Filter,
    },
    PlayBackwards {
        filter: Filter,
    },
    Restart {
        filter: Filter,
        include_delay: bool,
    },
    Rewind {
        filter: Filter,
        include_delay: bool,
    },
    Complete {
        filter: Filter,
    },
    Goto {
        filter: Filter,
        to: f32,
        and_play: bool,
    },
    Flip {
        filter: Filter,
    },
    Kill {
        filter: Filter,
        complete: bool,
    },
}

#[derive(Default)]
pub(crate) struct Shared {
    pub ids: IdAllocator,
    pub commands: Vec<TweenCommand>,
    pub spawns: Vec<(TweenId, Box<dyn Playable>)>,
}

/// Cloneable handle for queueing work from inside callbacks.
#[derive(Clone)]
pub struct CommandQueue {
    pub(crate) shared: Rc<RefCell<Shared>>,
}

impl CommandQueue {
    pub(crate) fn new(shared: Rc<RefCell<Shared>>) -> Self {
        Self { shared }
    }

    pub fn push(&self, command: TweenCommand) {
        self.shared.borrow_mut().commands.push(command);
    }

    /// Queue a playable for registration; its id is valid immediately.
    pub fn spawn(&self, playable: impl Playable + 'static) -> TweenId {
        let mut shared = self.shared.borrow_mut();
        let id = shared.ids.alloc_tween();
        shared.spawns.push((id, Box::new(playable)));
        id
    }

    pub fn kill(&self, filter: impl Into<Filter>, complete: bool) {
        self.push(TweenCommand::Kill {
            filter: filter.into(),
            complete,
        });
    }

    pub fn pause(&self, filter: impl Into<Filter>) {
        self.push(TweenCommand::Pause {
            filter: filter.into(),
        });
    }

    pub fn play(&self, filter: impl Into<Filter>) {
        self.push(TweenCommand::Play {
            filter: filter.into(),
        });
    }

    /// Number of commands and spawns waiting for the next boundary.
    pub fn pending(&self) -> usize {
        let shared = self.shared.borrow();
        shared.commands.len() + shared.spawns.len()
    }
}

impl fmt::Debug for CommandQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandQueue")
            .field("pending", &self.pending())
            .finish()
    }
}
