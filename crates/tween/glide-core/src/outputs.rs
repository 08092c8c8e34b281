//! Output contract of [`crate::TweenEngine::update`].
//!
//! Values are pushed straight into the accessors; outputs only carry the
//! semantic lifecycle events of root playables for hosts that prefer polling
//! over callbacks.

use serde::{Deserialize, Serialize};

use crate::ids::TweenId;

/// Discrete lifecycle signals for root playables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TweenEvent {
    Played { id: TweenId },
    Paused { id: TweenId },
    /// First render after the delay; start values were captured.
    Started { id: TweenId },
    StepCompleted { id: TweenId, completed_loops: u32 },
    Completed { id: TweenId },
    Rewound { id: TweenId },
    Killed { id: TweenId },
}

impl TweenEvent {
    pub fn id(&self) -> TweenId {
        match self {
            TweenEvent::Played { id }
            | TweenEvent::Paused { id }
            | TweenEvent::Started { id }
            | TweenEvent::StepCompleted { id, .. }
            | TweenEvent::Completed { id }
            | TweenEvent::Rewound { id }
            | TweenEvent::Killed { id } => *id,
        }
    }
}

/// Per-tick outputs.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    pub events: Vec<TweenEvent>,
}

impl Outputs {
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events concerning one playable, in emission order.
    pub fn events_for(&self, id: TweenId) -> impl Iterator<Item = &TweenEvent> {
        self.events.iter().filter(move |e| e.id() == id)
    }
}
