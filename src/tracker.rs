//! Manipulation tracker: turns partial gesture samples into start/update/end
//! transitions. It never logs or renders; callers act on the returned
//! `Transition`.

use std::fmt;

use crate::model::{Manipulation, Point};
use crate::settings::FieldSet;

/// One tick from the recognizer. Every field is independently optional.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureSample {
    /// Degrees since the gesture started.
    pub rotation: Option<f64>,
    pub magnification: Option<f64>,
    pub drag: Option<Point>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum TrackerState {
    #[default]
    Idle,
    Active(Manipulation),
}

#[derive(Clone, Debug, PartialEq)]
pub enum TransitionEvent {
    Started(Manipulation),
    Updated {
        previous: Manipulation,
        current: Manipulation,
    },
    /// Carries the last snapshot of the gesture; this is what gets committed.
    Ended(Manipulation),
}

impl fmt::Display for TransitionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionEvent::Started(m) => write!(f, "Gesture started nil -> ({})", m),
            TransitionEvent::Updated { previous, current } => {
                write!(f, "Gesture updated ({}) -> ({})", previous, current)
            }
            TransitionEvent::Ended(m) => write!(f, "Gesture ended, ({}) -> nil", m),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Diagnostic {
    /// Rotation sample that was not a normal float; dropped for this tick.
    DiscardedRotation(f64),
    /// Active gesture dropped without a commit, e.g. by a settings change.
    Abandoned(Manipulation),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DiscardedRotation(v) => write!(f, "Rotation is not normal? {}", v),
            Diagnostic::Abandoned(m) => write!(f, "Gesture abandoned, ({}) -> nil", m),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transition {
    pub event: Option<TransitionEvent>,
    pub diagnostic: Option<Diagnostic>,
}

/// Zero, NaN, infinities and subnormals are all rejected: a degenerate
/// two-finger geometry yields one of these and none of them is a real
/// rotation.
pub fn accept_rotation(raw: Option<f64>) -> (Option<f64>, Option<Diagnostic>) {
    match raw {
        Some(v) if v.is_normal() => (Some(v), None),
        Some(v) => (None, Some(Diagnostic::DiscardedRotation(v))),
        None => (None, None),
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ManipulationTracker {
    state: TrackerState,
    fields: FieldSet,
}

impl ManipulationTracker {
    pub fn new(fields: FieldSet) -> Self {
        Self {
            state: TrackerState::Idle,
            fields,
        }
    }

    pub fn fields(&self) -> FieldSet {
        self.fields
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, TrackerState::Active(_))
    }

    pub fn current(&self) -> Option<&Manipulation> {
        match &self.state {
            TrackerState::Active(m) => Some(m),
            TrackerState::Idle => None,
        }
    }

    /// Build the snapshot for one sample. Only fields present in the sample
    /// (and enabled in the field set) end up in it; nothing is merged from
    /// the previous snapshot.
    fn snapshot(&self, sample: GestureSample) -> (Manipulation, Option<Diagnostic>) {
        let (rotation, diagnostic) = if self.fields.rotate {
            accept_rotation(sample.rotation)
        } else {
            (None, None)
        };
        let m = Manipulation {
            magnification: sample.magnification.filter(|_| self.fields.magnify),
            rotation,
            drag: sample.drag.filter(|_| self.fields.drag),
        };
        (m, diagnostic)
    }

    pub fn on_sample(&mut self, sample: GestureSample) -> Transition {
        let (current, diagnostic) = self.snapshot(sample);
        let previous = std::mem::replace(&mut self.state, TrackerState::Active(current));
        let event = match previous {
            TrackerState::Idle => Some(TransitionEvent::Started(current)),
            TrackerState::Active(previous) if previous != current => {
                Some(TransitionEvent::Updated { previous, current })
            }
            TrackerState::Active(_) => None,
        };
        Transition { event, diagnostic }
    }

    /// The recognizer reported completion. Ending an idle tracker is a no-op.
    pub fn on_end(&mut self) -> Transition {
        let event = match std::mem::take(&mut self.state) {
            TrackerState::Active(last) => Some(TransitionEvent::Ended(last)),
            TrackerState::Idle => None,
        };
        Transition {
            event,
            diagnostic: None,
        }
    }

    /// Drop an active gesture without producing an end event.
    pub fn abandon(&mut self) -> Option<Manipulation> {
        match std::mem::take(&mut self.state) {
            TrackerState::Active(m) => Some(m),
            TrackerState::Idle => None,
        }
    }
}
