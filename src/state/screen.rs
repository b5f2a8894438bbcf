use std::collections::VecDeque;
use std::rc::Rc;
use yew::Reducible;

use crate::model::{ObjectState, SnapRule, commit};
use crate::recognizer::SourceSignal;
use crate::settings::Settings;
use crate::tracker::{Diagnostic, ManipulationTracker, Transition, TransitionEvent};

pub const LOG_CAPACITY: usize = 50;

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    /// Milliseconds since the epoch, as reported by the host clock.
    pub at_ms: f64,
    pub text: String,
    pub warning: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScreenState {
    pub object: ObjectState,
    pub tracker: ManipulationTracker,
    pub snap: SnapRule,
    /// Outcome of the most recent action, for the console trace.
    pub last: Transition,
    pub log: VecDeque<LogEntry>,
    /// Bumped on every change so effects can key on it.
    pub version: u64,
    /// Bumped on reset and reconfigure; touch sources drop their gesture
    /// when it changes.
    pub generation: u64,
}

impl ScreenState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            object: ObjectState::default(),
            tracker: ManipulationTracker::new(settings.fields),
            snap: settings.snap,
            last: Transition::default(),
            log: VecDeque::with_capacity(LOG_CAPACITY),
            version: 0,
            generation: 0,
        }
    }

    /// Persistent state with the active manipulation applied, for rendering.
    pub fn preview(&self) -> ObjectState {
        self.object.preview(self.tracker.current())
    }

    fn push_log(&mut self, at_ms: f64, text: String, warning: bool) {
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(LogEntry {
            at_ms,
            text,
            warning,
        });
    }

    fn record(&mut self, at_ms: f64, transition: Transition) {
        if let Some(d) = &transition.diagnostic {
            self.push_log(at_ms, d.to_string(), true);
        }
        if let Some(ev) = &transition.event {
            self.push_log(at_ms, ev.to_string(), false);
        }
        self.last = transition;
    }
}

#[derive(Clone, Debug)]
pub enum ScreenAction {
    Signal { signal: SourceSignal, at_ms: f64 },
    /// Back to the initial object; an active gesture is dropped uncommitted.
    Reset { at_ms: f64 },
    /// New settings; an active gesture is dropped uncommitted.
    Configure { settings: Settings, at_ms: f64 },
}

impl Reducible for ScreenState {
    type Action = ScreenAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use ScreenAction::*;
        let mut new = (*self).clone();
        match action {
            Signal { signal, at_ms } => {
                let transition = match signal {
                    SourceSignal::Nothing => return self,
                    SourceSignal::Sample(sample) => new.tracker.on_sample(sample),
                    SourceSignal::Ended => new.tracker.on_end(),
                };
                if let Some(TransitionEvent::Ended(last)) = &transition.event {
                    new.object = commit(&new.object, last, &new.snap);
                }
                if transition == Transition::default() {
                    return self;
                }
                new.record(at_ms, transition);
            }
            Reset { at_ms } => {
                new.tracker.abandon();
                new.object = ObjectState::default();
                new.last = Transition::default();
                new.generation = new.generation.wrapping_add(1);
                new.push_log(at_ms, "Object reset".to_string(), false);
            }
            Configure { settings, at_ms } => {
                let abandoned = new.tracker.abandon();
                new.tracker = ManipulationTracker::new(settings.fields);
                new.snap = settings.snap;
                new.generation = new.generation.wrapping_add(1);
                new.record(
                    at_ms,
                    Transition {
                        event: None,
                        diagnostic: abandoned.map(Diagnostic::Abandoned),
                    },
                );
            }
        }
        new.version = new.version.wrapping_add(1);
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Point, SnapMode};
    use crate::recognizer::{GestureSource, TouchPoint, TouchRecognizer};
    use crate::settings::Preset;
    use crate::tracker::GestureSample;

    fn signal(state: Rc<ScreenState>, signal: SourceSignal) -> Rc<ScreenState> {
        state.reduce(ScreenAction::Signal { signal, at_ms: 0.0 })
    }

    fn sample(rotation: Option<f64>, magnification: Option<f64>, drag: Option<Point>) -> SourceSignal {
        SourceSignal::Sample(GestureSample {
            rotation,
            magnification,
            drag,
        })
    }

    fn tp(id: i32, x: f64, y: f64) -> TouchPoint {
        TouchPoint { id, x, y }
    }

    fn finger_pair(cx: f64, cy: f64, radius: f64, deg: f64) -> Vec<TouchPoint> {
        let r = deg.to_radians();
        let (dx, dy) = (radius * r.cos(), radius * r.sin());
        vec![tp(1, cx - dx, cy - dy), tp(2, cx + dx, cy + dy)]
    }

    fn recognizer_for(settings: &Settings) -> TouchRecognizer {
        let mut r = TouchRecognizer::new(settings.thresholds);
        r.set_fields(settings.fields);
        r
    }

    /// Feeds each touch set through the recognizer into the reducer.
    fn touch(
        mut state: Rc<ScreenState>,
        recognizer: &mut TouchRecognizer,
        frames: &[Vec<TouchPoint>],
    ) -> Rc<ScreenState> {
        for touches in frames {
            state = signal(state, recognizer.touches_changed(touches));
        }
        state
    }

    #[test]
    fn one_finger_swipe_is_not_a_gesture_under_rotate_preset() {
        let settings = Preset::Rotate.settings();
        let mut r = recognizer_for(&settings);
        let s = Rc::new(ScreenState::new(&settings));
        let s = touch(
            s,
            &mut r,
            &[vec![tp(1, 10.0, 10.0)], vec![tp(1, 60.0, 10.0)]],
        );
        assert!(!s.tracker.is_active());
        assert_eq!(s.last, Transition::default());
        let s = touch(s, &mut r, &[vec![]]);
        assert_eq!(s.version, 0);
        assert!(s.log.is_empty());
        assert_eq!(s.object, ObjectState::default());
    }

    #[test]
    fn pinch_under_rotate_preset_only_rotates() {
        let settings = Preset::Rotate.settings();
        let mut r = recognizer_for(&settings);
        let s = Rc::new(ScreenState::new(&settings));
        let s = touch(
            s,
            &mut r,
            &[
                finger_pair(100.0, 100.0, 50.0, 0.0),
                finger_pair(100.0, 100.0, 100.0, 0.0),
            ],
        );
        assert!(!s.tracker.is_active());

        let s = touch(s, &mut r, &[finger_pair(100.0, 100.0, 100.0, 20.0)]);
        let current = *s.tracker.current().unwrap();
        assert!(current.rotation.is_some());
        assert_eq!(current.magnification, None);
        assert_eq!(current.drag, None);

        let s = touch(s, &mut r, &[vec![]]);
        assert_eq!(s.object.rotation, 15.0);
        assert_eq!(s.object.width, 200.0);
        assert_eq!(s.object.position, None);
    }

    #[test]
    fn full_gesture_under_rotate_magnify_drag_preset() {
        let settings = Preset::RotateMagnifyDrag.settings();
        let mut r = recognizer_for(&settings);
        let s = Rc::new(ScreenState::new(&settings));
        let s = touch(
            s,
            &mut r,
            &[
                finger_pair(100.0, 100.0, 50.0, 0.0),
                finger_pair(140.0, 130.0, 75.0, 20.0),
            ],
        );
        assert!(s.tracker.is_active());
        assert!(s.log[0].text.starts_with("Gesture started"));

        let s = touch(s, &mut r, &[vec![]]);
        assert!(!s.tracker.is_active());
        assert_eq!(s.object.rotation, 15.0);
        assert!((s.object.width - 300.0).abs() < 1e-6);
        assert!((s.object.height - 300.0).abs() < 1e-6);
        let pos = s.object.position.unwrap();
        assert!((pos.x - 140.0).abs() < 1e-9);
        assert!((pos.y - 130.0).abs() < 1e-9);
    }

    #[test]
    fn reconfigure_drops_the_touch_gesture_in_progress() {
        let settings = Settings::default();
        let mut r = recognizer_for(&settings);
        let s = Rc::new(ScreenState::new(&settings));
        let s = touch(
            s,
            &mut r,
            &[
                finger_pair(100.0, 100.0, 50.0, 0.0),
                finger_pair(100.0, 100.0, 50.0, 40.0),
            ],
        );
        assert!(s.tracker.is_active());

        let mut nearest = settings.clone();
        nearest.snap.mode = SnapMode::Nearest;
        let seen = s.generation;
        let s = s.reduce(ScreenAction::Configure {
            settings: nearest,
            at_ms: 0.0,
        });
        assert_ne!(s.generation, seen);
        r.reset();

        let s = touch(
            s,
            &mut r,
            &[finger_pair(100.0, 100.0, 50.0, 41.0), vec![]],
        );
        assert!(!s.tracker.is_active());
        assert_eq!(s.object, ObjectState::default());
        assert!(s.log.back().unwrap().text.starts_with("Gesture abandoned"));

        // The next touch sequence is tracked from scratch
        let s = touch(
            s,
            &mut r,
            &[
                finger_pair(100.0, 100.0, 50.0, 0.0),
                finger_pair(100.0, 100.0, 50.0, 10.0),
                vec![],
            ],
        );
        assert_eq!(s.object.rotation, 15.0);
    }

    #[test]
    fn reset_drops_the_touch_gesture_in_progress() {
        let settings = Settings::default();
        let mut r = recognizer_for(&settings);
        let s = Rc::new(ScreenState::new(&settings));
        let s = touch(
            s,
            &mut r,
            &[
                finger_pair(100.0, 100.0, 50.0, 0.0),
                finger_pair(100.0, 100.0, 50.0, 40.0),
            ],
        );
        let s = s.reduce(ScreenAction::Reset { at_ms: 0.0 });
        r.reset();
        let s = touch(
            s,
            &mut r,
            &[finger_pair(100.0, 100.0, 50.0, 60.0), vec![]],
        );
        assert_eq!(s.object, ObjectState::default());
        assert_eq!(s.log.back().unwrap().text, "Object reset");
    }

    #[test]
    fn rotate_magnify_gesture_commits_on_end() {
        let s = Rc::new(ScreenState::new(&Settings::default()));
        let s = signal(s, sample(Some(8.0), None, None));
        let s = signal(s, sample(Some(20.0), Some(1.5), None));
        assert!(s.tracker.is_active());
        assert_eq!(s.object, ObjectState::default());
        assert_eq!(s.preview().width, 300.0);
        assert_eq!(s.preview().rotation, 20.0);

        let s = signal(s, SourceSignal::Ended);
        assert!(!s.tracker.is_active());
        assert_eq!(s.object.rotation, 15.0);
        assert_eq!(s.object.width, 300.0);
        assert_eq!(s.object.height, 300.0);
        assert_eq!(s.preview(), s.object);
        assert_eq!(s.log.len(), 3);
        assert!(s.log.back().unwrap().text.starts_with("Gesture ended"));
    }

    #[test]
    fn drag_only_gesture_moves_object_only() {
        let s = Rc::new(ScreenState::new(&Settings::default()));
        let s = signal(s, sample(None, None, Some(Point::new(50.0, 60.0))));
        let s = signal(s, SourceSignal::Ended);
        assert_eq!(s.object.position, Some(Point::new(50.0, 60.0)));
        assert_eq!(s.object.width, 200.0);
        assert_eq!(s.object.rotation, 0.0);
    }

    #[test]
    fn drag_is_ignored_by_rotate_only_preset() {
        let s = Rc::new(ScreenState::new(&Preset::Rotate.settings()));
        let s = signal(s, sample(Some(33.0), Some(2.0), Some(Point::new(5.0, 5.0))));
        let s = signal(s, SourceSignal::Ended);
        assert_eq!(s.object.rotation, 30.0);
        assert_eq!(s.object.width, 200.0);
        assert_eq!(s.object.position, None);
    }

    #[test]
    fn nothing_and_idle_end_do_not_bump_version() {
        let s = Rc::new(ScreenState::new(&Settings::default()));
        let s = signal(s, SourceSignal::Nothing);
        let s = signal(s, SourceSignal::Ended);
        assert_eq!(s.version, 0);
        assert!(s.log.is_empty());
    }

    #[test]
    fn discarded_rotation_is_logged_as_warning() {
        let s = Rc::new(ScreenState::new(&Settings::default()));
        let s = signal(s, sample(Some(f64::NAN), Some(1.2), None));
        assert!(s.last.diagnostic.is_some());
        assert!(s.log[0].warning);
        assert!(s.log[0].text.starts_with("Rotation is not normal?"));
        let s = signal(s, SourceSignal::Ended);
        assert_eq!(s.object.rotation, 0.0);
    }

    #[test]
    fn configure_mid_gesture_abandons_without_commit() {
        let s = Rc::new(ScreenState::new(&Settings::default()));
        let s = signal(s, sample(Some(40.0), None, None));
        let s = s.reduce(ScreenAction::Configure {
            settings: Preset::RotateMagnify.settings(),
            at_ms: 0.0,
        });
        assert!(!s.tracker.is_active());
        assert!(!s.tracker.fields().drag);
        assert_eq!(s.last.event, None);
        assert!(matches!(
            s.last.diagnostic,
            Some(Diagnostic::Abandoned(m)) if m.rotation == Some(40.0)
        ));
        assert!(s.log.back().unwrap().warning);
        let s = signal(s, SourceSignal::Ended);
        assert_eq!(s.object.rotation, 0.0);
    }

    #[test]
    fn configure_while_idle_logs_nothing() {
        let s = Rc::new(ScreenState::new(&Settings::default()));
        let s = s.reduce(ScreenAction::Configure {
            settings: Preset::Rotate.settings(),
            at_ms: 0.0,
        });
        assert_eq!(s.last, Transition::default());
        assert!(s.log.is_empty());
    }

    #[test]
    fn reset_restores_defaults() {
        let s = Rc::new(ScreenState::new(&Settings::default()));
        let s = signal(s, sample(Some(50.0), Some(2.0), None));
        let s = signal(s, SourceSignal::Ended);
        assert_ne!(s.object, ObjectState::default());
        let s = s.reduce(ScreenAction::Reset { at_ms: 0.0 });
        assert_eq!(s.object, ObjectState::default());
    }

    #[test]
    fn log_is_bounded() {
        let mut s = Rc::new(ScreenState::new(&Settings::default()));
        for i in 0..(LOG_CAPACITY + 20) {
            s = signal(s, sample(Some(10.0 + i as f64), None, None));
        }
        assert_eq!(s.log.len(), LOG_CAPACITY);
    }
}
