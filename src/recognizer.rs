//! Two-finger touch recognizer. Turns the raw set of touch points delivered by
//! the browser into partial `GestureSample`s, applying the recognition
//! thresholds and carrying values forward once a channel is recognized.

use crate::model::Point;
use crate::settings::{FieldSet, Thresholds};
use crate::tracker::GestureSample;

/// Finger distances below this cannot serve as a magnification baseline.
const MIN_BASELINE_PX: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub id: i32,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SourceSignal {
    Nothing,
    Sample(GestureSample),
    Ended,
}

/// Anything that can produce gesture samples from a stream of touch sets.
/// A source restarts on its own: after `Ended` the next touch begins a new
/// gesture.
pub trait GestureSource {
    /// Called with every touch currently on the surface after each host
    /// touch event. An empty slice means the last finger lifted.
    fn touches_changed(&mut self, touches: &[TouchPoint]) -> SourceSignal;

    /// The host cancelled the touch sequence.
    fn cancel(&mut self) -> SourceSignal;

    /// Drop the gesture in progress. Touches still on the surface are
    /// ignored until every finger has lifted.
    fn reset(&mut self);
}

#[derive(Clone, Debug)]
struct PairTrack {
    ids: (i32, i32),
    /// Unit vector from the first to the second finger at the last tick
    /// where the fingers were apart.
    last_unit: Option<(f64, f64)>,
    start_distance: f64,
    /// Magnification reached before this pair formed.
    scale_base: f64,
}

#[derive(Clone, Debug)]
struct DragTrack {
    start: Point,
    last: Point,
    /// Compensates centroid jumps when fingers are added or lifted.
    shift: (f64, f64),
    fingers: usize,
    recognized: bool,
}

#[derive(Clone, Debug, Default)]
struct GestureTrack {
    pair: Option<PairTrack>,
    rotation_total: f64,
    rotation_recognized: bool,
    magnification: Option<f64>,
    magnify_recognized: bool,
    drag: Option<DragTrack>,
}

#[derive(Clone, Debug)]
pub struct TouchRecognizer {
    thresholds: Thresholds,
    fields: FieldSet,
    gesture: Option<GestureTrack>,
    /// Set by `reset` while fingers are still down.
    suppressed: bool,
}

fn unit_vector(a: &TouchPoint, b: &TouchPoint) -> ((f64, f64), f64) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let dist = (dx * dx + dy * dy).sqrt();
    // Coincident fingers give a NaN direction.
    ((dx / dist, dy / dist), dist)
}

/// Signed angle in degrees from `from` to `to`, clockwise positive in screen
/// coordinates.
fn signed_angle(from: (f64, f64), to: (f64, f64)) -> f64 {
    let cross = from.0 * to.1 - from.1 * to.0;
    let dot = from.0 * to.0 + from.1 * to.1;
    cross.atan2(dot).to_degrees()
}

fn centroid(touches: &[TouchPoint]) -> Point {
    let n = touches.len() as f64;
    let (sx, sy) = touches
        .iter()
        .fold((0.0, 0.0), |(sx, sy), t| (sx + t.x, sy + t.y));
    Point::new(sx / n, sy / n)
}

impl TouchRecognizer {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            fields: FieldSet::default(),
            gesture: None,
            suppressed: false,
        }
    }

    pub fn set_thresholds(&mut self, thresholds: Thresholds) {
        self.thresholds = thresholds;
    }

    /// Disabled channels are never recognized and never reported.
    pub fn set_fields(&mut self, fields: FieldSet) {
        self.fields = fields;
    }

    /// Returns the raw rotation for this tick (NaN for degenerate geometry),
    /// or `None` when fewer than two fingers are down.
    fn track_pair(g: &mut GestureTrack, touches: &[TouchPoint]) -> Option<f64> {
        let (a, b) = match touches {
            [a, b, ..] => (a, b),
            _ => {
                g.pair = None;
                return None;
            }
        };
        let (unit, dist) = unit_vector(a, b);
        let apart = unit.0.is_finite() && unit.1.is_finite();
        let ids = (a.id, b.id);
        if !g.pair.as_ref().is_some_and(|p| p.ids == ids) {
            g.pair = Some(PairTrack {
                ids,
                last_unit: apart.then_some(unit),
                start_distance: dist,
                scale_base: g.magnification.unwrap_or(1.0),
            });
            return Some(g.rotation_total);
        }
        let Some(pair) = g.pair.as_mut() else {
            return None;
        };

        let step = match pair.last_unit {
            Some(prev) => signed_angle(prev, unit),
            // First direction seen for this pair becomes the baseline
            None if apart => 0.0,
            None => f64::NAN,
        };
        let raw = if step.is_finite() {
            g.rotation_total += step;
            g.rotation_total
        } else {
            step
        };
        if apart {
            pair.last_unit = Some(unit);
        }

        if pair.start_distance < MIN_BASELINE_PX {
            pair.start_distance = dist;
            pair.scale_base = g.magnification.unwrap_or(1.0);
        } else {
            g.magnification = Some(pair.scale_base * dist / pair.start_distance);
        }
        Some(raw)
    }

    fn track_drag(&self, g: &mut GestureTrack, touches: &[TouchPoint]) -> Point {
        let c = centroid(touches);
        let drag = g.drag.get_or_insert(DragTrack {
            start: c,
            last: c,
            shift: (0.0, 0.0),
            fingers: touches.len(),
            recognized: false,
        });
        if drag.fingers != touches.len() {
            drag.shift = (drag.last.x - c.x, drag.last.y - c.y);
            drag.fingers = touches.len();
        }
        let pos = Point::new(c.x + drag.shift.0, c.y + drag.shift.1);
        drag.last = pos;
        if self.fields.drag
            && !drag.recognized
            && pos.distance_to(drag.start) >= self.thresholds.min_drag_distance
        {
            drag.recognized = true;
        }
        pos
    }
}

impl GestureSource for TouchRecognizer {
    fn touches_changed(&mut self, touches: &[TouchPoint]) -> SourceSignal {
        if self.suppressed {
            self.suppressed = !touches.is_empty();
            return SourceSignal::Nothing;
        }
        if touches.is_empty() {
            return match self.gesture.take() {
                Some(_) => SourceSignal::Ended,
                None => SourceSignal::Nothing,
            };
        }
        let mut g = self.gesture.take().unwrap_or_default();

        let raw_rotation = Self::track_pair(&mut g, touches);
        if let Some(r) = raw_rotation {
            if self.fields.rotate
                && !g.rotation_recognized
                && r.is_finite()
                && r.abs() >= self.thresholds.min_angle_delta
            {
                g.rotation_recognized = true;
            }
        }
        if let Some(m) = g.magnification {
            if self.fields.magnify
                && !g.magnify_recognized
                && (m - 1.0).abs() >= self.thresholds.min_scale_delta
            {
                g.magnify_recognized = true;
            }
        }
        let position = self.track_drag(&mut g, touches);

        // Fields can change mid-gesture
        let rotating = self.fields.rotate && g.rotation_recognized;
        let magnifying = self.fields.magnify && g.magnify_recognized;
        let dragging = self.fields.drag && g.drag.as_ref().is_some_and(|d| d.recognized);
        let sample = GestureSample {
            rotation: rotating.then(|| raw_rotation.unwrap_or(g.rotation_total)),
            magnification: g.magnification.filter(|_| magnifying),
            drag: dragging.then_some(position),
        };
        let any = rotating || magnifying || dragging;
        self.gesture = Some(g);

        if any {
            SourceSignal::Sample(sample)
        } else {
            SourceSignal::Nothing
        }
    }

    fn cancel(&mut self) -> SourceSignal {
        self.suppressed = false;
        self.touches_changed(&[])
    }

    fn reset(&mut self) {
        if self.gesture.take().is_some() {
            self.suppressed = true;
        }
    }
}
