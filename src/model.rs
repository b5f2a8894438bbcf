//! Core data models for the gesture tester.
//! The persistent object only changes through `commit` when a gesture ends;
//! everything in between is an ephemeral `Manipulation` owned by the tracker.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectState {
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Centre of the object in stage coordinates. `None` keeps it centred on the stage.
    pub position: Option<Point>,
}

impl Default for ObjectState {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 200.0,
            rotation: 0.0,
            position: None,
        }
    }
}

impl ObjectState {
    /// What the host should draw right now: the persistent state with the
    /// in-progress manipulation layered on top. No snapping is applied here.
    pub fn preview(&self, active: Option<&Manipulation>) -> ObjectState {
        let Some(m) = active else {
            return self.clone();
        };
        let scale = m.magnification.unwrap_or(1.0);
        ObjectState {
            width: self.width * scale,
            height: self.height * scale,
            rotation: self.rotation + m.rotation.unwrap_or(0.0),
            position: m.drag.or(self.position),
        }
    }
}

/// In-progress, not yet committed delta of an active gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Manipulation {
    /// Scale factor relative to the start of the gesture.
    pub magnification: Option<f64>,
    /// Rotation delta in degrees relative to the start of the gesture.
    pub rotation: Option<f64>,
    /// Absolute drag location in stage coordinates.
    pub drag: Option<Point>,
}

impl Manipulation {
    pub fn is_empty(&self) -> bool {
        self.magnification.is_none() && self.rotation.is_none() && self.drag.is_none()
    }
}

impl fmt::Display for Manipulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = [
            self.magnification.map(|m| format!("magnify: {:.2}", m)),
            self.rotation.map(|r| format!("rotate: {:.2}", r)),
            self.drag.map(|p| format!("drag: ({:.1}, {:.1})", p.x, p.y)),
        ]
        .into_iter()
        .flatten()
        .collect();
        write!(f, "{}", parts.join(", "))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapMode {
    /// `total - total % step`, remainder truncated toward zero.
    #[default]
    Truncate,
    /// IEEE remainder: snaps to the nearest multiple, ties to even.
    Nearest,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapRule {
    /// Angular grid in degrees.
    pub step: f64,
    pub mode: SnapMode,
}

impl Default for SnapRule {
    fn default() -> Self {
        Self {
            step: 15.0,
            mode: SnapMode::Truncate,
        }
    }
}

impl SnapRule {
    pub fn apply(&self, total: f64) -> f64 {
        match self.mode {
            SnapMode::Truncate => total - total % self.step,
            SnapMode::Nearest => total - ieee_remainder(total, self.step),
        }
    }
}

fn ieee_remainder(x: f64, y: f64) -> f64 {
    x - y * (x / y).round_ties_even()
}

/// Fold a finished manipulation into the persistent state. Fields absent
/// from the snapshot leave the matching persistent field untouched.
pub fn commit(state: &ObjectState, snapshot: &Manipulation, snap: &SnapRule) -> ObjectState {
    let mut next = state.clone();
    if let Some(delta) = snapshot.rotation {
        next.rotation = snap.apply(state.rotation + delta);
    }
    if let Some(factor) = snapshot.magnification {
        next.width = state.width * factor;
        next.height = state.height * factor;
    }
    if let Some(p) = snapshot.drag {
        next.position = Some(p);
    }
    next
}
