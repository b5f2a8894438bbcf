//! Tracker configuration: which gesture channels are live, recognizer
//! thresholds, snapping and the manipulated subject. Persisted as JSON in
//! localStorage.

use serde::{Deserialize, Serialize};

use crate::model::{SnapMode, SnapRule};

pub const STORAGE_KEY: &str = "gt_settings";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSet {
    pub rotate: bool,
    pub magnify: bool,
    pub drag: bool,
}

impl Default for FieldSet {
    fn default() -> Self {
        Self {
            rotate: true,
            magnify: true,
            drag: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
    #[default]
    Rectangle,
    Image,
}

/// Minimum movement before a channel is recognized.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Degrees.
    pub min_angle_delta: f64,
    /// Absolute change of the scale factor away from 1.0.
    pub min_scale_delta: f64,
    /// Stage units (CSS px).
    pub min_drag_distance: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_angle_delta: 5.0,
            min_scale_delta: 0.1,
            min_drag_distance: 5.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fields: FieldSet,
    pub subject: Subject,
    pub snap: SnapRule,
    pub thresholds: Thresholds,
}

impl Settings {
    pub fn from_json(raw: &str) -> Option<Settings> {
        serde_json::from_str::<Settings>(raw).ok().map(Settings::sanitized)
    }

    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }

    /// Replace values the tracker cannot work with by their defaults.
    pub fn sanitized(mut self) -> Settings {
        let snap_default = SnapRule::default();
        if !(self.snap.step.is_finite() && self.snap.step > 0.0) {
            self.snap.step = snap_default.step;
        }
        let th = Thresholds::default();
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if !valid(self.thresholds.min_angle_delta) {
            self.thresholds.min_angle_delta = th.min_angle_delta;
        }
        if !valid(self.thresholds.min_scale_delta) {
            self.thresholds.min_scale_delta = th.min_scale_delta;
        }
        if !valid(self.thresholds.min_drag_distance) {
            self.thresholds.min_drag_distance = th.min_drag_distance;
        }
        self
    }

    /// The preset whose channels and subject match, if any.
    pub fn preset(&self) -> Option<Preset> {
        Preset::ALL.into_iter().find(|p| {
            let s = p.settings();
            s.fields == self.fields && s.subject == self.subject
        })
    }

    /// Apply a preset's channels and subject, keeping thresholds and snapping.
    pub fn with_preset(&self, preset: Preset) -> Settings {
        let p = preset.settings();
        Settings {
            fields: p.fields,
            subject: p.subject,
            ..self.clone()
        }
    }

    pub fn load() -> Settings {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(Some(raw)) = store.get_item(STORAGE_KEY) {
                    if let Some(s) = Settings::from_json(&raw) {
                        return s;
                    }
                }
            }
        }
        Settings::default()
    }

    pub fn save(&self) {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Some(raw) = self.to_json() {
                    let _ = store.set_item(STORAGE_KEY, &raw);
                }
            }
        }
    }

    pub fn clear_saved() {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                let _ = store.remove_item(STORAGE_KEY);
            }
        }
    }
}

/// The four screens the demo grew through, oldest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preset {
    Rotate,
    RotateMagnify,
    RotateMagnifyDrag,
    ImageRotateMagnifyDrag,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Rotate,
        Preset::RotateMagnify,
        Preset::RotateMagnifyDrag,
        Preset::ImageRotateMagnifyDrag,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Preset::Rotate => "Rotate",
            Preset::RotateMagnify => "Rotate + Magnify",
            Preset::RotateMagnifyDrag => "Rotate + Magnify + Drag",
            Preset::ImageRotateMagnifyDrag => "Image: Rotate + Magnify + Drag",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Preset::Rotate => "rotate",
            Preset::RotateMagnify => "rotate_magnify",
            Preset::RotateMagnifyDrag => "rotate_magnify_drag",
            Preset::ImageRotateMagnifyDrag => "image",
        }
    }

    pub fn from_key(key: &str) -> Option<Preset> {
        Preset::ALL.into_iter().find(|p| p.key() == key)
    }

    pub fn settings(&self) -> Settings {
        let fields = match self {
            Preset::Rotate => FieldSet {
                rotate: true,
                magnify: false,
                drag: false,
            },
            Preset::RotateMagnify => FieldSet {
                rotate: true,
                magnify: true,
                drag: false,
            },
            Preset::RotateMagnifyDrag | Preset::ImageRotateMagnifyDrag => FieldSet::default(),
        };
        let subject = match self {
            Preset::ImageRotateMagnifyDrag => Subject::Image,
            _ => Subject::Rectangle,
        };
        Settings {
            fields,
            subject,
            ..Default::default()
        }
    }
}

pub fn snap_mode_label(mode: SnapMode) -> &'static str {
    match mode {
        SnapMode::Truncate => "Truncate toward zero",
        SnapMode::Nearest => "Nearest step",
    }
}
