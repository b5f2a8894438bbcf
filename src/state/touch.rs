// Touch extraction from browser events, relative to the stage element
use web_sys::{DomRect, TouchList};

use crate::recognizer::TouchPoint;

/// Every touch currently on the surface, in stage coordinates, ordered by
/// identifier so finger pairs stay stable across events.
pub fn touch_points(list: &TouchList, origin: &DomRect) -> Vec<TouchPoint> {
    let mut points: Vec<TouchPoint> = (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| TouchPoint {
            id: t.identifier(),
            x: t.client_x() as f64 - origin.left(),
            y: t.client_y() as f64 - origin.top(),
        })
        .collect();
    points.sort_by_key(|p| p.id);
    points
}
