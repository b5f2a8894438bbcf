pub mod screen;
pub mod touch;

pub use screen::{LogEntry, ScreenAction, ScreenState};
pub use touch::touch_points;
