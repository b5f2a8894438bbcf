// Console logging and display formatting helpers
use wasm_bindgen::JsValue;

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

pub fn cwarn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

/// Wall-clock time of day (UTC) for a millisecond timestamp, `HH:MM:SS.mmm`.
pub fn format_clock(at_ms: f64) -> String {
    let total_ms = at_ms.max(0.0) as u64;
    let ms = total_ms % 1000;
    let secs = total_ms / 1000;
    let h = (secs / 3600) % 24;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    format!("{:02}:{:02}:{:02}.{:03}", h, m, s, ms)
}

pub fn format_degrees(deg: f64) -> String {
    format!("{:.1}°", deg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_wraps_at_midnight() {
        assert_eq!(format_clock(0.0), "00:00:00.000");
        assert_eq!(format_clock(3_723_004.0), "01:02:03.004");
        assert_eq!(format_clock(86_400_000.0 + 61_000.0), "00:01:01.000");
        assert_eq!(format_clock(-5.0), "00:00:00.000");
    }

    #[test]
    fn degrees_have_one_decimal() {
        assert_eq!(format_degrees(15.0), "15.0°");
        assert_eq!(format_degrees(-7.5), "-7.5°");
    }
}
