/// Format a position for display: `m:ss` under an hour, `h:mm:ss` beyond.
///
/// Non-finite values render as `0:00`; negative values clamp to zero.
pub fn format_clock(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "0:00".to_string();
    }
    let total = seconds.max(0.0).floor() as u64;
    let h = total / 3600;
    let m = (total / 60) % 60;
    let s = total % 60;
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}
