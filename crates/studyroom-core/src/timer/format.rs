//! Duration rendering for the two timers.

/// Countdown style: `mm:ss`, growing to `hh:mm:ss` once an hour is left.
pub fn format_countdown(secs: u64) -> String {
    let (h, m, s) = split(secs);
    if h > 0 {
        format!("{h:02}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

/// Stopwatch style: always `hh:mm:ss`.
pub fn format_hms(secs: u64) -> String {
    let (h, m, s) = split(secs);
    format!("{h:02}:{m:02}:{s:02}")
}

fn split(secs: u64) -> (u64, u64, u64) {
    (secs / 3600, (secs % 3600) / 60, secs % 60)
}
