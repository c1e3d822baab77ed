pub const SECS_PER_MINUTE: u32 = 60;

/// Render a number of seconds as zero-padded `MM:SS`.
///
/// There is no hour field, minutes simply keep growing past 59.
pub fn format_mm_ss(total_secs: u32) -> String {
    let (minutes, seconds) = split_mm_ss(total_secs);
    format!("{:02}:{:02}", minutes, seconds)
}

pub fn split_mm_ss(total_secs: u32) -> (u32, u32) {
    (total_secs / SECS_PER_MINUTE, total_secs % SECS_PER_MINUTE)
}

/// Minutes to seconds, `None` when the result does not fit in a `u32`.
pub fn minutes_to_secs(minutes: u32) -> Option<u32> {
    minutes.checked_mul(SECS_PER_MINUTE)
}
