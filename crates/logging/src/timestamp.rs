use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current time as whole seconds since the Unix epoch.
pub(crate) fn now_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

/// Formats a Unix epoch timestamp as `YYYY/MM/DD HH:MM:SS`.
///
/// The conversion is performed manually so the log format needs no external
/// date dependency.
pub(crate) fn format_timestamp(epoch_secs: u64) -> String {
    let total_days = epoch_secs / 86400;
    let day_seconds = (epoch_secs % 86400) as u32;
    let hours = day_seconds / 3600;
    let minutes = (day_seconds % 3600) / 60;
    let seconds = day_seconds % 60;

    // Civil date from day count using the algorithm from
    // Howard Hinnant's `chrono`-compatible date conversion.
    let (year, month, day) = civil_from_days(total_days as i64);

    format!("{year:04}/{month:02}/{day:02} {hours:02}:{minutes:02}:{seconds:02}")
}

/// Converts a day count (days since 1970-01-01) to a civil date (year, month, day).
///
/// Algorithm from Howard Hinnant's date library (public domain).
fn civil_from_days(days: i64) -> (i32, u32, u32) {
    let z = days + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y as i32, m, d)
}
