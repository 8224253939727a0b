use chrono::{DateTime, Local};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const CLOCK_FORMAT: &str = "%H:%M:%S";
}

/// Wall-clock time of day, e.g. `14:03:27`.
pub fn format_local_time(ts: DateTime<Local>) -> String {
    ts.format(TimeUtils::CLOCK_FORMAT).to_string()
}

pub fn format_duration(ms: i64) -> String {
    let secs = ms / TimeUtils::MS_IN_S;
    if secs < 60 {
        return format!("{}s", secs);
    }
    let mins = secs / 60;
    if mins < 60 {
        let rem_secs = secs % 60;
        if rem_secs > 0 {
            return format!("{}m {}s", mins, rem_secs);
        }
        return format!("{}m", mins);
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }
    format!("{}d", hours / 24)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn durations_use_the_largest_sensible_unit() {
        assert_eq!(format_duration(45_000), "45s");
        assert_eq!(format_duration(300_000), "5m");
        assert_eq!(format_duration(90_000), "1m 30s");
        assert_eq!(format_duration(7_200_000), "2h");
        assert_eq!(format_duration(3 * 86_400_000), "3d");
    }

    #[test]
    fn local_time_is_clock_format() {
        let ts = Local.with_ymd_and_hms(2024, 1, 2, 9, 5, 7).unwrap();
        assert_eq!(format_local_time(ts), "09:05:07");
    }
}
