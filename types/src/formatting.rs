//! Countdown and duration formatting shared by overlay rendering and logs.

/// Format a countdown for the spell button face.
///
/// Summoner cooldowns top out at 330 s, so plain seconds stay at three
/// digits and remain readable at button size.
pub fn format_countdown(remaining_secs: u32) -> String {
    remaining_secs.to_string()
}

/// Format a duration in seconds as M:SS (log output, tooltips).
pub fn format_duration(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(0), "0");
        assert_eq!(format_countdown(9), "9");
        assert_eq!(format_countdown(300), "300");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(59), "0:59");
        assert_eq!(format_duration(300), "5:00");
        assert_eq!(format_duration(330), "5:30");
    }
}
