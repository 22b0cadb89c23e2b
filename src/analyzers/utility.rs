/// Integer floor division of a salary sum by a positive count.
pub fn floor_div(sum: i64, count: u64) -> i64 {
    sum.div_euclid(count as i64)
}

/// `part / total` rounded to four decimals, the way `"{:.4f}"` formatting does.
pub fn round_share(part: u64, total: u64) -> f64 {
    let ratio = part as f64 / total as f64;
    format!("{ratio:.4}").parse().unwrap_or(ratio)
}

/// Renders a share as a percentage truncated (not rounded) to two decimals.
///
/// The float arithmetic and the shortest-repr formatting are kept as-is so
/// that `0.0029` becomes `0.28%` and `0.07` becomes `7.0%`.
pub fn display_percent(share: f64) -> String {
    let percent = (share * 10000.0).floor() / 100.0;
    format!("{percent:?}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_div() {
        assert_eq!(floor_div(5500, 2), 2750);
        assert_eq!(floor_div(7, 2), 3);
        assert_eq!(floor_div(-7, 2), -4);
        assert_eq!(floor_div(0, 3), 0);
    }

    #[test]
    fn test_round_share() {
        assert_eq!(round_share(1, 3), 0.3333);
        assert_eq!(round_share(2, 3), 0.6667);
        assert_eq!(round_share(1, 7), 0.1429);
        assert_eq!(round_share(5, 5), 1.0);
    }

    #[test]
    fn test_display_percent() {
        assert_eq!(display_percent(0.3333), "33.33%");
        assert_eq!(display_percent(0.1429), "14.29%");
        assert_eq!(display_percent(0.07), "7.0%");
        assert_eq!(display_percent(1.0), "100.0%");
    }

    #[test]
    fn test_display_percent_truncates() {
        assert_eq!(display_percent(0.0029), "0.28%");
        assert_eq!(display_percent(0.0003), "0.02%");
        assert_eq!(display_percent(0.12349), "12.34%");
    }
}
