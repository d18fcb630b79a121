//! Read-side aggregate computations.
//!
//! These are derived values, never stored: dashboards recompute them on
//! every request from the scoped rows the caller may see.

/// Percentage of `part` over `total`, rounded to two decimal places.
/// Returns `0.0` when `total` is zero rather than dividing by zero.
pub fn percentage(part: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    round2(part as f64 / total as f64 * 100.0)
}

/// Marks percentage for a single exam entry, rounded to two decimal places.
pub fn marks_percentage(marks_obtained: i32, total_marks: i32) -> f64 {
    percentage(marks_obtained as i64, total_marks as i64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_percentage_example() {
        // 8 present out of 10 total -> 80.00%
        assert_eq!(percentage(8, 10), 80.0);
    }

    #[test]
    fn test_zero_total_is_zero_not_nan() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(5, 0), 0.0);
    }

    #[test]
    fn test_marks_percentage_example() {
        // 45/50 -> 90.00%
        assert_eq!(marks_percentage(45, 50), 90.0);
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        // 1/3 -> 33.33%
        assert_eq!(percentage(1, 3), 33.33);
        // 2/3 -> 66.67%
        assert_eq!(percentage(2, 3), 66.67);
    }

    #[test]
    fn test_full_attendance() {
        assert_eq!(percentage(10, 10), 100.0);
    }
}
