// controls.rs - Lenient parsing of the numeric control fields
//
// Text typed into the speed/rows/cols boxes never produces an error: it is
// parsed as leniently as possible, falls back to the current value, and is
// clamped to the range the controls allow.

use crate::grid::GridSize;

pub const MIN_UI_TICK_MS: u64 = 10;
pub const MAX_UI_TICK_MS: u64 = 2000;
pub const MIN_GRID_DIMENSION: usize = 5;
pub const MAX_GRID_DIMENSION: usize = 200;

/// Parses the leading integer of `text`: surrounding whitespace and one
/// sign are allowed, anything after the digits is ignored.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Absurdly long digit runs saturate instead of failing.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Speed box: unparsable input keeps `current_ms`; result is in `[10, 2000]`.
pub fn speed_from_input(text: &str, current_ms: u64) -> u64 {
    let requested = parse_leading_int(text).unwrap_or_else(|| i64::try_from(current_ms).unwrap_or(i64::MAX));
    let min = MIN_UI_TICK_MS as i64;
    let max = MAX_UI_TICK_MS as i64;
    requested.clamp(min, max) as u64
}

fn dimension_from_input(text: &str, current: usize) -> usize {
    let requested = match parse_leading_int(text) {
        Some(0) | None => i64::try_from(current).unwrap_or(i64::MAX),
        Some(value) => value,
    };
    let min = MIN_GRID_DIMENSION as i64;
    let max = MAX_GRID_DIMENSION as i64;
    requested.clamp(min, max) as usize
}

/// Rows box: keeps the column count, falls back to the current rows on
/// unparsable or zero input.
pub fn rows_from_input(text: &str, size: GridSize) -> GridSize {
    GridSize::new(dimension_from_input(text, size.rows), size.cols)
}

/// Cols box: keeps the row count.
pub fn cols_from_input(text: &str, size: GridSize) -> GridSize {
    GridSize::new(size.rows, dimension_from_input(text, size.cols))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_int_is_lenient() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  17ms"), Some(17));
        assert_eq!(parse_leading_int("-8"), Some(-8));
        assert_eq!(parse_leading_int("+3"), Some(3));
        assert_eq!(parse_leading_int("12.9"), Some(12));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    #[test]
    fn speed_is_clamped_to_ui_range() {
        assert_eq!(speed_from_input("250", 200), 250);
        assert_eq!(speed_from_input("1", 200), 10);
        assert_eq!(speed_from_input("-40", 200), 10);
        assert_eq!(speed_from_input("99999", 200), 2000);
        assert_eq!(speed_from_input("99999999999999999999999", 200), 2000);
    }

    #[test]
    fn unparsable_speed_keeps_current() {
        assert_eq!(speed_from_input("fast", 350), 350);
        assert_eq!(speed_from_input("", 4000), 2000);
    }

    #[test]
    fn rows_and_cols_clamp_and_keep_the_other_dimension() {
        let size = GridSize::new(30, 50);
        assert_eq!(rows_from_input("12", size), GridSize::new(12, 50));
        assert_eq!(rows_from_input("2", size), GridSize::new(5, 50));
        assert_eq!(cols_from_input("500", size), GridSize::new(30, 200));
        assert_eq!(cols_from_input("-3", size), GridSize::new(30, 5));
    }

    #[test]
    fn bad_or_zero_dimension_falls_back_to_current() {
        let size = GridSize::new(30, 50);
        assert_eq!(rows_from_input("lots", size), size);
        assert_eq!(rows_from_input("0", size), size);
        assert_eq!(cols_from_input("", size), size);
    }
}
