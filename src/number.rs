use num_traits::ToPrimitive;

/// Renders a number as text.
///
/// Whole numbers are rendered without a fractional part (`3` rather than `3.0`) unless
/// `keep_as_decimal` is set. Whole numbers too large to fit in an `i64` are always rendered in
/// decimal form.
pub fn format_number(value: f64, keep_as_decimal: bool) -> String {
    if !keep_as_decimal && value.fract() == 0.0 {
        if let Some(whole) = value.to_i64() {
            return whole.to_string();
        }
    }

    // Debug formatting always keeps a point or an exponent, so 3.0 stays "3.0"
    format!("{:?}", value)
}

/// Parses the text of a numeric literal, as produced by the engine's lexer or typed straight into
/// a token.
pub fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_numbers() {
        assert_eq!(format_number(3.0, false), "3");
        assert_eq!(format_number(-12.0, false), "-12");
        assert_eq!(format_number(0.0, false), "0");
        assert_eq!(format_number(3.0, true), "3.0");
    }

    #[test]
    fn test_fractional_numbers() {
        assert_eq!(format_number(2.5, false), "2.5");
        assert_eq!(format_number(2.5, true), "2.5");
        assert_eq!(format_number(0.125, false), "0.125");
    }

    #[test]
    fn test_huge_whole_number_stays_decimal() {
        assert_eq!(format_number(1e20, false), "1e20");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("12"), Some(12.0));
        assert_eq!(parse_number("0.5"), Some(0.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("x"), None);
    }
}
