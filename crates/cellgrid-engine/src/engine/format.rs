//! Display text for formula results and numeric reads of cell values.

/// Format an evaluated formula result for display.
///
/// Finite values use the shortest representation that round-trips
/// (`25`, `2.5`, `-0.125`). Negative zero prints as `0`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// Read a cell's display value as a formula operand.
///
/// Values that are empty or not numeric (plain text, error sentinels) read
/// as 0.
pub fn parse_operand(value: &str) -> f64 {
    match value.trim() {
        "Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        "NaN" => f64::NAN,
        trimmed => trimmed.parse::<f64>().ok().filter(|n| n.is_finite()).unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_whole_and_fractional() {
        assert_eq!(format_number(25.0), "25");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-5.0), "-5");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(1e22), "10000000000000000000000");
    }

    #[test]
    fn test_format_special_values() {
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_parse_operand() {
        assert_eq!(parse_operand("42"), 42.0);
        assert_eq!(parse_operand("  2.5 "), 2.5);
        assert_eq!(parse_operand(""), 0.0);
        assert_eq!(parse_operand("hello"), 0.0);
        assert_eq!(parse_operand("!(circular reference)"), 0.0);
        assert_eq!(parse_operand("Infinity"), f64::INFINITY);
        assert!(parse_operand("NaN").is_nan());
    }
}
