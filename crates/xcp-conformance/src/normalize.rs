//! Float-spelling normalization for diagnostic comparison.

/// Normalize the known, documented exponent-notation spelling differences
/// between implementations before comparing diagnostic output.
///
/// Two differences are covered:
/// - shortest-representation rounding of the widened f32 maximum
///   (`…886` vs `…887`)
/// - presence of the `+` sign in the exponent (`e38` vs `e+38`)
///
/// This is a harness concession to differing but value-equivalent float
/// formatting. It is not a codec requirement: wire bytes are compared
/// unnormalized.
#[must_use]
pub fn normalize_float_spelling(text: &str) -> String {
    text.replace("3.4028234663852886e+38", "3.4028234663852887e+38")
        .replace("3.4028234663852886e38", "3.4028234663852887e+38")
        .replace("1.7976931348623157e308", "1.7976931348623157e+308")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_each_known_spelling() {
        assert_eq!(
            normalize_float_spelling("3.4028234663852886e+38"),
            "3.4028234663852887e+38"
        );
        assert_eq!(
            normalize_float_spelling("3.4028234663852886e38"),
            "3.4028234663852887e+38"
        );
        assert_eq!(
            normalize_float_spelling("1.7976931348623157e308"),
            "1.7976931348623157e+308"
        );
    }

    #[test]
    fn leaves_canonical_spellings_untouched() {
        let canonical = "3.4028234663852887e+38\n1.7976931348623157e+308";
        assert_eq!(normalize_float_spelling(canonical), canonical);
    }

    #[test]
    fn leaves_unrelated_text_untouched() {
        assert_eq!(normalize_float_spelling("test 1234"), "test 1234");
    }
}
