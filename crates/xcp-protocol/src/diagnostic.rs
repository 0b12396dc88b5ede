//! Diagnostic rendering for the `testDecode` operation.

use xcp_core::Required;

/// Render the diagnostic block: every field of the non-nullable record in
/// declaration order, one per line, wrapped in braces.
///
/// Floats are rendered in scientific notation; the single-precision field is
/// widened to double precision for display only (its wire width is
/// unaffected). Byte content is rendered as text. Callers comparing output
/// across independently built implementations own any normalization of
/// exponent spelling.
#[must_use]
pub fn render_diagnostic(required: &Required) -> String {
    format!(
        "{{\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n{:e}\n{:e}\n{}\n{}\n}}",
        required.bool_value,
        required.u8_value,
        required.u16_value,
        required.u32_value,
        required.u64_value,
        required.s8_value,
        required.s16_value,
        required.s32_value,
        required.s64_value,
        f64::from(required.f32_value),
        required.f64_value,
        required.string_value,
        String::from_utf8_lossy(&required.bytes_value),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_extreme_values_line_per_field() {
        let required = Required {
            bool_value: true,
            u8_value: u8::MAX,
            u16_value: u16::MAX,
            u32_value: u32::MAX,
            u64_value: u64::MAX,
            s8_value: i8::MIN,
            s16_value: i16::MIN,
            s32_value: i32::MIN,
            s64_value: i64::MIN,
            f32_value: f32::MAX,
            f64_value: f64::MAX,
            string_value: "test".into(),
            bytes_value: b"test".to_vec(),
            object_value: xcp_core::Thing::new("test"),
        };
        let rendered = render_diagnostic(&required);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 15);
        assert_eq!(lines[0], "{");
        assert_eq!(lines[1], "true");
        assert_eq!(lines[2], "255");
        assert_eq!(lines[5], "18446744073709551615");
        assert_eq!(lines[9], "-9223372036854775808");
        assert_eq!(lines[10], "3.4028234663852886e38");
        assert_eq!(lines[11], "1.7976931348623157e308");
        assert_eq!(lines[12], "test");
        assert_eq!(lines[13], "test");
        assert_eq!(lines[14], "}");
    }

    #[test]
    fn zero_record_renders_plain_zeroes() {
        let rendered = render_diagnostic(&Required::default());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1], "false");
        assert_eq!(lines[2], "0");
        assert_eq!(lines[10], "0e0");
        assert_eq!(lines[12], "");
    }
}
