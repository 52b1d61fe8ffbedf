// Tests for locale-aware counter formatting.

use motion_core::format::format_number;

#[test]
fn en_us_grouping() {
    assert_eq!(format_number(0.0, "en-US", 0), "0");
    assert_eq!(format_number(999.0, "en-US", 0), "999");
    assert_eq!(format_number(1000.0, "en-US", 0), "1,000");
    assert_eq!(format_number(1234567.0, "en-US", 0), "1,234,567");
}

#[test]
fn eleven_digit_boundary_groups_correctly() {
    // The largest value the site renders; grouping must hold at full width.
    assert_eq!(format_number(100_000_000_000.0, "en-US", 0), "100,000,000,000");
}

#[test]
fn decimals_are_fixed_width() {
    assert_eq!(format_number(1234.5, "en-US", 2), "1,234.50");
    assert_eq!(format_number(0.125, "en-US", 2), "0.13");
    assert_eq!(format_number(7.0, "en-US", 3), "7.000");
}

#[test]
fn german_swaps_separators() {
    assert_eq!(format_number(1234567.89, "de-DE", 2), "1.234.567,89");
    assert_eq!(format_number(1000.0, "de", 0), "1.000");
}

#[test]
fn french_groups_with_narrow_space() {
    assert_eq!(format_number(1234567.0, "fr-FR", 0), "1\u{202f}234\u{202f}567");
    assert_eq!(format_number(12.5, "fr-FR", 1), "12,5");
}

#[test]
fn unknown_locale_falls_back_to_en_style() {
    assert_eq!(format_number(1234.0, "zz-ZZ", 0), "1,234");
    assert_eq!(format_number(1234.0, "", 0), "1,234");
}

#[test]
fn negative_values_keep_grouping() {
    assert_eq!(format_number(-1234567.0, "en-US", 0), "-1,234,567");
    assert_eq!(format_number(-0.4, "en-US", 0), "0");
}

#[test]
fn rounding_is_half_away_from_zero() {
    assert_eq!(format_number(2.5, "en-US", 0), "3");
    assert_eq!(format_number(1249.5, "en-US", 0), "1,250");
}

#[test]
fn non_finite_values_pass_through() {
    assert_eq!(format_number(f64::NAN, "en-US", 0), "NaN");
    assert_eq!(format_number(f64::INFINITY, "en-US", 0), "inf");
}
