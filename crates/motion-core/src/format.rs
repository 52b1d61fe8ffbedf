//! Locale-aware number formatting for animated counters.
//!
//! Covers the grouping/decimal conventions the site actually renders with
//! (en/de/fr families); unknown locales fall back to en-US style.

/// Group and decimal separators for a BCP 47 locale tag.
fn separators(locale: &str) -> (&'static str, &'static str) {
    let lang = locale.split(['-', '_']).next().unwrap_or("en");
    match lang {
        "de" | "es" | "it" | "nl" | "pt" => (".", ","),
        // French groups with a narrow no-break space.
        "fr" => ("\u{202f}", ","),
        _ => (",", "."),
    }
}

/// Format `value` with locale grouping and a fixed number of decimals.
///
/// Rounding is half-away-from-zero on the scaled value, matching what the
/// rendered counters expect (`decimals == 0` rounds to the nearest integer).
pub fn format_number(value: f64, locale: &str, decimals: u8) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let (group_sep, decimal_sep) = separators(locale);
    let decimals = decimals.min(9);
    let scale = 10_i128.pow(u32::from(decimals));
    let scaled = (value * scale as f64).round();
    let negative = scaled < 0.0;
    let scaled = scaled.abs() as i128;

    let int_part = scaled / scale;
    let frac_part = scaled % scale;

    let digits = int_part.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * group_sep.len());
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push_str(group_sep);
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if decimals > 0 {
        out.push_str(decimal_sep);
        out.push_str(&format!("{frac_part:0width$}", width = decimals as usize));
    }
    out
}
