//! Camera-dial display values: snapping, formatting, and parsing.
//!
//! Each parameter with a physical dial (aperture, shutter, ISO) has a fixed
//! table of the values real cameras expose. Snapping converts an internal
//! value to physical units and picks the table entry with the smallest
//! absolute difference. Ties keep the first entry in declared order, so the
//! tables must not be reordered.

use crate::error::ExposureError;
use crate::params::Param;
use crate::units::{
    av_to_f_number, ev_label, f_number_to_av, iso_to_sensitivity, round_half_up,
    sensitivity_to_iso, shutter_speed_to_tv, tv_to_shutter_speed,
};

/// Default absolute tolerance (in physical units) for [`is_near_common_value`].
pub const DEFAULT_NEAR_THRESHOLD: f64 = 0.1;

/// Relative tolerance applied to ISO in [`is_near_common_value`].
const ISO_NEAR_RATIO: f64 = 0.05;

/// Third-stop f-numbers from f/1.0 to f/32.
pub const COMMON_F_NUMBERS: [f64; 31] = [
    1.0, 1.1, 1.2, 1.4, 1.6, 1.8, 2.0, 2.2, 2.5, 2.8, 3.2, 3.5, 4.0, 4.5, 5.0, 5.6, 6.3, 7.1, 8.0,
    9.0, 10.0, 11.0, 13.0, 14.0, 16.0, 18.0, 20.0, 22.0, 25.0, 28.0, 32.0,
];

/// Shutter speeds in seconds, longest first: whole seconds down to 1 s,
/// then reciprocal speeds down to 1/12800.
pub const COMMON_SHUTTER_SPEEDS: [f64; 63] = [
    180.0, 120.0, 90.0, 60.0, 50.0, 40.0, 30.0, 25.0, 20.0, 15.0, 13.0, 10.0, 8.0, 6.0, 5.0, 4.0,
    3.0, 2.5, 2.0, 1.6, 1.3, 1.0,
    1.0 / 1.3, 1.0 / 1.6, 1.0 / 2.0, 1.0 / 2.5, 1.0 / 3.0, 1.0 / 4.0, 1.0 / 5.0, 1.0 / 6.0,
    1.0 / 8.0, 1.0 / 10.0, 1.0 / 13.0, 1.0 / 15.0, 1.0 / 20.0, 1.0 / 25.0, 1.0 / 30.0,
    1.0 / 40.0, 1.0 / 50.0, 1.0 / 60.0, 1.0 / 80.0, 1.0 / 100.0, 1.0 / 125.0, 1.0 / 160.0,
    1.0 / 200.0, 1.0 / 250.0, 1.0 / 320.0, 1.0 / 400.0, 1.0 / 500.0, 1.0 / 640.0, 1.0 / 800.0,
    1.0 / 1000.0, 1.0 / 1250.0, 1.0 / 1600.0, 1.0 / 2000.0, 1.0 / 2500.0, 1.0 / 3200.0,
    1.0 / 4000.0, 1.0 / 5000.0, 1.0 / 6400.0, 1.0 / 8000.0, 1.0 / 10000.0, 1.0 / 12800.0,
];

/// Third-stop ISO ratings from 50 to 512000.
pub const COMMON_ISO_VALUES: [f64; 41] = [
    50.0, 64.0, 80.0, 100.0, 125.0, 160.0, 200.0, 250.0, 320.0, 400.0, 500.0, 640.0, 800.0,
    1000.0, 1250.0, 1600.0, 2000.0, 2500.0, 3200.0, 4000.0, 5000.0, 6400.0, 8000.0, 10000.0,
    12800.0, 16000.0, 20000.0, 25600.0, 32000.0, 40000.0, 51200.0, 64000.0, 80000.0, 102400.0,
    128000.0, 160000.0, 200000.0, 256000.0, 320000.0, 400000.0, 512000.0,
];

/// Linear scan for the entry closest to `target`. Only a strictly smaller
/// difference replaces the current best.
fn nearest(table: &[f64], target: f64) -> f64 {
    let mut best = table[0];
    for &candidate in &table[1..] {
        if (candidate - target).abs() < (best - target).abs() {
            best = candidate;
        }
    }
    best
}

/// Nearest dial f-number for an aperture value.
pub fn nearest_common_f_number(av: f64) -> f64 {
    nearest(&COMMON_F_NUMBERS, av_to_f_number(av))
}

/// Nearest dial shutter speed (seconds) for a time value.
pub fn nearest_common_shutter_speed(tv: f64) -> f64 {
    nearest(&COMMON_SHUTTER_SPEEDS, tv_to_shutter_speed(tv))
}

/// Nearest dial ISO rating for a sensitivity value.
pub fn nearest_common_iso(iso: f64) -> f64 {
    nearest(&COMMON_ISO_VALUES, iso_to_sensitivity(iso))
}

/// `"f/<value>"`, e.g. `"f/2.8"`.
pub fn format_common_f_number(av: f64) -> String {
    format!("f/{}", nearest_common_f_number(av))
}

/// `"<value>s"` from one second up, `"1/<denominator>"` below.
pub fn format_common_shutter_speed(tv: f64) -> String {
    let seconds = nearest_common_shutter_speed(tv);
    if seconds >= 1.0 {
        format!("{seconds}s")
    } else {
        format!("1/{}", round_half_up(1.0 / seconds))
    }
}

/// `"ISO <value>"`, e.g. `"ISO 400"`.
pub fn format_common_iso(iso: f64) -> String {
    format!("ISO {}", nearest_common_iso(iso))
}

/// Dial-style display for any parameter. EV has no dial and is shown as
/// its rounded value with a scene label, e.g. `"12(Overcast)"`.
pub fn format_common(param: Param, value: f64) -> String {
    match param {
        Param::Ev => format!("{}({})", round_half_up(value), ev_label(value)),
        Param::Av => format_common_f_number(value),
        Param::Tv => format_common_shutter_speed(value),
        Param::Iso => format_common_iso(value),
    }
}

/// Whether `value` sits within tolerance of its nearest dial value.
///
/// Aperture and shutter compare absolute differences in physical units
/// against `threshold`. ISO ignores `threshold` and allows 5% of the nearest
/// rating. EV has no dial and always passes.
pub fn is_near_common_value(param: Param, value: f64, threshold: f64) -> bool {
    match param {
        Param::Ev => true,
        Param::Av => (av_to_f_number(value) - nearest_common_f_number(value)).abs() < threshold,
        Param::Tv => {
            (tv_to_shutter_speed(value) - nearest_common_shutter_speed(value)).abs() < threshold
        }
        Param::Iso => {
            let nearest = nearest_common_iso(value);
            (iso_to_sensitivity(value) - nearest).abs() < nearest * ISO_NEAR_RATIO
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse the longest numeric prefix of `text` after leading whitespace,
/// e.g. `" 2.8mm"` → `2.8`. Returns `None` when no digits are present.
fn parse_leading_float(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    // Optional exponent, only consumed when complete.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse().ok()
}

/// Strip an ASCII prefix, ignoring case.
fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Parse `"f/2.8"`, `"F2.8"` or `"2.8"` into an aperture value.
pub fn parse_common_f_number(input: &str) -> Option<f64> {
    let cleaned = strip_prefix_ignore_case(input, "f")
        .map(|rest| rest.strip_prefix('/').unwrap_or(rest))
        .unwrap_or(input);
    positive(parse_leading_float(cleaned)).map(f_number_to_av)
}

/// Parse `"1/125"`, `"1/125s"`, `"2.5s"` or `"30"` into a time value.
pub fn parse_common_shutter_speed(input: &str) -> Option<f64> {
    let cleaned = input
        .strip_suffix(['s', 'S'])
        .unwrap_or(input);

    let seconds = if cleaned.contains('/') {
        let mut parts = cleaned.split('/');
        let (Some(numerator), Some(denominator), None) = (parts.next(), parts.next(), parts.next())
        else {
            return None;
        };
        let numerator = parse_leading_float(numerator)?;
        let denominator = parse_leading_float(denominator)?;
        if denominator == 0.0 {
            return None;
        }
        numerator / denominator
    } else {
        parse_leading_float(cleaned)?
    };

    positive(Some(seconds)).map(shutter_speed_to_tv)
}

/// Parse `"ISO 400"`, `"iso400"` or `"400"` into a sensitivity value.
pub fn parse_common_iso(input: &str) -> Option<f64> {
    let cleaned = strip_prefix_ignore_case(input, "iso")
        .map(str::trim_start)
        .unwrap_or(input);
    positive(parse_leading_float(cleaned)).map(sensitivity_to_iso)
}

/// Parse a dial-style string for `param`, reporting why it failed.
///
/// EV has no dial notation and accepts a plain number.
pub fn parse_common(param: Param, input: &str) -> Result<f64, ExposureError> {
    let parsed = match param {
        Param::Ev => parse_leading_float(input).filter(|v| v.is_finite()),
        Param::Av => parse_common_f_number(input),
        Param::Tv => parse_common_shutter_speed(input),
        Param::Iso => parse_common_iso(input),
    };
    parsed.ok_or_else(|| ExposureError::Unparseable {
        param,
        input: input.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_tables_have_declared_sizes_and_bounds() {
        assert_eq!(COMMON_F_NUMBERS[0], 1.0);
        assert_eq!(COMMON_F_NUMBERS[30], 32.0);
        assert_eq!(COMMON_SHUTTER_SPEEDS[0], 180.0);
        assert!((COMMON_SHUTTER_SPEEDS[62] - 1.0 / 12800.0).abs() < EPSILON);
        assert_eq!(COMMON_ISO_VALUES[0], 50.0);
        assert_eq!(COMMON_ISO_VALUES[40], 512000.0);
    }

    #[test]
    fn test_nearest_keeps_first_on_tie() {
        assert_eq!(nearest(&[1.0, 2.0, 3.0], 1.5), 1.0);
        assert_eq!(nearest(&[3.0, 2.0, 1.0], 2.5), 3.0);
    }

    #[test]
    fn test_format_common_f_number_snaps() {
        assert_eq!(format_common_f_number(f_number_to_av(2.83)), "f/2.8");
        assert_eq!(format_common_f_number(5.0), "f/5.6");
        assert_eq!(format_common_f_number(0.0), "f/1");
        assert_eq!(format_common_f_number(f_number_to_av(10.2)), "f/10");
    }

    #[test]
    fn test_format_common_shutter_speed() {
        assert_eq!(format_common_shutter_speed(7.0), "1/125");
        assert_eq!(format_common_shutter_speed(0.0), "1s");
        assert_eq!(format_common_shutter_speed(-1.0), "2s");
        assert_eq!(format_common_shutter_speed(shutter_speed_to_tv(2.4)), "2.5s");
        assert_eq!(format_common_shutter_speed(13.0), "1/8000");
    }

    #[test]
    fn test_format_common_iso_and_ev() {
        assert_eq!(format_common_iso(0.0), "ISO 100");
        assert_eq!(format_common_iso(2.0), "ISO 400");
        assert_eq!(format_common(Param::Ev, 12.0), "12(Overcast)");
    }

    #[test]
    fn test_is_near_common_value() {
        assert!(is_near_common_value(Param::Av, 6.0, DEFAULT_NEAR_THRESHOLD)); // f/8
        assert!(!is_near_common_value(Param::Av, f_number_to_av(8.5), DEFAULT_NEAR_THRESHOLD));
        assert!(is_near_common_value(Param::Iso, sensitivity_to_iso(410.0), 0.0));
        assert!(!is_near_common_value(Param::Iso, sensitivity_to_iso(450.0), 0.0));
        assert!(is_near_common_value(Param::Ev, 3.3, 0.0));
    }

    #[test]
    fn test_parse_f_number_variants() {
        let expected = f_number_to_av(2.8);
        for text in ["f/2.8", "F/2.8", "f2.8", "2.8", "f/ 2.8"] {
            let av = parse_common_f_number(text).unwrap();
            assert!((av - expected).abs() < EPSILON, "{text}");
        }
        assert_eq!(parse_common_f_number("f/"), None);
        assert_eq!(parse_common_f_number("f/0"), None);
        assert_eq!(parse_common_f_number("f/-2"), None);
    }

    #[test]
    fn test_parse_shutter_speed_variants() {
        let tv = parse_common_shutter_speed("1/125").unwrap();
        assert!((tv_to_shutter_speed(tv) - 1.0 / 125.0).abs() < EPSILON);
        let tv = parse_common_shutter_speed("1/125S").unwrap();
        assert!((tv_to_shutter_speed(tv) - 1.0 / 125.0).abs() < EPSILON);
        let tv = parse_common_shutter_speed("2.5s").unwrap();
        assert!((tv_to_shutter_speed(tv) - 2.5).abs() < EPSILON);

        assert_eq!(parse_common_shutter_speed("abc"), None);
        assert_eq!(parse_common_shutter_speed("1/0"), None);
        assert_eq!(parse_common_shutter_speed("1/"), None);
        assert_eq!(parse_common_shutter_speed("1/2/3"), None);
        assert_eq!(parse_common_shutter_speed("-1/60"), None);
        assert_eq!(parse_common_shutter_speed("0s"), None);
    }

    #[test]
    fn test_parse_iso_variants() {
        for text in ["ISO 400", "iso400", "Iso   400", "400"] {
            let iso = parse_common_iso(text).unwrap();
            assert!((iso - 2.0).abs() < EPSILON, "{text}");
        }
        assert_eq!(parse_common_iso("ISO"), None);
        assert_eq!(parse_common_iso("ISO -100"), None);
    }

    #[test]
    fn test_parse_common_reports_param() {
        let err = parse_common(Param::Tv, "fast").unwrap_err();
        assert_eq!(
            err,
            ExposureError::Unparseable {
                param: Param::Tv,
                input: "fast".to_string()
            }
        );
        assert_eq!(parse_common(Param::Ev, "12"), Ok(12.0));
    }

    #[test]
    fn test_parse_leading_float_prefixes() {
        assert_eq!(parse_leading_float("  2.8mm"), Some(2.8));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("1e3x"), Some(1000.0));
        assert_eq!(parse_leading_float("2e"), Some(2.0));
        assert_eq!(parse_leading_float("-"), None);
        assert_eq!(parse_leading_float("."), None);
    }
}
