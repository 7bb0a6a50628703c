//! Conversions between log-scale exposure values and physical units.
//!
//! ```text
//! f-number = 2^(AV / 2)          AV  = 2 × log2(f-number)
//! seconds  = 2^(−TV)             TV  = log2(1 / seconds)
//! ISO      = 100 × 2^ISO         ISO = log2(sensitivity / 100)
//! lux      ≈ 2.5 × 2^EV
//! ```
//!
//! Every function here is total over the reals. Keeping shutter speed and
//! sensitivity positive before calling an inverse is the caller's job.

use crate::params::Param;

/// Incident-light calibration constant for the EV → lux approximation.
const LUX_PER_EV0: f64 = 2.5;

/// Rounds halves toward positive infinity (`2.5 → 3`, `−2.5 → −2`).
pub(crate) fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

pub fn av_to_f_number(av: f64) -> f64 {
    (av / 2.0).exp2()
}

pub fn f_number_to_av(f_number: f64) -> f64 {
    2.0 * f_number.log2()
}

pub fn tv_to_shutter_speed(tv: f64) -> f64 {
    (-tv).exp2()
}

pub fn shutter_speed_to_tv(seconds: f64) -> f64 {
    (1.0 / seconds).log2()
}

pub fn iso_to_sensitivity(iso: f64) -> f64 {
    100.0 * iso.exp2()
}

pub fn sensitivity_to_iso(sensitivity: f64) -> f64 {
    (sensitivity / 100.0).log2()
}

/// Approximate scene illuminance for an exposure value.
pub fn ev_to_lux(ev: f64) -> f64 {
    LUX_PER_EV0 * ev.exp2()
}

/// `"X.YkLux"` at or above 1000 lux, `"X.YLux"` below.
pub fn format_lux(lux: f64) -> String {
    if lux >= 1000.0 {
        format!("{:.1}kLux", lux / 1000.0)
    } else {
        format!("{lux:.1}Lux")
    }
}

/// Exact f-number to one decimal, e.g. `"f/5.7"`.
pub fn format_f_number(av: f64) -> String {
    format!("f/{:.1}", av_to_f_number(av))
}

/// Exact shutter speed: `"X.Ys"` from one second up, `"1/N"` below.
pub fn format_shutter_speed(tv: f64) -> String {
    let seconds = tv_to_shutter_speed(tv);
    if seconds >= 1.0 {
        format!("{seconds:.1}s")
    } else {
        format!("1/{}", round_half_up(1.0 / seconds))
    }
}

/// Exact sensitivity rounded to an integer, e.g. `"ISO 141"`.
pub fn format_iso(iso: f64) -> String {
    format!("ISO {}", round_half_up(iso_to_sensitivity(iso)))
}

/// Scene brightness thresholds, brightest first. Each entry applies when
/// `ev >= threshold`.
const EV_SCENES: [(f64, &str, &str); 21] = [
    (16.0, "Midsummer beach", "164kLux"),
    (15.0, "Clear sky", "81.9kLux"),
    (14.0, "Sunny", "41.0kLux"),
    (13.0, "Hazy sun", "20.5kLux"),
    (12.0, "Overcast", "10.2kLux"),
    (11.0, "Rain clouds", "5.12kLux"),
    (10.0, "Shop display", "2.56kLux"),
    (9.0, "Bright room", "1.28kLux"),
    (8.0, "Elevator", "640Lux"),
    (7.0, "Gymnasium", "320Lux"),
    (6.0, "Hallway", "160Lux"),
    (5.0, "Break room", "80Lux"),
    (4.0, "Dim interior", "40Lux"),
    (3.0, "Auditorium", "20Lux"),
    (2.0, "Movie theater", "10Lux"),
    (1.0, "After sunset", "5Lux"),
    (0.0, "Twilight", "2.5Lux"),
    (-1.0, "Late-night indoors", "1.25Lux"),
    (-2.0, "Moonlit night", "0.63Lux"),
    (-3.0, "Hazy moonlight", "0.31Lux"),
    (-4.0, "Starlight", "0.16Lux"),
];

const EV_DARKEST: &str = "Extremely dark";

/// Short scene label for an exposure value, e.g. `"Overcast"` for EV 12.
pub fn ev_label(ev: f64) -> &'static str {
    EV_SCENES
        .iter()
        .find(|(threshold, _, _)| ev >= *threshold)
        .map_or(EV_DARKEST, |(_, label, _)| *label)
}

/// Scene label with its reference illuminance, e.g. `"Overcast (10.2kLux)"`.
pub fn ev_description(ev: f64) -> String {
    match EV_SCENES.iter().find(|(threshold, _, _)| ev >= *threshold) {
        Some((_, label, lux)) => format!("{label} ({lux})"),
        None => EV_DARKEST.to_string(),
    }
}

/// Strict (non-snapped) display for any parameter. EV is shown as lux.
pub fn format_strict(param: Param, value: f64) -> String {
    match param {
        Param::Ev => format_lux(ev_to_lux(value)),
        Param::Av => format_f_number(value),
        Param::Tv => format_shutter_speed(value),
        Param::Iso => format_iso(value),
    }
}
