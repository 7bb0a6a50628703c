//! Per-parameter bounds used to filter table rows and flag inputs.
//!
//! Out-of-range values are not errors. They are reported through
//! [`is_value_in_range`] and [`range_warning`] and only clamped when the
//! caller asks for it explicitly.

use serde::{Deserialize, Serialize};

use crate::common_values::{
    format_common_f_number, format_common_iso, format_common_shutter_speed,
};
use crate::params::Param;
use crate::units::ev_label;

/// Inclusive `[min, max]` bound for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Bounds for all four parameters. `min <= max` is the caller's
/// responsibility and is not checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeConfig {
    pub ev: ParamRange,
    pub av: ParamRange,
    pub tv: ParamRange,
    pub iso: ParamRange,
}

impl RangeConfig {
    pub const fn get(&self, param: Param) -> ParamRange {
        match param {
            Param::Ev => self.ev,
            Param::Av => self.av,
            Param::Tv => self.tv,
            Param::Iso => self.iso,
        }
    }

    pub fn set(&mut self, param: Param, range: ParamRange) {
        match param {
            Param::Ev => self.ev = range,
            Param::Av => self.av = range,
            Param::Tv => self.tv = range,
            Param::Iso => self.iso = range,
        }
    }
}

impl Default for RangeConfig {
    /// EV −6..16, f/1..f/22.6, 8 s..1/8192 s, ISO 100..102400.
    fn default() -> Self {
        Self {
            ev: ParamRange::new(-6.0, 16.0),
            av: ParamRange::new(0.0, 9.0),
            tv: ParamRange::new(-3.0, 13.0),
            iso: ParamRange::new(0.0, 10.0),
        }
    }
}

pub fn is_value_in_range(param: Param, value: f64, ranges: &RangeConfig) -> bool {
    ranges.get(param).contains(value)
}

/// Message describing which bound `value` violates, or `None` when in range.
pub fn range_warning(param: Param, value: f64, ranges: &RangeConfig) -> Option<String> {
    let range = ranges.get(param);
    if value < range.min {
        Some(format!(
            "{param} value is below the range minimum ({})",
            range.min
        ))
    } else if value > range.max {
        Some(format!(
            "{param} value is above the range maximum ({})",
            range.max
        ))
    } else {
        None
    }
}

pub fn clamp_to_range(param: Param, value: f64, ranges: &RangeConfig) -> f64 {
    let range = ranges.get(param);
    range.min.max(range.max.min(value))
}

/// Render a bound pair in dial notation, e.g. `"f/1 ~ f/22"`.
///
/// TV lists the maximum first because a larger TV is a shorter exposure.
pub fn range_label(param: Param, range: ParamRange) -> String {
    match param {
        Param::Ev => format!("{} ~ {}", ev_label(range.min), ev_label(range.max)),
        Param::Av => format!(
            "{} ~ {}",
            format_common_f_number(range.min),
            format_common_f_number(range.max)
        ),
        Param::Tv => format!(
            "{} ~ {}",
            format_common_shutter_speed(range.max),
            format_common_shutter_speed(range.min)
        ),
        Param::Iso => format!(
            "{} ~ {}",
            format_common_iso(range.min),
            format_common_iso(range.max)
        ),
    }
}
