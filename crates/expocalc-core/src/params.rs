//! Exposure parameter identities and the four-value exposure record.
//!
//! All four values live on a base-2 logarithmic scale and are related by
//!
//! ```text
//! EV = AV + TV − ISO
//! ```
//!
//! Stored records never enforce the identity; it is restored on demand by
//! recomputing one field from the other three (see [`crate::solver`]).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one of the four exposure parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Param {
    /// Exposure value (scene brightness).
    Ev,
    /// Aperture value. `f-number = 2^(AV/2)`.
    Av,
    /// Time value. `shutter seconds = 2^(−TV)`.
    Tv,
    /// Sensitivity value. `ISO = 100 × 2^ISO`.
    Iso,
}

impl Param {
    /// Canonical parameter order. Table axes are chosen from this order.
    pub const ALL: [Param; 4] = [Param::Ev, Param::Av, Param::Tv, Param::Iso];

    /// Human-readable label for UI menus and table headers.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Ev => "EV (exposure value)",
            Self::Av => "AV (aperture)",
            Self::Tv => "TV (shutter speed)",
            Self::Iso => "ISO (sensitivity)",
        }
    }

    /// Parameters not listed in `excluded`, in canonical order.
    pub fn others(excluded: &[Param]) -> Vec<Param> {
        Self::ALL
            .into_iter()
            .filter(|p| !excluded.contains(p))
            .collect()
    }

    /// First parameter in canonical order that differs from `self`.
    ///
    /// Used to keep a pair of selections distinct when one of them changes.
    pub fn first_other(self) -> Param {
        match self {
            Self::Ev => Self::Av,
            _ => Self::Ev,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ev => write!(f, "EV"),
            Self::Av => write!(f, "AV"),
            Self::Tv => write!(f, "TV"),
            Self::Iso => write!(f, "ISO"),
        }
    }
}

/// A full set of exposure values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposureValues {
    /// Exposure value.
    pub ev: f64,
    /// Aperture value.
    pub av: f64,
    /// Time value.
    pub tv: f64,
    /// Sensitivity value.
    pub iso: f64,
}

impl ExposureValues {
    /// Construct a record from its four fields.
    pub const fn new(ev: f64, av: f64, tv: f64, iso: f64) -> Self {
        Self { ev, av, tv, iso }
    }

    /// Read the field for `param`.
    pub const fn get(&self, param: Param) -> f64 {
        match param {
            Param::Ev => self.ev,
            Param::Av => self.av,
            Param::Tv => self.tv,
            Param::Iso => self.iso,
        }
    }

    /// Overwrite the field for `param`.
    pub fn set(&mut self, param: Param, value: f64) {
        match param {
            Param::Ev => self.ev = value,
            Param::Av => self.av = value,
            Param::Tv => self.tv = value,
            Param::Iso => self.iso = value,
        }
    }

    /// Copy of `self` with one field replaced.
    pub fn with(mut self, param: Param, value: f64) -> Self {
        self.set(param, value);
        self
    }

    /// True when every field differs from `other` by less than `tolerance`.
    pub fn approx_eq(&self, other: &ExposureValues, tolerance: f64) -> bool {
        Param::ALL
            .into_iter()
            .all(|p| (self.get(p) - other.get(p)).abs() < tolerance)
    }
}

impl Default for ExposureValues {
    /// EV 12 at f/5.6, 1/125 s, ISO 100.
    fn default() -> Self {
        Self::new(12.0, 5.0, 7.0, 0.0)
    }
}

/// A partially known set of exposure values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialExposure {
    pub ev: Option<f64>,
    pub av: Option<f64>,
    pub tv: Option<f64>,
    pub iso: Option<f64>,
}

impl PartialExposure {
    /// Nothing known.
    pub const fn empty() -> Self {
        Self {
            ev: None,
            av: None,
            tv: None,
            iso: None,
        }
    }

    /// All fields of `values` except `omitted`.
    pub fn without(values: &ExposureValues, omitted: Param) -> Self {
        let mut known = Self::from(*values);
        known.clear(omitted);
        known
    }

    pub const fn get(&self, param: Param) -> Option<f64> {
        match param {
            Param::Ev => self.ev,
            Param::Av => self.av,
            Param::Tv => self.tv,
            Param::Iso => self.iso,
        }
    }

    pub fn set(&mut self, param: Param, value: f64) {
        let slot = self.slot_mut(param);
        *slot = Some(value);
    }

    pub fn clear(&mut self, param: Param) {
        *self.slot_mut(param) = None;
    }

    /// Builder-style [`PartialExposure::set`].
    pub fn with(mut self, param: Param, value: f64) -> Self {
        self.set(param, value);
        self
    }

    fn slot_mut(&mut self, param: Param) -> &mut Option<f64> {
        match param {
            Param::Ev => &mut self.ev,
            Param::Av => &mut self.av,
            Param::Tv => &mut self.tv,
            Param::Iso => &mut self.iso,
        }
    }
}

impl From<ExposureValues> for PartialExposure {
    fn from(values: ExposureValues) -> Self {
        Self {
            ev: Some(values.ev),
            av: Some(values.av),
            tv: Some(values.tv),
            iso: Some(values.iso),
        }
    }
}

/// Fallback values used when a derivation must pick a reference value for a
/// parameter the caller did not pin down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefaultPolicy {
    /// Fallback for each parameter.
    pub fallback: ExposureValues,
}

impl DefaultPolicy {
    pub const fn new(fallback: ExposureValues) -> Self {
        Self { fallback }
    }

    /// Fallback value for `param`.
    pub const fn get(&self, param: Param) -> f64 {
        self.fallback.get(param)
    }
}

impl Default for DefaultPolicy {
    fn default() -> Self {
        Self::new(ExposureValues::default())
    }
}
