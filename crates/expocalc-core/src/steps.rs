//! Stepped value sequences at whole, half, or third-stop granularity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::range::ParamRange;
use crate::units::round_half_up;

/// Tolerance used to recognise the canonical step sizes.
const STEP_TOLERANCE: f64 = 1e-9;

/// Longest sequence [`generate_steps`] will produce. Spans that need more
/// steps than this yield an empty sequence.
pub const MAX_STEP_COUNT: usize = 4096;

/// Step granularity for sweeps and step buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepSize {
    /// One full stop.
    #[default]
    Whole,
    /// Half stop.
    Half,
    /// Third stop.
    Third,
    /// Any other positive increment. Sequences round to whole numbers.
    Custom(f64),
}

impl StepSize {
    /// Classify a raw increment, snapping to the canonical sizes.
    pub fn from_f64(step: f64) -> Self {
        if (step - 1.0).abs() < STEP_TOLERANCE {
            Self::Whole
        } else if (step - 0.5).abs() < STEP_TOLERANCE {
            Self::Half
        } else if (step - 1.0 / 3.0).abs() < STEP_TOLERANCE {
            Self::Third
        } else {
            Self::Custom(step)
        }
    }

    /// The increment in stops.
    pub const fn value(self) -> f64 {
        match self {
            Self::Whole => 1.0,
            Self::Half => 0.5,
            Self::Third => 1.0 / 3.0,
            Self::Custom(step) => step,
        }
    }

    /// Round `value` to the grid this step size emits.
    pub fn round(self, value: f64) -> f64 {
        match self {
            Self::Third => round_half_up(value * 3.0) / 3.0,
            Self::Half => round_half_up(value * 2.0) / 2.0,
            Self::Whole | Self::Custom(_) => round_half_up(value),
        }
    }
}

impl fmt::Display for StepSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Whole => write!(f, "1"),
            Self::Half => write!(f, "1/2"),
            Self::Third => write!(f, "1/3"),
            Self::Custom(step) => write!(f, "{step}"),
        }
    }
}

/// Error returned when a step size string is not `1`, `1/2`, `1/3`, or a
/// positive number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid step size: {0:?}")]
pub struct ParseStepSizeError(pub String);

impl FromStr for StepSize {
    type Err = ParseStepSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ParseStepSizeError(s.to_string());

        let step = match trimmed.split_once('/') {
            Some((num, den)) => {
                let num: f64 = num.trim().parse().map_err(|_| invalid())?;
                let den: f64 = den.trim().parse().map_err(|_| invalid())?;
                num / den
            }
            None => trimmed.parse().map_err(|_| invalid())?,
        };

        if step.is_finite() && step > 0.0 {
            Ok(Self::from_f64(step))
        } else {
            Err(invalid())
        }
    }
}

/// Ascending values from `min` through `max` (inclusive) at `step_size`.
///
/// Each entry is computed as `min + i × step` and rounded to the step's
/// grid: thirds for third stops, halves for half stops, whole numbers for
/// everything else. A non-positive or non-finite step, or `min > max`,
/// produces an empty sequence.
pub fn generate_steps(min: f64, max: f64, step_size: f64) -> Vec<f64> {
    generate_stepped(min, max, StepSize::from_f64(step_size))
}

/// Number of entries [`generate_stepped`] yields for `min..=max`.
///
/// `Some(0)` for a non-positive or non-finite step, non-finite bounds, or
/// `min > max`. `None` when the span needs more than [`MAX_STEP_COUNT`] steps.
pub fn step_count(min: f64, max: f64, step_size: StepSize) -> Option<usize> {
    let step = step_size.value();
    if !(step.is_finite() && step > 0.0) || !(min.is_finite() && max.is_finite()) || min > max {
        return Some(0);
    }

    let intervals = ((max - min) / step + STEP_TOLERANCE).floor();
    if !intervals.is_finite() || intervals >= MAX_STEP_COUNT as f64 {
        return None;
    }
    (intervals as usize).checked_add(1)
}

/// [`generate_steps`] with an already classified step size.
pub fn generate_stepped(min: f64, max: f64, step_size: StepSize) -> Vec<f64> {
    let Some(count) = step_count(min, max, step_size) else {
        tracing::debug!("{min}..={max} at {step_size} exceeds {MAX_STEP_COUNT} steps");
        return Vec::new();
    };
    let step = step_size.value();
    (0..count)
        .map(|i| step_size.round(min + i as f64 * step))
        .collect()
}

/// Fractional part of `value`, carrying its sign (like C `fmod(value, 1)`).
fn fract_toward_zero(value: f64) -> f64 {
    value % 1.0
}

/// Whether a step button should be disabled.
///
/// A step is disabled when it would leave the range, or when it would mix
/// stop grids: a value on a third-stop position cannot take a half step and
/// a value on a half-stop position cannot take a third step.
pub fn is_step_disabled(current: f64, delta: f64, range: &ParamRange) -> bool {
    if !range.contains(current + delta) {
        return true;
    }

    let remainder = fract_toward_zero(current).abs();
    let on_third = (remainder - 1.0 / 3.0).abs() < 0.01 || (remainder - 2.0 / 3.0).abs() < 0.01;
    let on_half = (remainder - 0.5).abs() < 0.01;

    (on_third && delta.abs() == 0.5) || (on_half && delta.abs() == 1.0 / 3.0)
}
