//! Solving `EV = AV + TV − ISO` for any one parameter.
//!
//! ```text
//! EV  = AV + TV − ISO
//! AV  = EV − TV + ISO
//! TV  = EV − AV + ISO
//! ISO = AV + TV − EV
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ExposureError;
use crate::params::{DefaultPolicy, ExposureValues, Param, PartialExposure};
use crate::range::{RangeConfig, range_warning};

/// Compute `target` from the other three parameters in `known`.
///
/// Any value `known` holds for `target` itself is ignored. Fails with
/// [`ExposureError::InsufficientInputs`] when one of the three required
/// values is missing; table sweeps treat that as "skip this candidate".
pub fn calculate_missing_value(
    known: &PartialExposure,
    target: Param,
) -> Result<f64, ExposureError> {
    let insufficient = || ExposureError::InsufficientInputs { target };
    let PartialExposure { ev, av, tv, iso } = *known;

    match target {
        Param::Ev => match (av, tv, iso) {
            (Some(av), Some(tv), Some(iso)) => Ok(av + tv - iso),
            _ => Err(insufficient()),
        },
        Param::Av => match (ev, tv, iso) {
            (Some(ev), Some(tv), Some(iso)) => Ok(ev - tv + iso),
            _ => Err(insufficient()),
        },
        Param::Tv => match (ev, av, iso) {
            (Some(ev), Some(av), Some(iso)) => Ok(ev - av + iso),
            _ => Err(insufficient()),
        },
        Param::Iso => match (ev, av, tv) {
            (Some(ev), Some(av), Some(tv)) => Ok(av + tv - ev),
            _ => Err(insufficient()),
        },
    }
}

/// Recompute `target` from the other three fields of a full record.
pub fn recompute(values: &ExposureValues, target: Param) -> Result<ExposureValues, ExposureError> {
    let solved = calculate_missing_value(&PartialExposure::without(values, target), target)?;
    Ok(values.with(target, solved))
}

/// Fill in the two parameters not listed in `fixed`.
///
/// The fixed fields keep their values from `values`. The first free
/// parameter in canonical order takes its fallback from `policy`, and the
/// second is solved so the identity holds.
pub fn derive_remaining(
    fixed: [Param; 2],
    values: &ExposureValues,
    policy: &DefaultPolicy,
) -> Result<ExposureValues, ExposureError> {
    let [a, b] = fixed;
    if a == b {
        return Err(ExposureError::SameParam { param: a });
    }

    let free = Param::others(&fixed);
    let (reference, solved) = (free[0], free[1]);

    let known = PartialExposure::empty()
        .with(a, values.get(a))
        .with(b, values.get(b))
        .with(reference, policy.get(reference));
    let result = calculate_missing_value(&known, solved)?;

    Ok(values
        .with(reference, policy.get(reference))
        .with(solved, result))
}

/// Outcome of stepping one parameter in single-calculation mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    /// Values after the step, with the calculated field recomputed.
    pub values: ExposureValues,
    /// Range warning for the recomputed field, if it fell outside its bounds.
    pub warning: Option<String>,
}

/// Step `param` by `delta` and recompute `calculated` from the rest.
///
/// Returns `None` when the stepped value would leave its range; the caller
/// keeps its previous values. Stepping the calculated field itself only
/// moves that field.
pub fn adjust_value(
    values: &ExposureValues,
    param: Param,
    delta: f64,
    calculated: Param,
    ranges: &RangeConfig,
) -> Option<Adjustment> {
    let stepped = values.get(param) + delta;
    if !ranges.get(param).contains(stepped) {
        return None;
    }

    let values = values.with(param, stepped);
    if param == calculated {
        return Some(Adjustment {
            values,
            warning: None,
        });
    }

    // Every field of a full record is known, so recomputation cannot fail.
    let values = recompute(&values, calculated).ok()?;
    let warning = range_warning(calculated, values.get(calculated), ranges);
    Some(Adjustment { values, warning })
}
