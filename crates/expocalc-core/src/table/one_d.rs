//! One-dimensional table: every consistent pairing of the two free
//! parameters while two others stay fixed.
//!
//! # Algorithm
//! With fixed parameters `F1`, `F2` and free parameters `V1`, `V2`
//! (canonical order):
//! 1. Sweep `V1` across its range, solve `V2`, keep rows where `V2` is in range.
//! 2. Sweep `V2` across its range, solve `V1`, keep rows where `V1` is in range.
//! 3. Concatenate, drop rows within [`DEDUP_TOLERANCE`] of an earlier row
//!    on all four fields, and sort ascending by `V1`.
//!
//! # Complexity
//! O(steps₁ + steps₂) candidates, O(n²) de-duplication.

use serde::{Deserialize, Serialize};

use crate::error::ExposureError;
use crate::params::{ExposureValues, Param, PartialExposure};
use crate::range::RangeConfig;
use crate::solver::calculate_missing_value;
use crate::steps::generate_steps;

/// Rows closer than this on every field are considered the same row.
pub const DEDUP_TOLERANCE: f64 = 0.01;

/// Result of [`generate_1d_table_data`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table1D {
    /// The two swept parameters, in canonical order.
    pub variable_params: [Param; 2],
    /// Full value tuples, ascending by the first variable parameter.
    pub combinations: Vec<ExposureValues>,
}

/// Sweep `swept` across its range with `fixed` held at their values in
/// `values`, solving for `solved`. Solver failures are skipped, as are
/// candidates whose grid rounding lands outside the swept range.
fn sweep(
    fixed: [Param; 2],
    swept: Param,
    solved: Param,
    values: &ExposureValues,
    ranges: &RangeConfig,
    step_size: f64,
) -> Vec<ExposureValues> {
    let range = ranges.get(swept);
    let base = PartialExposure::empty()
        .with(fixed[0], values.get(fixed[0]))
        .with(fixed[1], values.get(fixed[1]));

    generate_steps(range.min, range.max, step_size)
        .into_iter()
        .filter_map(|candidate| {
            if !range.contains(candidate) {
                return None;
            }
            let known = base.with(swept, candidate);
            let result = calculate_missing_value(&known, solved).ok()?;
            ranges
                .get(solved)
                .contains(result)
                .then(|| values.with(swept, candidate).with(solved, result))
        })
        .collect()
}

/// Keep the first of any group of rows that agree within `tolerance`.
fn dedup_rows(rows: Vec<ExposureValues>, tolerance: f64) -> Vec<ExposureValues> {
    let mut kept: Vec<ExposureValues> = Vec::with_capacity(rows.len());
    for row in rows {
        if !kept.iter().any(|existing| existing.approx_eq(&row, tolerance)) {
            kept.push(row);
        }
    }
    kept
}

/// Build the 1-D table for fixed parameters `param1` and `param2`.
///
/// Fixed values come from `values`; the two free parameters are swept over
/// their ranges in `ranges` at `step_size`.
pub fn generate_1d_table_data(
    param1: Param,
    param2: Param,
    values: &ExposureValues,
    ranges: &RangeConfig,
    step_size: f64,
) -> Result<Table1D, ExposureError> {
    if param1 == param2 {
        return Err(ExposureError::SameParam { param: param1 });
    }

    let fixed = [param1, param2];
    let free = Param::others(&fixed);
    let (var1, var2) = (free[0], free[1]);

    let mut candidates = sweep(fixed, var1, var2, values, ranges, step_size);
    let from_first = candidates.len();
    candidates.extend(sweep(fixed, var2, var1, values, ranges, step_size));
    let total = candidates.len();

    let mut combinations = dedup_rows(candidates, DEDUP_TOLERANCE);
    combinations.sort_by(|a, b| a.get(var1).total_cmp(&b.get(var1)));

    tracing::debug!(
        "1D table {param1}/{param2}: {from_first}+{} candidates, {} kept",
        total - from_first,
        combinations.len()
    );

    Ok(Table1D {
        variable_params: [var1, var2],
        combinations,
    })
}
