//! Two-dimensional table: one fixed parameter, one output parameter, and
//! the remaining two as row and column axes.
//!
//! Row and column parameters are the two left over after removing the fixed
//! and output parameters, taken in canonical order `[EV, AV, TV, ISO]`.
//! Every cell solves the output from `{fixed, row, col}`. A cell is `None`
//! when the solver fails or the result falls outside the output range.
//!
//! The grid is `rows × cols` with no cap; callers that need bounded latency
//! should limit ranges or step size first.

use serde::{Deserialize, Serialize};

use crate::error::ExposureError;
use crate::params::{ExposureValues, Param, PartialExposure};
use crate::range::RangeConfig;
use crate::solver::calculate_missing_value;
use crate::steps::generate_steps;

/// Result of [`generate_matrix_table_data`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixTableData {
    pub fixed_param: Param,
    /// Value the fixed parameter was held at.
    pub fixed_value: f64,
    pub output_param: Param,
    pub row_param: Param,
    pub col_param: Param,
    pub row_values: Vec<f64>,
    pub col_values: Vec<f64>,
    /// `grid[row][col]`, `None` where no in-range value exists.
    pub grid: Vec<Vec<Option<f64>>>,
}

impl MatrixTableData {
    /// Number of cells holding a value.
    pub fn filled_cells(&self) -> usize {
        self.grid.iter().flatten().filter(|cell| cell.is_some()).count()
    }
}

/// Build the matrix table for `fixed_param` held at its value in `values`,
/// solving `output_param` across the row and column sweeps.
pub fn generate_matrix_table_data(
    fixed_param: Param,
    output_param: Param,
    values: &ExposureValues,
    ranges: &RangeConfig,
    step_size: f64,
) -> Result<MatrixTableData, ExposureError> {
    if fixed_param == output_param {
        return Err(ExposureError::SameParam { param: fixed_param });
    }

    let axes = Param::others(&[fixed_param, output_param]);
    let (row_param, col_param) = (axes[0], axes[1]);
    let row_range = ranges.get(row_param);
    let col_range = ranges.get(col_param);
    let output_range = ranges.get(output_param);

    let row_values = generate_steps(row_range.min, row_range.max, step_size);
    let col_values = generate_steps(col_range.min, col_range.max, step_size);
    let fixed_value = values.get(fixed_param);

    tracing::debug!(
        "matrix table: fixed {fixed_param}={fixed_value}, output {output_param}, \
         rows {row_param} x{}, cols {col_param} x{}",
        row_values.len(),
        col_values.len()
    );

    let base = PartialExposure::empty().with(fixed_param, fixed_value);
    let grid: Vec<Vec<Option<f64>>> = row_values
        .iter()
        .map(|&row| {
            col_values
                .iter()
                .map(|&col| {
                    let known = base.with(row_param, row).with(col_param, col);
                    match calculate_missing_value(&known, output_param) {
                        Ok(result) if output_range.contains(result) => Some(result),
                        Ok(result) => {
                            tracing::trace!(
                                "{row_param}={row} {col_param}={col}: \
                                 {output_param}={result} out of range"
                            );
                            None
                        }
                        Err(e) => {
                            tracing::trace!("{row_param}={row} {col_param}={col}: {e}");
                            None
                        }
                    }
                })
                .collect()
        })
        .collect();

    Ok(MatrixTableData {
        fixed_param,
        fixed_value,
        output_param,
        row_param,
        col_param,
        row_values,
        col_values,
        grid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::ParamRange;

    #[test]
    fn test_axes_follow_canonical_order() {
        let ranges = RangeConfig::default();
        let values = ExposureValues::default();
        let cases = [
            (Param::Iso, Param::Ev, Param::Av, Param::Tv),
            (Param::Ev, Param::Iso, Param::Av, Param::Tv),
            (Param::Av, Param::Tv, Param::Ev, Param::Iso),
            (Param::Tv, Param::Ev, Param::Av, Param::Iso),
        ];
        for (fixed, output, row, col) in cases {
            let data = generate_matrix_table_data(fixed, output, &values, &ranges, 1.0).unwrap();
            assert_eq!((data.row_param, data.col_param), (row, col));
        }
    }

    #[test]
    fn test_iso_fixed_ev_output() {
        let ranges = RangeConfig::default();
        let values = ExposureValues::default();
        let data =
            generate_matrix_table_data(Param::Iso, Param::Ev, &values, &ranges, 1.0).unwrap();

        assert_eq!(data.row_values.len(), 10); // AV 0..=9
        assert_eq!(data.col_values.len(), 17); // TV -3..=13
        assert_eq!(data.grid.len(), data.row_values.len());
        for (r, row) in data.grid.iter().enumerate() {
            assert_eq!(row.len(), data.col_values.len());
            for (c, cell) in row.iter().enumerate() {
                if let Some(ev) = cell {
                    let expected = data.row_values[r] + data.col_values[c] - values.iso;
                    assert!((ev - expected).abs() < 1e-9);
                }
            }
        }
        // AV 9 + TV 13 = EV 22 exceeds the EV maximum of 16.
        assert_eq!(data.grid[9][16], None);
        assert_eq!(data.grid[5][10], Some(12.0));
    }

    #[test]
    fn test_narrow_output_range_empties_grid() {
        let mut ranges = RangeConfig::default();
        ranges.set(Param::Ev, ParamRange::new(100.0, 100.0));
        let data = generate_matrix_table_data(
            Param::Iso,
            Param::Ev,
            &ExposureValues::default(),
            &ranges,
            1.0,
        )
        .unwrap();
        assert_eq!(data.filled_cells(), 0);
        assert_eq!(data.grid.len(), data.row_values.len());
    }

    #[test]
    fn test_same_fixed_and_output_is_rejected() {
        let err = generate_matrix_table_data(
            Param::Tv,
            Param::Tv,
            &ExposureValues::default(),
            &RangeConfig::default(),
            1.0,
        )
        .unwrap_err();
        assert_eq!(err, ExposureError::SameParam { param: Param::Tv });
    }
}
