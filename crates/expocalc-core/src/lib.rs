//! ExpoCalc Core — exposure calculation and table generation.
//!
//! Works on four base-2 logarithmic parameters related by
//! `EV = AV + TV − ISO`: solving for a missing value, converting to and from
//! camera units, snapping to dial values, and building 1-D and matrix tables
//! over stepped ranges. Every function is pure; callers own all state.

pub mod common_values;
pub mod error;
pub mod params;
pub mod range;
pub mod solver;
pub mod steps;
pub mod table;
pub mod units;

// Re-exports for convenience.
pub use error::ExposureError;
pub use params::{DefaultPolicy, ExposureValues, Param, PartialExposure};
pub use range::{ParamRange, RangeConfig, clamp_to_range, is_value_in_range, range_warning};
pub use solver::{adjust_value, calculate_missing_value, derive_remaining};
pub use steps::{MAX_STEP_COUNT, StepSize, generate_steps, step_count};
pub use table::{MatrixTableData, Table1D, generate_1d_table_data, generate_matrix_table_data};
