//! IPC message contracts between the calculator UI and the engine bridge.
//!
//! One JSON object per line in each direction, using the
//! `#[serde(tag = "type", content = "data")]` layout.

use serde::{Deserialize, Serialize};

use expocalc_core::{ExposureValues, MatrixTableData, Param, RangeConfig, StepSize, Table1D};

/// Messages from the UI to the engine bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToEngine {
    /// Request a fresh snapshot of the calculator state.
    RequestState,

    /// Set a parameter to a raw log-scale value.
    SetValue {
        /// Parameter to change.
        param: Param,
        /// New value.
        value: f64,
    },

    /// Set a parameter from dial notation, e.g. `"f/2.8"` or `"1/125"`.
    SetCommonValue {
        /// Parameter to change.
        param: Param,
        /// User-typed text.
        text: String,
    },

    /// Choose which parameter single mode recomputes.
    SetCalculated {
        /// The parameter to derive from the other three.
        param: Param,
    },

    /// Step a parameter by `delta` stops.
    Adjust {
        /// Parameter to step.
        param: Param,
        /// Signed step, e.g. `1.0` or `-1/3`.
        delta: f64,
    },

    /// Replace the bounds for one parameter.
    SetRange {
        /// Parameter whose range changes.
        param: Param,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Change the sweep granularity.
    SetStep {
        /// New step size.
        step: StepSize,
    },

    /// Fix two parameters and derive the other two from the default policy.
    Derive {
        /// The two parameters to keep.
        fixed: [Param; 2],
    },

    /// Build a 1-D table with two fixed parameters.
    Table1D {
        /// First fixed parameter.
        param1: Param,
        /// Second fixed parameter.
        param2: Param,
    },

    /// Build a matrix table.
    Matrix {
        /// Parameter held at its current value.
        fixed: Param,
        /// Parameter computed in each cell.
        output: Param,
    },
}

/// Display data for one parameter row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDisplay {
    /// Which parameter this row describes.
    pub param: Param,
    /// Menu label, e.g. `"AV (aperture)"`.
    pub label: String,
    /// Raw log-scale value.
    pub value: f64,
    /// Dial-style display, e.g. `"f/5.6"`.
    pub common: String,
    /// Exact display, e.g. `"f/5.7"`.
    pub strict: String,
    /// Whether `value` sits close to a dial value.
    pub near_common: bool,
    /// Configured range in dial notation.
    pub range_label: String,
    /// Range violation message, if any.
    pub warning: Option<String>,
    /// Scene description with illuminance, EV rows only.
    pub scene: Option<String>,
}

/// Messages from the engine bridge to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EngineToUi {
    /// Current calculator state.
    State {
        /// Current parameter values.
        values: ExposureValues,
        /// Current bounds.
        ranges: RangeConfig,
        /// Current step size.
        step: StepSize,
        /// Parameter recomputed in single mode.
        calculated: Param,
        /// Per-parameter display rows in canonical order.
        params: Vec<ParamDisplay>,
    },

    /// A 1-D table is ready.
    Table1D {
        /// The table rows.
        table: Table1D,
    },

    /// A matrix table is ready.
    Matrix {
        /// The matrix data.
        matrix: MatrixTableData,
    },

    /// A request could not be applied.
    Error {
        /// Error description.
        message: String,
    },
}
