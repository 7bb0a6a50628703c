//! Calculator state owned by the bridge.
//!
//! The engine is stateless; this is the only place values, ranges, and the
//! step size persist between requests. Every request is applied here and
//! answered with a fresh [`EngineToUi`] message.

use expocalc_core::common_values::{
    DEFAULT_NEAR_THRESHOLD, format_common, is_near_common_value, parse_common,
};
use expocalc_core::range::range_label;
use expocalc_core::solver::recompute;
use expocalc_core::steps::{is_step_disabled, step_count};
use expocalc_core::units::{ev_description, format_strict};
use expocalc_core::{
    DefaultPolicy, ExposureValues, Param, ParamRange, RangeConfig, StepSize, adjust_value,
    derive_remaining, generate_1d_table_data, generate_matrix_table_data, range_warning,
};

use crate::bridge::BridgeError;
use crate::ipc::{EngineToUi, ParamDisplay, UiToEngine};

/// Mutable calculator state for one UI session.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorState {
    pub values: ExposureValues,
    pub ranges: RangeConfig,
    pub step: StepSize,
    /// Parameter recomputed whenever another one changes.
    pub calculated: Param,
    pub policy: DefaultPolicy,
}

impl CalculatorState {
    pub fn new(step: StepSize) -> Self {
        Self {
            values: ExposureValues::default(),
            ranges: RangeConfig::default(),
            step,
            calculated: Param::Ev,
            policy: DefaultPolicy::default(),
        }
    }

    /// Reject a range the table builders could not sweep at `step`.
    fn check_sweepable(
        param: Param,
        range: &ParamRange,
        step: StepSize,
    ) -> Result<(), BridgeError> {
        match step_count(range.min, range.max, step) {
            Some(_) => Ok(()),
            None => Err(BridgeError::RangeTooWide {
                param,
                min: range.min,
                max: range.max,
                step,
            }),
        }
    }

    /// Apply one request and produce the reply.
    pub fn handle(&mut self, msg: UiToEngine) -> Result<EngineToUi, BridgeError> {
        match msg {
            UiToEngine::RequestState => {}
            UiToEngine::SetValue { param, value } => self.set_value(param, value)?,
            UiToEngine::SetCommonValue { param, text } => {
                let value = parse_common(param, &text)?;
                self.set_value(param, value)?;
            }
            UiToEngine::SetCalculated { param } => {
                self.calculated = param;
                self.values = recompute(&self.values, param)?;
            }
            UiToEngine::Adjust { param, delta } => {
                let unavailable = BridgeError::StepUnavailable { param, delta };
                if is_step_disabled(self.values.get(param), delta, &self.ranges.get(param)) {
                    return Err(unavailable);
                }
                let adjusted =
                    adjust_value(&self.values, param, delta, self.calculated, &self.ranges)
                        .ok_or(unavailable)?;
                if let Some(warning) = &adjusted.warning {
                    tracing::debug!("after adjusting {param}: {warning}");
                }
                self.values = adjusted.values;
            }
            UiToEngine::SetRange { param, min, max } => {
                if !(min <= max) {
                    return Err(BridgeError::InvalidRange { param, min, max });
                }
                let range = ParamRange::new(min, max);
                Self::check_sweepable(param, &range, self.step)?;
                self.ranges.set(param, range);
            }
            UiToEngine::SetStep { step } => {
                if !(step.value().is_finite() && step.value() > 0.0) {
                    return Err(BridgeError::InvalidStep(step));
                }
                for param in Param::ALL {
                    Self::check_sweepable(param, &self.ranges.get(param), step)?;
                }
                self.step = step;
            }
            UiToEngine::Derive { fixed } => {
                self.values = derive_remaining(fixed, &self.values, &self.policy)?;
            }
            UiToEngine::Table1D { param1, mut param2 } => {
                if param2 == param1 {
                    param2 = param1.first_other();
                }
                let table = generate_1d_table_data(
                    param1,
                    param2,
                    &self.values,
                    &self.ranges,
                    self.step.value(),
                )?;
                return Ok(EngineToUi::Table1D { table });
            }
            UiToEngine::Matrix { fixed, mut output } => {
                if output == fixed {
                    output = fixed.first_other();
                }
                let matrix = generate_matrix_table_data(
                    fixed,
                    output,
                    &self.values,
                    &self.ranges,
                    self.step.value(),
                )?;
                tracing::debug!(
                    "matrix {fixed}->{output}: {} cells filled",
                    matrix.filled_cells()
                );
                return Ok(EngineToUi::Matrix { matrix });
            }
        }
        Ok(self.snapshot())
    }

    /// Set `param` and recompute the calculated parameter from the rest.
    fn set_value(&mut self, param: Param, value: f64) -> Result<(), BridgeError> {
        if !value.is_finite() {
            return Err(BridgeError::NonFinite { param });
        }
        self.values.set(param, value);
        if param != self.calculated {
            self.values = recompute(&self.values, self.calculated)?;
        }
        Ok(())
    }

    fn display(&self, param: Param) -> ParamDisplay {
        let value = self.values.get(param);
        ParamDisplay {
            param,
            label: param.label().to_string(),
            value,
            common: format_common(param, value),
            strict: format_strict(param, value),
            near_common: is_near_common_value(param, value, DEFAULT_NEAR_THRESHOLD),
            range_label: range_label(param, self.ranges.get(param)),
            warning: range_warning(param, value, &self.ranges),
            scene: (param == Param::Ev).then(|| ev_description(value)),
        }
    }

    /// Full state reply.
    pub fn snapshot(&self) -> EngineToUi {
        EngineToUi::State {
            values: self.values,
            ranges: self.ranges,
            step: self.step,
            calculated: self.calculated,
            params: Param::ALL.into_iter().map(|p| self.display(p)).collect(),
        }
    }
}
