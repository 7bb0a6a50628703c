//! Line-oriented JSON bridge between the UI process and the engine.
//!
//! Reads one [`UiToEngine`] message per input line and writes one
//! [`EngineToUi`] reply per output line. Malformed requests and rejected
//! operations are answered with [`EngineToUi::Error`]; only I/O failures end
//! the loop early.

use std::io::{BufRead, Write};

use expocalc_core::{ExposureError, MAX_STEP_COUNT, Param, StepSize};

use crate::ipc::{EngineToUi, UiToEngine};
use crate::state::CalculatorState;

/// Errors raised while serving the bridge.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Engine(#[from] ExposureError),

    #[error("cannot step {param} by {delta} from its current value")]
    StepUnavailable { param: Param, delta: f64 },

    #[error("invalid {param} range: min {min} is greater than max {max}")]
    InvalidRange { param: Param, min: f64, max: f64 },

    #[error("step size must be positive, got {0}")]
    InvalidStep(StepSize),

    #[error(
        "{param} range {min} ~ {max} needs more than {limit} steps of {step}",
        limit = MAX_STEP_COUNT
    )]
    RangeTooWide {
        param: Param,
        min: f64,
        max: f64,
        step: StepSize,
    },

    #[error("{param} must be a finite number")]
    NonFinite { param: Param },
}

/// Parse and apply one request line, always producing a reply.
pub fn handle_line(state: &mut CalculatorState, line: &str) -> EngineToUi {
    let result = serde_json::from_str::<UiToEngine>(line)
        .map_err(BridgeError::from)
        .and_then(|msg| {
            tracing::debug!("request: {msg:?}");
            state.handle(msg)
        });

    result.unwrap_or_else(|e| {
        tracing::warn!("request rejected: {e}");
        EngineToUi::Error {
            message: e.to_string(),
        }
    })
}

/// Serve requests from `input` until EOF, writing replies to `output`.
pub fn run(
    state: &mut CalculatorState,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<(), BridgeError> {
    let mut served = 0usize;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let reply = handle_line(state, &line);
        serde_json::to_writer(&mut output, &reply)?;
        output.write_all(b"\n")?;
        output.flush()?;
        served += 1;
    }
    tracing::info!("input closed after {served} requests");
    Ok(())
}
