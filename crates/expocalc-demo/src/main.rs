//! ExpoCalc Demo — drives the exposure engine over a JSON line protocol.
//!
//! A presentation layer writes `UiToEngine` messages to stdin and reads
//! `EngineToUi` replies from stdout. Logs go to stderr.

mod bridge;
mod config;
mod ipc;
mod state;

use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::state::CalculatorState;

fn main() -> Result<(), bridge::BridgeError> {
    let config = AppConfig::default();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("ExpoCalc bridge ready (step {})", config.step);

    let mut state = CalculatorState::new(config.step);
    let stdin = std::io::stdin();
    bridge::run(&mut state, stdin.lock(), std::io::stdout().lock())
}
