//! Application configuration for the demo bridge.

use expocalc_core::StepSize;

/// Default tracing filter when `EXPOCALC_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime configuration for the ExpoCalc bridge.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Initial sweep and step-button granularity.
    pub step: StepSize,
    /// `tracing` filter directive for stderr logging.
    pub log_filter: String,
}

impl AppConfig {
    /// Build a config from an environment lookup. Missing or unparseable
    /// entries fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            step: lookup("EXPOCALC_STEP")
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            log_filter: lookup("EXPOCALC_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}
