use crate::params::Param;

/// Failures reported by the exposure engine.
///
/// `InsufficientInputs` is a routine outcome during table sweeps and is
/// treated there as "skip this candidate".
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExposureError {
    #[error("cannot calculate {target} with the provided values")]
    InsufficientInputs { target: Param },

    #[error("unrecognised {param} value: {input:?}")]
    Unparseable { param: Param, input: String },

    #[error("{param} was selected twice; two distinct parameters are required")]
    SameParam { param: Param },
}
