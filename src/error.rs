use thiserror::Error;

/// Failures surfaced to the caller of the impact engine.
///
/// Every variant is terminal for the request that produced it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("unknown material '{key}' (expected one of: stone, iron, ice)")]
    UnknownMaterial { key: String },

    #[error("unknown scenario '{tag}' (expected one of: ground, water, airburst, fragmentation)")]
    UnknownScenario { tag: String },

    #[error("unknown target '{key}' (expected one of: rock, sand, soil)")]
    UnknownTarget { key: String },

    #[error("invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("invalid calibration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        EngineError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}
