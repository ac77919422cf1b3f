use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FootprintError {
    #[error("Invalid angle {0}: only multiples of 90 degrees are supported")]
    InvalidAngle(i32),

    #[error("Curve has two consecutive arc centers at node {index}")]
    AdjacentArcCenters { index: usize },

    #[error("Curve starts with an arc center at node {index}")]
    ArcCenterWithoutStart { index: usize },

    #[error("Curve ends with an arc center at node {index}")]
    DanglingArcCenter { index: usize },

    #[error("Shape needs more points, got {count}")]
    TooFewPoints { count: usize },

    #[error("Invalid key size {0}: units must be a positive finite number")]
    InvalidUnits(f64),

    #[error("Unknown {kind} option '{value}', expected one of: {expected}")]
    UnknownOption {
        kind: &'static str,
        value: String,
        expected: String,
    },
}

pub type Result<T> = std::result::Result<T, FootprintError>;
