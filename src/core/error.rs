//! Error type shared by configuration parsing and widget construction.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpinnerError {
    #[error("tick count must be at least 1 (got {0})")]
    InvalidTickCount(usize),

    #[error("{name} must be a positive, finite number (got {value})")]
    InvalidDimension { name: &'static str, value: f64 },

    #[error("tick speed must be greater than zero")]
    InvalidSpeed,

    #[error("unknown easing curve: {0:?}")]
    UnknownCurve(String),

    #[error("invalid color: {0:?}")]
    InvalidColor(String),
}

pub type SpinnerResult<T> = Result<T, SpinnerError>;
