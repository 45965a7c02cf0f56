use std::num::ParseFloatError;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum IntervalError {
    #[error("interval does not accept equal values ({value}) for the lower and upper bound")]
    InvalidArgument { value: f64 },
    #[error("intervals [{lhs_lower}, {lhs_upper}] and [{rhs_lower}, {rhs_upper}] have no intersection of positive length")]
    NoIntersection {
        lhs_lower: f64,
        lhs_upper: f64,
        rhs_lower: f64,
        rhs_upper: f64,
    },
    #[error("interval [{lower}, {upper}] contains no integer-bounded inner interval")]
    EmptyInnerFit { lower: f64, upper: f64 },
}

#[derive(Debug, Error)]
pub enum ParseIntervalError {
    #[error("interval text must be enclosed in '[' and ']'")]
    MissingBrackets,
    #[error("interval text must contain exactly two comma separated bounds, found {0}")]
    ComponentCount(usize),
    #[error("invalid bound: {0}")]
    Bound(#[from] ParseFloatError),
    #[error(transparent)]
    Interval(#[from] IntervalError),
}
