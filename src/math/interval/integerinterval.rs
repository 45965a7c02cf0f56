use std::fmt;

/// Closed integer interval `[lower, upper]`.
///
/// Unlike `DoubleInterval`, a single point (`lower == upper`) is a valid
/// integer interval: the inner fit of `[0.25, 1.5]` is `[1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntegerInterval {
    lower: i64,
    upper: i64
}

impl IntegerInterval {
    pub fn new(a: i64, b: i64) -> IntegerInterval {
        if a > b {
            IntegerInterval { lower: b, upper: a }
        } else {
            IntegerInterval { lower: a, upper: b }
        }
    }

    pub fn lower_bound(&self) -> i64 {
        self.lower
    }

    pub fn upper_bound(&self) -> i64 {
        self.upper
    }

    /// Unsigned so that saturated bounds (`i64::MIN`, `i64::MAX`) cannot overflow.
    pub fn length(&self) -> u64 {
        self.upper.abs_diff(self.lower)
    }

    pub fn contains_value(&self, x: i64) -> bool {
        (x >= self.lower) && (x <= self.upper)
    }

    pub fn contains_interval(&self, other: &IntegerInterval) -> bool {
        self.contains_value(other.lower) && self.contains_value(other.upper)
    }

    pub fn overlaps(&self, other: &IntegerInterval) -> bool {
        self.contains_value(other.lower)
            || self.contains_value(other.upper)
            || other.contains_value(self.lower)
            || other.contains_value(self.upper)
    }

    pub fn to_pair(&self) -> (i64, i64) {
        (self.lower, self.upper)
    }
}

impl fmt::Display for IntegerInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}
