use std::fmt;
use std::hash::{
    Hash,
    Hasher
};
use std::str::FromStr;

use nalgebra::Vector2;
use serde::{
    de::Error,
    Deserialize,
    Deserializer,
    Serialize,
    Serializer
};

use crate::math::interval::integerinterval::IntegerInterval;
use crate::math::interval::intervalerror::{
    IntervalError,
    ParseIntervalError
};

const HASH_SEED: u64 = 17;
const HASH_MULTIPLIER: u64 = 31;

/// Closed interval `[lower, upper]` over `f64` with inclusive bounds.
///
/// Bounds are kept sorted on every write, and a zero-width interval is
/// rejected with `IntervalError::InvalidArgument`. Inputs are assumed to be
/// finite.
///
/// ```rust
/// # use closedrange::math::interval::doubleinterval::DoubleInterval;
/// let range1 = DoubleInterval::new(0.25, 1.5).unwrap();
/// let range2 = DoubleInterval::new(2.25, 1.0).unwrap();
///
/// assert!(range1.contains_value(0.75));
/// assert!(range1.overlaps(&range2));
/// assert_eq!(range1.intersection(&range2).unwrap().to_pair(), (1.0, 1.5));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DoubleInterval {
    lower: f64,
    upper: f64
}

impl DoubleInterval {
    pub fn new(a: f64, b: f64) -> Result<DoubleInterval, IntervalError> {
        let (lower, upper) = Self::normalize(a, b)?;
        Ok(DoubleInterval { lower, upper })
    }

    // -0.0 is folded into 0.0 so that `==` and the bit-pattern hash agree.
    fn normalize(a: f64, b: f64) -> Result<(f64, f64), IntervalError> {
        if a == b {
            return Err(IntervalError::InvalidArgument { value: a });
        }
        let (lower, upper) = if a > b { (b, a) } else { (a, b) };
        Ok((lower + 0.0, upper + 0.0))
    }

    fn assign(&mut self, a: f64, b: f64) -> Result<bool, IntervalError> {
        let (lower, upper) = Self::normalize(a, b)?;
        let changed = lower.to_bits() != self.lower.to_bits()
            || upper.to_bits() != self.upper.to_bits();
        self.lower = lower;
        self.upper = upper;
        Ok(changed)
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper
    }

    pub fn length(&self) -> f64 {
        self.upper - self.lower
    }

    /// Re-validates `(value, upper_bound)` as a pair. Since the pair is
    /// resorted, both bounds may move. Returns whether the stored bounds
    /// changed; on error the interval is left untouched.
    pub fn set_lower_bound(&mut self, value: f64) -> Result<bool, IntervalError> {
        self.assign(value, self.upper)
    }

    /// Counterpart of [`DoubleInterval::set_lower_bound`] for the upper bound.
    pub fn set_upper_bound(&mut self, value: f64) -> Result<bool, IntervalError> {
        self.assign(self.lower, value)
    }

    pub fn mid(&self) -> f64 {
        (self.upper - self.lower) / 2.0 + self.lower
    }

    pub fn contains_value(&self, x: f64) -> bool {
        (x >= self.lower) && (x <= self.upper)
    }

    pub fn contains_interval(&self, other: &DoubleInterval) -> bool {
        self.contains_value(other.lower) && self.contains_value(other.upper)
    }

    /// Touching at a single shared bound counts as overlapping.
    pub fn overlaps(&self, other: &DoubleInterval) -> bool {
        self.contains_value(other.lower)
            || self.contains_value(other.upper)
            || other.contains_value(self.lower)
            || other.contains_value(self.upper)
    }

    /// Returns the common part of both intervals.
    ///
    /// Fails with `IntervalError::NoIntersection` when the intervals are
    /// disjoint or only share a single point, since neither result is a
    /// valid interval.
    pub fn intersection(&self, other: &DoubleInterval) -> Result<DoubleInterval, IntervalError> {
        let lower = self.lower.max(other.lower);
        let upper = self.upper.min(other.upper);
        if lower < upper {
            Ok(DoubleInterval { lower, upper })
        } else {
            Err(IntervalError::NoIntersection {
                lhs_lower: self.lower,
                lhs_upper: self.upper,
                rhs_lower: other.lower,
                rhs_upper: other.upper
            })
        }
    }

    /// Distance from `x` to the nearest bound, zero when `x` lies inside.
    pub fn distance_from(&self, x: f64) -> f64 {
        if self.contains_value(x) {
            0.0
        } else {
            f64::max(x - self.upper, self.lower - x)
        }
    }

    /// Maps `x` linearly from this interval onto `to`.
    pub fn scale(&self, x: f64, to: &DoubleInterval) -> f64 {
        to.length() * (x - self.lower) / self.length() + to.lower
    }

    /// Converts to an integer interval.
    ///
    /// With `inner_fit` the result is the widest integer interval inside this
    /// one (lower rounds up, upper rounds down); an interval that holds no
    /// integer yields `IntervalError::EmptyInnerFit`. Otherwise the result is
    /// the narrowest integer interval enclosing this one. Bounds outside the
    /// `i64` range saturate.
    pub fn to_integer_interval(&self, inner_fit: bool) -> Result<IntegerInterval, IntervalError> {
        let (lower, upper) = if inner_fit {
            (self.lower.ceil(), self.upper.floor())
        } else {
            (self.lower.floor(), self.upper.ceil())
        };
        if lower > upper {
            return Err(IntervalError::EmptyInnerFit {
                lower: self.lower,
                upper: self.upper
            });
        }
        Ok(IntegerInterval::new(lower as i64, upper as i64))
    }

    pub fn to_pair(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    pub fn to_array(&self) -> [f64; 2] {
        [self.lower, self.upper]
    }

    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.lower, self.upper)
    }

    /// Order-sensitive combination of both bounds' bit patterns.
    pub fn hash_code(&self) -> u64 {
        let mut hash = HASH_SEED;
        hash = hash.wrapping_mul(HASH_MULTIPLIER).wrapping_add(self.lower.to_bits());
        hash = hash.wrapping_mul(HASH_MULTIPLIER).wrapping_add(self.upper.to_bits());
        hash
    }

    /// Canonical text form with `format_bound` applied to each bound.
    pub fn format_with<F>(&self, format_bound: F) -> String
        where F: Fn(f64) -> String {
        format!("[{}, {}]", format_bound(self.lower), format_bound(self.upper))
    }
}

impl PartialEq for DoubleInterval {
    fn eq(&self, other: &Self) -> bool {
        (self.lower == other.lower) && (self.upper == other.upper)
    }
}

impl Eq for DoubleInterval {}

impl Hash for DoubleInterval {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl fmt::Display for DoubleInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(precision) => write!(f, "[{:.*}, {:.*}]", precision, self.lower, precision, self.upper),
            None => write!(f, "[{}, {}]", self.lower, self.upper)
        }
    }
}

impl FromStr for DoubleInterval {
    type Err = ParseIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .trim()
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or(ParseIntervalError::MissingBrackets)?;
        let parts: Vec<&str> = body.split(',').collect();
        if parts.len() != 2 {
            return Err(ParseIntervalError::ComponentCount(parts.len()));
        }
        let a = parts[0].trim().parse::<f64>()?;
        let b = parts[1].trim().parse::<f64>()?;
        Ok(DoubleInterval::new(a, b)?)
    }
}

impl Serialize for DoubleInterval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DoubleInterval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [a, b] = <[f64; 2]>::deserialize(deserializer)?;
        DoubleInterval::new(a, b).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn iv(a: f64, b: f64) -> DoubleInterval {
        DoubleInterval::new(a, b).unwrap()
    }

    fn std_hash(value: &DoubleInterval) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_new_normalizes_order() {
        let a = iv(1.5, 0.25);
        assert_eq!(a.lower_bound(), 0.25);
        assert_eq!(a.upper_bound(), 1.5);
        assert_eq!(a, iv(0.25, 1.5));
        assert_eq!(a.length(), 1.25);
    }

    #[test]
    fn test_new_rejects_degenerate() {
        assert_eq!(
            DoubleInterval::new(5.0, 5.0),
            Err(IntervalError::InvalidArgument { value: 5.0 })
        );
        assert!(DoubleInterval::new(0.0, -0.0).is_err());
    }

    #[test]
    fn test_negative_zero_is_canonical() {
        let a = iv(-0.0, 1.0);
        let b = iv(0.0, 1.0);
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());
        assert!(a.lower_bound().is_sign_positive());
    }

    #[test]
    fn test_set_lower_bound_resorts_pair() {
        let mut a = iv(0.0, 1.0);
        assert_eq!(a.set_lower_bound(3.0), Ok(true));
        assert_eq!(a.to_pair(), (1.0, 3.0));

        assert_eq!(a.set_lower_bound(1.0), Ok(false));
        assert_eq!(a.to_pair(), (1.0, 3.0));
    }

    #[test]
    fn test_set_upper_bound() {
        let mut a = iv(0.0, 1.0);
        assert_eq!(a.set_upper_bound(2.0), Ok(true));
        assert_eq!(a.to_pair(), (0.0, 2.0));
        assert_eq!(a.set_upper_bound(-1.0), Ok(true));
        assert_eq!(a.to_pair(), (-1.0, 0.0));
    }

    #[test]
    fn test_failed_write_leaves_bounds_untouched() {
        let mut a = iv(0.0, 1.0);
        assert!(matches!(
            a.set_lower_bound(1.0),
            Err(IntervalError::InvalidArgument { .. })
        ));
        assert!(a.set_upper_bound(0.0).is_err());
        assert_eq!(a.to_pair(), (0.0, 1.0));
    }

    #[test]
    fn test_contains_value_is_boundary_inclusive() {
        let a = iv(0.25, 1.5);
        assert!(a.contains_value(0.25));
        assert!(a.contains_value(1.5));
        assert!(a.contains_value(0.75));
        assert!(!a.contains_value(0.249999));
        assert!(!a.contains_value(1.500001));
    }

    #[test]
    fn test_contains_interval() {
        let a = iv(0.0, 10.0);
        assert!(a.contains_interval(&a));
        assert!(a.contains_interval(&iv(2.0, 3.0)));
        assert!(a.contains_interval(&iv(0.0, 10.0)));
        assert!(!a.contains_interval(&iv(9.0, 11.0)));
        assert!(!iv(2.0, 3.0).contains_interval(&a));
    }

    #[test]
    fn test_overlaps() {
        let a = iv(0.25, 1.5);
        assert!(a.overlaps(&iv(1.0, 2.25)));
        assert!(a.overlaps(&iv(-1.0, 5.0)));
        assert!(a.overlaps(&iv(0.5, 1.0)));
        assert!(a.overlaps(&iv(1.5, 2.0)));
        assert!(!a.overlaps(&iv(1.6, 2.0)));
    }

    #[test]
    fn test_intersection() {
        let a = iv(0.25, 1.5);
        let b = iv(1.0, 2.25);
        assert_eq!(a.intersection(&b), Ok(iv(1.0, 1.5)));
        assert_eq!(b.intersection(&a), Ok(iv(1.0, 1.5)));
        assert_eq!(a.intersection(&iv(-3.0, 3.0)), Ok(a));
    }

    #[test]
    fn test_intersection_of_disjoint_ranges_fails() {
        let result = iv(0.0, 1.0).intersection(&iv(2.0, 3.0));
        assert_eq!(
            result,
            Err(IntervalError::NoIntersection {
                lhs_lower: 0.0,
                lhs_upper: 1.0,
                rhs_lower: 2.0,
                rhs_upper: 3.0
            })
        );
    }

    #[test]
    fn test_intersection_of_touching_ranges_fails() {
        let a = iv(0.0, 1.0);
        let b = iv(1.0, 2.0);
        assert!(a.overlaps(&b));
        assert!(matches!(
            a.intersection(&b),
            Err(IntervalError::NoIntersection { .. })
        ));
    }

    #[test]
    fn test_to_integer_interval() {
        let a = iv(0.25, 1.5);
        assert_eq!(a.to_integer_interval(true), Ok(IntegerInterval::new(1, 1)));
        assert_eq!(a.to_integer_interval(false), Ok(IntegerInterval::new(0, 2)));

        let aligned = iv(-2.0, 3.0);
        assert_eq!(aligned.to_integer_interval(true), Ok(IntegerInterval::new(-2, 3)));
        assert_eq!(aligned.to_integer_interval(false), Ok(IntegerInterval::new(-2, 3)));
    }

    #[test]
    fn test_to_integer_interval_empty_inner_fit() {
        let a = iv(0.25, 0.75);
        assert_eq!(
            a.to_integer_interval(true),
            Err(IntervalError::EmptyInnerFit { lower: 0.25, upper: 0.75 })
        );
        assert_eq!(a.to_integer_interval(false), Ok(IntegerInterval::new(0, 1)));
    }

    #[test]
    fn test_to_integer_interval_saturates() {
        let wide = iv(-1.0e19, 1.0e19);
        let outer = wide.to_integer_interval(false).unwrap();
        assert_eq!(outer.to_pair(), (i64::MIN, i64::MAX));
        assert_eq!(outer.length(), u64::MAX);

        let inner = wide.to_integer_interval(true).unwrap();
        assert_eq!(inner.to_pair(), (i64::MIN, i64::MAX));
    }

    #[test]
    fn test_conversions() {
        let a = iv(0.25, 1.5);
        assert_eq!(a.to_pair(), (0.25, 1.5));
        assert_eq!(a.to_array(), [0.25, 1.5]);
        assert_eq!(a.to_vector(), Vector2::new(0.25, 1.5));
    }

    #[test]
    fn test_mid_distance_and_scale() {
        let a = iv(2.0, 4.0);
        assert_eq!(a.mid(), 3.0);
        assert_eq!(a.distance_from(3.0), 0.0);
        assert_eq!(a.distance_from(5.5), 1.5);
        assert_eq!(a.distance_from(0.5), 1.5);

        let unit = iv(0.0, 1.0);
        assert_eq!(a.scale(3.0, &unit), 0.5);
        assert_eq!(unit.scale(0.25, &a), 2.5);
    }

    #[test]
    fn test_hash_matches_equality() {
        let a = iv(0.25, 1.5);
        let b = iv(1.5, 0.25);
        assert_eq!(a.hash_code(), b.hash_code());
        assert_eq!(std_hash(&a), std_hash(&b));
        assert_ne!(a.hash_code(), iv(1.5, 2.5).hash_code());

        let set: HashSet<DoubleInterval> = [a, b, iv(0.0, 1.0)].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_display() {
        let a = iv(0.25, 1.5);
        assert_eq!(a.to_string(), "[0.25, 1.5]");
        assert_eq!(format!("{:.2}", a), "[0.25, 1.50]");
        assert_eq!(a.format_with(|x| format!("{:e}", x)), "[2.5e-1, 1.5e0]");
    }

    #[test]
    fn test_parse() {
        assert_eq!("[0.25, 1.5]".parse::<DoubleInterval>().unwrap(), iv(0.25, 1.5));
        assert_eq!("  [ 3 ,-1 ] ".parse::<DoubleInterval>().unwrap(), iv(-1.0, 3.0));
        assert!(matches!(
            "0.25, 1.5".parse::<DoubleInterval>(),
            Err(ParseIntervalError::MissingBrackets)
        ));
        assert!(matches!(
            "[1, 2, 3]".parse::<DoubleInterval>(),
            Err(ParseIntervalError::ComponentCount(3))
        ));
        assert!(matches!(
            "[a, 2]".parse::<DoubleInterval>(),
            Err(ParseIntervalError::Bound(_))
        ));
        assert!(matches!(
            "[2, 2]".parse::<DoubleInterval>(),
            Err(ParseIntervalError::Interval(IntervalError::InvalidArgument { .. }))
        ));
    }

    #[test]
    fn test_serde() {
        let a = iv(0.25, 1.5);
        assert_eq!(serde_json::to_string(&a).unwrap(), "[0.25,1.5]");
        let b: DoubleInterval = serde_json::from_str("[2.0, -1.0]").unwrap();
        assert_eq!(b, iv(-1.0, 2.0));
        assert!(serde_json::from_str::<DoubleInterval>("[1.0, 1.0]").is_err());
        assert!(serde_json::from_str::<DoubleInterval>("[1.0]").is_err());
    }
}
