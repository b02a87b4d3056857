use std::cmp::Ordering;
use std::fmt::Display;

/// Tolerance of [`FPA`] comparisons, in units of least precision
pub const METRIC_ULPS: i64 = 4;

/// Metric that went through floating point arithmetic (areas, ratios, heights).
/// Two metrics are equal if they are within [`METRIC_ULPS`] ulps (or one machine epsilon) of each other,
/// ordering only applies beyond that.
#[derive(Debug, Clone, Copy)]
pub struct FPA(pub f64);

impl FPA {
    /// Equality with a tolerance of `ulps` units of least precision.
    pub fn approx_eq_ulps(self, other: impl Into<FPA>, ulps: i64) -> bool {
        float_cmp::approx_eq!(f64, self.0, other.into().0, epsilon = f64::EPSILON, ulps = ulps)
    }

    /// Whether the metric lies above `limit` by more than arithmetic noise.
    pub fn exceeds(self, limit: impl Into<FPA>) -> bool {
        self > limit.into()
    }
}

impl<T> From<T> for FPA
where
    T: Into<f64>,
{
    fn from(n: T) -> Self {
        FPA(n.into())
    }
}

impl PartialEq<Self> for FPA {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq_ulps(*other, METRIC_ULPS)
    }
}

impl PartialOrd<Self> for FPA {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.eq(other) {
            true => Some(Ordering::Equal),
            false => self.0.partial_cmp(&other.0),
        }
    }
}

impl Display for FPA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerates_arithmetic_noise() {
        let far = 0.1 + 0.2;
        assert!(far > 0.3);
        assert!(FPA(far) == FPA(0.3));
        assert!(!FPA(far).exceeds(0.3));
        assert!(FPA(0.31).exceeds(0.3));
        assert!(FPA::from(2u32) == FPA(2.0));
    }

    #[test]
    fn tolerance_is_configurable() {
        let next = f64::from_bits(1.05f64.to_bits() + 8);
        assert!(!FPA(next).approx_eq_ulps(1.05, METRIC_ULPS));
        assert!(FPA(next).approx_eq_ulps(1.05, 8));
        assert!(!FPA(1.05).approx_eq_ulps(1.06, 1_000));
    }

    #[test]
    fn rounded_cap_is_not_exceeded_by_noise() {
        //1.045 + 0.005 lands just below 1.05
        let cap = 1.045 + 0.005;
        assert!(!FPA(1.05).exceeds(cap));
    }
}
