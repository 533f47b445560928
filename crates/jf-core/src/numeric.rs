/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    /// Relative-only tolerance, for comparing quantities far from zero.
    pub fn relative(rel: Real) -> Self {
        Self { abs: 0.0, rel }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Logarithmic mean `(a - b) / ln(a / b)`.
///
/// Not guarded: `a == b` yields NaN (0/0), a non-positive ratio yields NaN.
pub fn log_mean(a: Real, b: Real) -> Real {
    (a - b) / (a / b).ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn relative_tolerance_ignores_scale() {
        let tol = Tolerances::relative(1e-6);
        assert!(nearly_equal(1.0e6, 1.0e6 + 0.5, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-3, tol));
    }

    #[test]
    fn log_mean_matches_closed_form() {
        let tm = log_mean(1273.15, 573.0);
        let expected = (1273.15 - 573.0) / (1273.15_f64 / 573.0).ln();
        assert_eq!(tm, expected);
        assert!(tm > 573.0 && tm < 1273.15);
    }

    #[test]
    fn log_mean_of_equal_values_is_nan() {
        assert!(log_mean(300.0, 300.0).is_nan());
    }
}
