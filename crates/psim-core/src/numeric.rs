use crate::{CoreError, CoreResult};

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

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> CoreResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Σ values[i]·weights[i]; both slices must have the same length.
pub fn weighted_sum(values: &[Real], weights: &[Real], what: &'static str) -> CoreResult<Real> {
    if values.len() != weights.len() {
        return Err(CoreError::LengthMismatch {
            what,
            left: values.len(),
            right: weights.len(),
        });
    }
    let total = values.iter().zip(weights).map(|(v, w)| v * w).sum();
    ensure_finite(total, what)
}

/// Bisection on a continuous scalar function.
///
/// Returns the abscissa where `f` changes sign inside `[lo, hi]`. The
/// interval is halved until its width drops below `x_tol` or `|f| <= f_tol`.
pub fn bisect<F>(
    mut f: F,
    lo: Real,
    hi: Real,
    x_tol: Real,
    f_tol: Real,
    max_iter: usize,
    what: &'static str,
) -> CoreResult<Real>
where
    F: FnMut(Real) -> CoreResult<Real>,
{
    let mut lo = lo;
    let mut hi = hi;
    let mut f_lo = f(lo)?;
    let f_hi = f(hi)?;

    if f_lo == 0.0 {
        return Ok(lo);
    }
    if f_hi == 0.0 {
        return Ok(hi);
    }
    if f_lo.signum() == f_hi.signum() {
        return Err(CoreError::NotBracketed { what, f_lo, f_hi });
    }

    for _ in 0..max_iter {
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid)?;

        if f_mid.abs() <= f_tol || (hi - lo).abs() <= x_tol {
            return Ok(mid);
        }

        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }

    Err(CoreError::NoConvergence {
        what,
        iterations: max_iter,
    })
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
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn weighted_sum_matches_manual() {
        let v = [0.5, 1.0, 0.0];
        let w = [0.2, 0.3, 0.5];
        let s = weighted_sum(&v, &w, "test").unwrap();
        assert!(nearly_equal(s, 0.4, Tolerances::default()));
    }

    #[test]
    fn weighted_sum_rejects_mismatch() {
        let err = weighted_sum(&[1.0], &[0.5, 0.5], "bins").unwrap_err();
        assert!(matches!(err, CoreError::LengthMismatch { left: 1, right: 2, .. }));
    }

    #[test]
    fn bisect_finds_sqrt_two() {
        let root = bisect(|x| Ok(x * x - 2.0), 0.0, 2.0, 1e-12, 0.0, 200, "sqrt").unwrap();
        assert!((root - 2.0_f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn bisect_requires_bracket() {
        let err = bisect(|x| Ok(x * x + 1.0), -1.0, 1.0, 1e-9, 0.0, 50, "none").unwrap_err();
        assert!(matches!(err, CoreError::NotBracketed { .. }));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn weighted_average_stays_in_range(
            pairs in prop::collection::vec((0.0_f64..=1.0, 0.0_f64..1.0), 1..20)
        ) {
            let total: f64 = pairs.iter().map(|(_, w)| w).sum();
            prop_assume!(total > 1e-9);
            let values: Vec<f64> = pairs.iter().map(|(v, _)| *v).collect();
            let weights: Vec<f64> = pairs.iter().map(|(_, w)| w / total).collect();
            let avg = weighted_sum(&values, &weights, "avg").unwrap();
            prop_assert!(avg >= -1e-12 && avg <= 1.0 + 1e-12);
        }
    }
}
