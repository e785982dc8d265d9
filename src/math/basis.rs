//! Bernstein polynomial basis.
//!
//! The degree-`d` basis is:
//!
//! - `b_{k,d}(t) = C(d, k) t^k (1 - t)^(d - k)`, for `k = 0..=d`
//!
//! Numerical notes:
//! - Binomial coefficients are built multiplicatively in `f64`, which is exact
//!   for every degree a curve fit will realistically use.
//! - At `t = 0` and `t = 1` every basis function except one contains a factor
//!   that is exactly zero, so the endpoint values are exact (`0^0 == 1` via `powi`).

/// Binomial coefficient `C(n, k)` as `f64`.
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut c = 1.0;
    for i in 0..k {
        c = c * (n - i) as f64 / (i + 1) as f64;
    }
    c.round()
}

/// Evaluate `b_{k,degree}(t)`.
pub fn bernstein(degree: usize, k: usize, t: f64) -> f64 {
    if k > degree {
        return 0.0;
    }
    binomial(degree, k) * t.powi(k as i32) * (1.0 - t).powi((degree - k) as i32)
}

/// Fill `out` with all `degree + 1` basis values at `t`.
///
/// # Panics
/// Panics if `out.len() != degree + 1`.
pub fn bernstein_row(degree: usize, t: f64, out: &mut [f64]) {
    assert_eq!(out.len(), degree + 1, "basis row must have degree + 1 entries");
    for (k, slot) in out.iter_mut().enumerate() {
        *slot = bernstein(degree, k, t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomial_small_values() {
        assert_eq!(binomial(0, 0), 1.0);
        assert_eq!(binomial(3, 1), 3.0);
        assert_eq!(binomial(4, 2), 6.0);
        assert_eq!(binomial(10, 3), 120.0);
        assert_eq!(binomial(3, 5), 0.0);
    }

    #[test]
    fn basis_partitions_unity() {
        for degree in 1..=12 {
            let mut row = vec![0.0; degree + 1];
            for i in 0..=20 {
                let t = i as f64 / 20.0;
                bernstein_row(degree, t, &mut row);
                let sum: f64 = row.iter().sum();
                assert!((sum - 1.0).abs() < 1e-12, "degree {degree}, t={t}: sum {sum}");
                assert!(row.iter().all(|v| *v >= 0.0));
            }
        }
    }

    #[test]
    fn basis_is_exact_at_the_ends() {
        let degree = 7;
        let mut row = vec![0.0; degree + 1];

        bernstein_row(degree, 0.0, &mut row);
        assert_eq!(row[0], 1.0);
        assert!(row[1..].iter().all(|v| *v == 0.0));

        bernstein_row(degree, 1.0, &mut row);
        assert_eq!(row[degree], 1.0);
        assert!(row[..degree].iter().all(|v| *v == 0.0));
    }
}
