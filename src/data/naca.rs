//! NACA 4-digit airfoil outlines.
//!
//! A code of the form MPTT gives the maximum camber M (% chord), its location
//! P (tenths of chord) and the maximum thickness TT (% chord). NACA 2412 has
//! 2% camber at 40% chord and is 12% thick.
//!
//! Points are produced in Selig order: upper surface from the trailing edge
//! to the leading edge, then the lower surface back to the trailing edge. The
//! leading-edge point is shared and appears once.

use crate::domain::{Point, Profile};
use crate::error::AppError;

/// Parsed NACA 4-digit parameters, all as chord fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Naca4 {
    pub max_camber: f64,
    pub max_camber_at: f64,
    pub thickness: f64,
}

impl Naca4 {
    pub fn parse(code: &str) -> Result<Self, AppError> {
        let code = code.trim();
        let code = code
            .strip_prefix("NACA")
            .or_else(|| code.strip_prefix("naca"))
            .unwrap_or(code)
            .trim();
        if code.len() != 4 || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::new(2, format!("Invalid NACA 4-digit code '{code}'.")));
        }
        let digit = |i: usize| f64::from(code.as_bytes()[i] - b'0');

        let naca = Self {
            max_camber: digit(0) / 100.0,
            max_camber_at: digit(1) / 10.0,
            thickness: (digit(2) * 10.0 + digit(3)) / 100.0,
        };
        if naca.thickness <= 0.0 {
            return Err(AppError::new(2, format!("NACA '{code}' has zero thickness.")));
        }
        if naca.max_camber > 0.0 && naca.max_camber_at <= 0.0 {
            return Err(AppError::new(
                2,
                format!("NACA '{code}' has camber but no camber position."),
            ));
        }
        Ok(naca)
    }

    /// Mean camber line height and slope at chord fraction `x`.
    fn camber(&self, x: f64) -> (f64, f64) {
        let (m, p) = (self.max_camber, self.max_camber_at);
        if m <= 0.0 || p <= 0.0 {
            return (0.0, 0.0);
        }
        if x < p {
            let yc = m / (p * p) * (2.0 * p * x - x * x);
            let dyc = 2.0 * m / (p * p) * (p - x);
            (yc, dyc)
        } else {
            let q = (1.0 - p) * (1.0 - p);
            let yc = m / q * ((1.0 - 2.0 * p) + 2.0 * p * x - x * x);
            let dyc = 2.0 * m / q * (p - x);
            (yc, dyc)
        }
    }

    /// Half thickness at chord fraction `x` (open trailing edge form).
    fn half_thickness(&self, x: f64) -> f64 {
        5.0 * self.thickness
            * (0.2969 * x.sqrt() - 0.1260 * x - 0.3516 * x.powi(2) + 0.2843 * x.powi(3)
                - 0.1015 * x.powi(4))
    }

    fn surface(&self, x: f64) -> (Point, Point) {
        let (yc, dyc) = self.camber(x);
        let yt = self.half_thickness(x);
        let theta = dyc.atan();
        let (s, c) = theta.sin_cos();
        let upper = Point::new(x - yt * s, yc + yt * c);
        let lower = Point::new(x + yt * s, yc - yt * c);
        (upper, lower)
    }
}

/// Generate a NACA 4-digit profile with `points_per_side` cosine-spaced stations.
pub fn naca4(code: &str, points_per_side: usize) -> Result<Profile, AppError> {
    if points_per_side < 2 {
        return Err(AppError::new(2, "NACA generation needs at least 2 points per side."));
    }
    let naca = Naca4::parse(code)?;

    // Cosine spacing clusters stations at both edges.
    let last = (points_per_side - 1) as f64;
    let stations: Vec<f64> = (0..points_per_side)
        .map(|i| 0.5 * (1.0 - (std::f64::consts::PI * i as f64 / last).cos()))
        .collect();

    let mut points = Vec::with_capacity(2 * points_per_side - 1);
    for &x in stations.iter().rev() {
        points.push(naca.surface(x).0);
    }
    for &x in stations.iter().skip(1) {
        points.push(naca.surface(x).1);
    }

    Ok(Profile::from_points(Some(format!("NACA {}", code.trim())), &points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_codes() {
        let n = Naca4::parse("2412").unwrap();
        assert_relative_eq!(n.max_camber, 0.02);
        assert_relative_eq!(n.max_camber_at, 0.4);
        assert_relative_eq!(n.thickness, 0.12);
        assert!(Naca4::parse("NACA 0012").is_ok());
        assert!(Naca4::parse("24a2").is_err());
        assert!(Naca4::parse("241").is_err());
        assert!(Naca4::parse("2012").is_err());
    }

    #[test]
    fn thickness_matches_reference_table() {
        // Half thickness of NACA 0012 at 20% and 84% chord.
        let n = Naca4::parse("0012").unwrap();
        assert_relative_eq!(n.half_thickness(0.2), 0.057375, epsilon = 1e-3);
        assert_relative_eq!(n.half_thickness(0.84), 0.021694, epsilon = 1e-3);
    }

    #[test]
    fn symmetric_profile_in_selig_order() {
        let profile = naca4("0012", 41).unwrap();
        assert_eq!(profile.len(), 81);

        let first = profile.point(0).unwrap();
        let le = profile.point(40).unwrap();
        let last = profile.point(80).unwrap();
        assert_relative_eq!(first.x, 1.0);
        assert_relative_eq!(last.x, 1.0);
        assert_eq!(le, Point::new(0.0, 0.0));
        assert!(first.y > 0.0);
        assert_relative_eq!(first.y, -last.y);

        for i in 0..40 {
            let u = profile.point(i).unwrap();
            let l = profile.point(80 - i).unwrap();
            assert_relative_eq!(u.x, l.x, epsilon = 1e-12);
            assert_relative_eq!(u.y, -l.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn cambered_profile_sits_above_the_chord() {
        let profile = naca4("4412", 31).unwrap();
        let upper_mid = profile.point(15).unwrap();
        let lower_mid = profile.point(45).unwrap();
        assert!(upper_mid.y > 0.0);
        assert!(upper_mid.y.abs() > lower_mid.y.abs());
    }
}
