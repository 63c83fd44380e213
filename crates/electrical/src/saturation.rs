//! Piecewise-linear saturation used to bound drop compensation.

/// Normalize `current` against `slope` and saturate the result to [-1, 1].
///
/// Returns -1 at or below `-slope`, 1 at or above `slope`, and `current / slope`
/// in between. `slope` must be strictly positive; see [`guarded_drop`].
pub fn drop(current: f64, slope: f64) -> f64 {
    if current <= -slope {
        return -1.0;
    }
    if current >= slope {
        return 1.0;
    }
    current / slope
}

/// [`drop`] that tolerates a non-positive (or NaN) slope.
///
/// A degenerate slope collapses the ramp into a hard sign: -1, 0 or 1.
pub fn guarded_drop(current: f64, slope: f64) -> f64 {
    if slope > 0.0 {
        return drop(current, slope);
    }
    if current > 0.0 {
        1.0
    } else if current < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_saturates_outside_band() {
        assert_eq!(drop(-0.04, 0.04), -1.0);
        assert_eq!(drop(-3.0, 0.04), -1.0);
        assert_eq!(drop(0.04, 0.04), 1.0);
        assert_eq!(drop(12.0, 0.04), 1.0);
    }

    #[test]
    fn test_linear_inside_band() {
        assert!((drop(0.02, 0.04) - 0.5).abs() < 1e-12);
        assert!((drop(-0.01, 0.04) - (-0.25)).abs() < 1e-12);
        assert_eq!(drop(0.0, 0.04), 0.0);
    }

    #[test]
    fn test_continuous_at_edges() {
        let v = 0.04;
        let eps = 1e-12;
        assert!((drop(v - eps, v) - drop(v, v)).abs() < 1e-9);
        assert!((drop(-v + eps, v) - drop(-v, v)).abs() < 1e-9);
    }

    #[test]
    fn test_random_sweep_stays_bounded() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v: f64 = rng.gen_range(1e-4..5.0);
            let i: f64 = rng.gen_range(-20.0..20.0);
            let out = drop(i, v);
            assert!((-1.0..=1.0).contains(&out));
            if i > -v && i < v {
                assert!((out - i / v).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_guard_on_degenerate_slope() {
        assert_eq!(guarded_drop(0.3, 0.0), 1.0);
        assert_eq!(guarded_drop(-0.3, -1.0), -1.0);
        assert_eq!(guarded_drop(0.0, 0.0), 0.0);
        assert_eq!(guarded_drop(0.5, f64::NAN), 1.0);
        assert!((guarded_drop(0.01, 0.04) - 0.25).abs() < 1e-12);
    }
}
