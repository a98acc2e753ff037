//! Easing functions for tween interpolation.
//!
//! All curves map [0, 1] onto [0, 1] with `f(0) = 0` and `f(1) = 1`, so a
//! tween that accumulates `f(t_now) - f(t_prev)` adds up to exactly its
//! full delta.

use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Quadratic ease-in for the first half, ease-out for the second.
    #[default]
    QuadraticInOut,
    /// Cubic ease-in-out, a steeper S-curve.
    CubicInOut,
}

impl EasingFunction {
    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::QuadraticIn => t * t,
            Self::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Self::QuadraticInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u / 2.0
                }
            }
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingFunction; 5] = [
        EasingFunction::Linear,
        EasingFunction::QuadraticIn,
        EasingFunction::QuadraticOut,
        EasingFunction::QuadraticInOut,
        EasingFunction::CubicInOut,
    ];

    #[test]
    fn test_endpoints() {
        for f in ALL {
            assert_eq!(f.evaluate(0.0), 0.0, "{f:?}");
            assert!((f.evaluate(1.0) - 1.0).abs() < 1e-6, "{f:?}");
        }
    }

    #[test]
    fn test_input_clamping() {
        for f in ALL {
            assert_eq!(f.evaluate(-0.5), 0.0);
            assert!((f.evaluate(1.5) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_quadratic_in_out_is_symmetric() {
        let f = EasingFunction::QuadraticInOut;
        assert_eq!(f.evaluate(0.5), 0.5);
        assert_eq!(f.evaluate(0.25), 0.125);
        for i in 0..=20 {
            let t = i as f32 / 20.0;
            let mirrored = 1.0 - f.evaluate(1.0 - t);
            assert!((f.evaluate(t) - mirrored).abs() < 1e-6, "t={t}");
        }
    }

    #[test]
    fn test_monotonic() {
        for f in ALL {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = f.evaluate(i as f32 / 100.0);
                assert!(v >= prev, "{f:?} decreased at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn test_quadratic_in_and_out() {
        assert_eq!(EasingFunction::QuadraticIn.evaluate(0.5), 0.25);
        assert_eq!(EasingFunction::QuadraticOut.evaluate(0.5), 0.75);
    }

    #[test]
    fn test_default_is_quadratic_in_out() {
        assert_eq!(EasingFunction::default(), EasingFunction::QuadraticInOut);
    }
}
