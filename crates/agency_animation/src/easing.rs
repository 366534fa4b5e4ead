//! Easing functions for tweens

use serde::{Deserialize, Serialize};

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    /// CSS `ease`, i.e. `cubic-bezier(0.25, 0.1, 0.25, 1.0)`
    Standard,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::Standard => cubic_bezier(t, 0.25, 0.1, 0.25, 1.0),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, *x1, *y1, *x2, *y2),
        }
    }
}

/// Cubic bezier easing (CSS semantics, endpoints pinned to 0 and 1).
///
/// Newton-Raphson on the x curve, bisection when the slope flattens.
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x = t as f64;
    let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);

    let mut p = x;
    for _ in 0..8 {
        let err = sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return sample(p, y1, y2) as f32;
        }
        let slope = slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    p = x;
    for _ in 0..24 {
        let val = sample(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    sample(p, y1, y2) as f32
}

#[inline]
fn sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 9] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::Standard,
        Easing::CubicBezier(0.4, 0.0, 0.2, 1.0),
    ];

    #[test]
    fn test_endpoints_are_exact() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-4, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-4, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(Easing::Linear.apply(-2.0), 0.0);
        assert_eq!(Easing::Linear.apply(3.0), 1.0);
    }

    #[test]
    fn test_ease_out_leads_linear() {
        assert!(Easing::EaseOut.apply(0.3) > 0.3);
        assert!(Easing::EaseIn.apply(0.3) < 0.3);
    }

    #[test]
    fn test_linear_bezier_is_identity() {
        let easing = Easing::CubicBezier(0.0, 0.0, 1.0, 1.0);
        for i in 1..10 {
            let t = i as f32 / 10.0;
            assert!((easing.apply(t) - t).abs() < 1e-3);
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Easing::EaseInOutCubic).unwrap();
        assert_eq!(json, "\"ease_in_out_cubic\"");
    }
}
