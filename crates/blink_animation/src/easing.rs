//! Easing curves for timed animations
//!
//! Every curve maps normalized time in `[0, 1]` to normalized progress with
//! `apply(0.0) == 0.0` and `apply(1.0) == 1.0`. Inputs outside the range are
//! clamped.

/// Easing function applied to a timed leg
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Slow start (cubic)
    EaseIn,
    /// Slow finish (cubic)
    EaseOut,
    /// Slow start and finish (cubic), the default for timed legs
    #[default]
    EaseInOut,
    /// CSS-style cubic bezier with control points (x1, y1) and (x2, y2)
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// The standard CSS `ease-in-out` curve
    pub const STANDARD: Easing = Easing::CubicBezier(0.42, 0.0, 0.58, 1.0);

    /// Apply the curve to normalized time `t`
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, x1, y1, x2, y2),
        }
    }
}

fn bezier_component(t: f32, p1: f32, p2: f32) -> f32 {
    // Endpoints are fixed at 0 and 1
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

fn bezier_slope(t: f32, p1: f32, p2: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

fn cubic_bezier(x: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    // Newton-Raphson first, bisection when the slope flattens out
    let mut t = x;
    for _ in 0..8 {
        let err = bezier_component(t, x1, x2) - x;
        if err.abs() < 1e-6 {
            return bezier_component(t, y1, y2);
        }
        let slope = bezier_slope(t, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        t -= err / slope;
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    t = x;
    for _ in 0..32 {
        let estimate = bezier_component(t, x1, x2);
        if (estimate - x).abs() < 1e-6 {
            break;
        }
        if estimate < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) * 0.5;
    }
    bezier_component(t, y1, y2)
}
