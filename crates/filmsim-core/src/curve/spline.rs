//! Monotone cubic curve evaluation through tone-curve control points.
//!
//! # Algorithm
//! Fritsch–Carlson (1980) monotone piecewise cubic Hermite interpolation.
//! Secant slopes `d_k = (y_{k+1} - y_k) / (x_{k+1} - x_k)` seed the tangents:
//! interior tangents average neighbouring secants, or are zero at local
//! extrema. Each segment then rescales its tangents so that
//! `alpha² + beta² <= 9`, which guarantees no overshoot:
//! ```text
//! p(t) = y0 + (y1 - y0)·h01(t) + h·(m0·h10(t) + m1·h11(t))
//! ```
//!
//! Two control points degrade to linear interpolation. One control point is
//! a constant. Queries outside the control range clamp to the boundary `y`.
//!
//! # Complexity
//! - Construction: O(P log P) sort + O(P) tangents
//! - Evaluate: O(log P) binary search + O(1) interpolation

use crate::error::CurveError;
use crate::model::CurvePoint;

/// Tone curve prepared for repeated evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct MonotoneCurve {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Hermite tangents, one per control point. Empty when fewer than
    /// three points (constant or linear curve).
    tangents: Vec<f64>,
}

impl MonotoneCurve {
    /// Sort `points` by `x` and precompute tangents.
    ///
    /// Fails on an empty set or when two points share an `x`.
    pub fn new(points: &[CurvePoint]) -> Result<Self, CurveError> {
        if points.is_empty() {
            return Err(CurveError::Empty);
        }

        let mut sorted: Vec<CurvePoint> = points.to_vec();
        sorted.sort_by(|a, b| a.x().total_cmp(&b.x()));
        if let Some(pair) = sorted.windows(2).find(|w| w[0].x() == w[1].x()) {
            return Err(CurveError::DuplicateX { x: pair[0].x() });
        }

        let xs: Vec<f64> = sorted.iter().map(|p| f64::from(p.x())).collect();
        let ys: Vec<f64> = sorted.iter().map(|p| f64::from(p.y())).collect();
        let tangents = if xs.len() >= 3 {
            fritsch_carlson_tangents(&xs, &ys)
        } else {
            Vec::new()
        };

        Ok(Self { xs, ys, tangents })
    }

    /// Number of control points.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Evaluate the curve at `x`, clamped to `[0, 1]`. A NaN query yields the
    /// first control point's output.
    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.xs.len();
        let last = n - 1;

        // Flat extrapolation; also covers the single-point case.
        if x.is_nan() || x <= self.xs[0] {
            return self.ys[0];
        }
        if x >= self.xs[last] {
            return self.ys[last];
        }

        // Binary search for the segment containing x
        let mut lo = 0;
        let mut hi = last;
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if self.xs[mid] <= x {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        let (x0, x1) = (self.xs[lo], self.xs[hi]);
        let (y0, y1) = (self.ys[lo], self.ys[hi]);
        let h = x1 - x0;
        let t = (x - x0) / h;

        let y = if self.tangents.is_empty() {
            y0 + (y1 - y0) * t
        } else {
            hermite(y0, y1, self.tangents[lo], self.tangents[hi], h, t)
        };
        y.clamp(0.0, 1.0)
    }
}

/// Monotonicity-preserving tangents for strictly ascending `xs`.
fn fritsch_carlson_tangents(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let secants: Vec<f64> = (0..n - 1)
        .map(|k| (ys[k + 1] - ys[k]) / (xs[k + 1] - xs[k]))
        .collect();

    let mut m = vec![0.0_f64; n];
    m[0] = secants[0];
    m[n - 1] = secants[n - 2];
    for k in 1..n - 1 {
        // Zero slope at local extrema and plateaus
        if secants[k - 1] * secants[k] > 0.0 {
            m[k] = (secants[k - 1] + secants[k]) * 0.5;
        }
    }

    for k in 0..n - 1 {
        let d = secants[k];
        if d == 0.0 {
            m[k] = 0.0;
            m[k + 1] = 0.0;
            continue;
        }
        // Non-negative: tangents are either zero or share the secant's sign.
        let alpha = m[k] / d;
        let beta = m[k + 1] / d;
        let s = alpha * alpha + beta * beta;
        if s > 9.0 {
            let tau = 3.0 / s.sqrt();
            m[k] = tau * alpha * d;
            m[k + 1] = tau * beta * d;
        }
    }
    m
}

/// Cubic Hermite segment written relative to `y0` so flat segments stay
/// exactly flat.
fn hermite(y0: f64, y1: f64, m0: f64, m1: f64, h: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;
    y0 + (y1 - y0) * h01 + h * (m0 * h10 + m1 * h11)
}
