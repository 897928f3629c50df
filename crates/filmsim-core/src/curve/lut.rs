//! Dense 1D LUT baking from tone-curve control points.

use serde::Serialize;

use crate::curve::spline::MonotoneCurve;
use crate::error::CurveError;
use crate::model::{ColorCurves, CurveChannel, CurvePoint, ProcessingQuality};

/// Bake control points into `resolution` evenly spaced samples.
///
/// Sample `i` is the curve evaluated at `i / (resolution - 1)`; a resolution
/// of 1 samples only `x = 0`. Points may arrive in any order; they are sorted
/// by `x` first. The result is deterministic for identical input.
///
/// # Errors
/// [`CurveError::Empty`] for no points, [`CurveError::InvalidResolution`]
/// for `resolution == 0`, [`CurveError::DuplicateX`] when two points share
/// an `x`.
pub fn bake(points: &[CurvePoint], resolution: usize) -> Result<Vec<f32>, CurveError> {
    if resolution < 1 {
        return Err(CurveError::InvalidResolution(resolution));
    }
    let curve = MonotoneCurve::new(points)?;
    Ok(sample(&curve, resolution))
}

fn sample(curve: &MonotoneCurve, resolution: usize) -> Vec<f32> {
    let denom = (resolution - 1).max(1) as f64;
    (0..resolution)
        .map(|i| curve.evaluate(i as f64 / denom) as f32)
        .collect()
}

/// Baked LUTs for all three channels of a profile's curves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelLuts {
    pub red: Vec<f32>,
    pub green: Vec<f32>,
    pub blue: Vec<f32>,
}

impl ChannelLuts {
    /// Samples per channel.
    pub fn resolution(&self) -> usize {
        self.red.len()
    }

    /// LUT for `channel`.
    pub fn channel(&self, channel: CurveChannel) -> &[f32] {
        match channel {
            CurveChannel::Red => &self.red,
            CurveChannel::Green => &self.green,
            CurveChannel::Blue => &self.blue,
        }
    }
}

/// Bake every channel of `curves` at `resolution`.
pub fn bake_curves(curves: &ColorCurves, resolution: usize) -> Result<ChannelLuts, CurveError> {
    Ok(ChannelLuts {
        red: bake(curves.red(), resolution)?,
        green: bake(curves.green(), resolution)?,
        blue: bake(curves.blue(), resolution)?,
    })
}

/// Bake every channel at the LUT size of `quality`.
pub fn bake_for_quality(
    curves: &ColorCurves,
    quality: ProcessingQuality,
) -> Result<ChannelLuts, CurveError> {
    bake_curves(curves, quality.lut_size())
}
