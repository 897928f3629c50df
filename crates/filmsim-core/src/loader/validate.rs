//! Semantic validation beyond what model construction enforces.

use crate::error::Violation;
use crate::model::{CurveChannel, CurvePoint, FilmProfile};

/// Every violation of `profile`: numeric parameter ranges plus curve rules
/// (non-empty, points in `[0, 1]²`, strictly ascending `x`).
///
/// Returns an empty list for a valid profile. Never stops at the first
/// failure.
pub fn validate_profile(profile: &FilmProfile) -> Vec<Violation> {
    let mut violations = profile.params().violations();
    for channel in CurveChannel::ALL {
        violations.extend(curve_violations(
            channel,
            profile.color_curves().channel(channel),
        ));
    }
    violations
}

/// Curve rules for a single channel. A strictly ascending curve is what
/// makes LUT baking well defined.
pub fn curve_violations(channel: CurveChannel, points: &[CurvePoint]) -> Vec<Violation> {
    coordinate_violations(channel, points.iter().map(|p| (p.x(), p.y())))
}

/// Curve rules over raw `(x, y)` pairs that may not form valid
/// [`CurvePoint`]s. Ordering is checked across every pair, out-of-range
/// ones included.
pub fn coordinate_violations(
    channel: CurveChannel,
    coords: impl IntoIterator<Item = (f32, f32)>,
) -> Vec<Violation> {
    let coords: Vec<(f32, f32)> = coords.into_iter().collect();
    let mut violations = Vec::new();
    if coords.is_empty() {
        violations.push(Violation::EmptyChannel(channel));
    }
    for &(x, y) in &coords {
        if !(0.0..=1.0).contains(&x) || !(0.0..=1.0).contains(&y) {
            violations.push(Violation::PointOutOfRange { channel, x, y });
        }
    }
    for (i, pair) in coords.windows(2).enumerate() {
        if pair[0].0 >= pair[1].0 {
            violations.push(Violation::PointsNotAscending {
                channel,
                index: i + 1,
            });
        }
    }
    violations
}
