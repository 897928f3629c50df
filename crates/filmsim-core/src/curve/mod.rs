//! Tone curve evaluation and LUT baking.
//!
//! Pure functions over owned input; safe to call from any thread.

pub mod lut;
pub mod spline;

pub use lut::{ChannelLuts, bake, bake_curves, bake_for_quality};
pub use spline::MonotoneCurve;
