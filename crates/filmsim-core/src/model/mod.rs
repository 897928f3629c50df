//! Immutable film profile value types.
//!
//! Constructors validate their input ranges and fail rather than clamp.
//! `FilmProfile::is_valid` re-checks the numeric effect parameters, which
//! construction deliberately leaves unchecked so the loader can report every
//! violation at once.

pub mod color;
pub mod curves;
pub mod processing;
pub mod profile;

pub use color::ColorRGB;
pub use curves::{ColorCurves, CurveChannel, CurvePoint};
pub use processing::{ProcessingParams, ProcessingQuality};
pub use profile::{FilmParams, FilmProfile, profile_id};
