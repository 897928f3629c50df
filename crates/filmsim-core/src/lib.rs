//! Filmsim Core — domain layer for film simulation profiles.
//!
//! This crate contains the profile model, tone-curve LUT baking, catalog
//! loading and validation, and the shared profile repository. No rendering,
//! GPU, or UI dependencies.

pub mod config;
pub mod curve;
pub mod error;
pub mod loader;
pub mod model;
pub mod repository;

// Re-exports for convenience.
pub use config::CatalogConfig;
pub use curve::{ChannelLuts, MonotoneCurve, bake, bake_curves, bake_for_quality};
pub use error::{CurveError, LoadError, ModelError, RepositoryError, ValidationReport, Violation};
pub use loader::{CatalogLoader, FileSource, MemorySource, ProfileLoader, ProfileSource};
pub use model::{
    ColorCurves, ColorRGB, CurveChannel, CurvePoint, FilmParams, FilmProfile, ProcessingParams,
    ProcessingQuality,
};
pub use repository::{LoadStatus, ProfileRepository, ProfileSnapshot};
