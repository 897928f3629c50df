//! Catalog configuration.

use std::path::PathBuf;

use crate::loader::FileSource;
use crate::model::ProcessingQuality;

/// Environment variable overriding the catalog path.
pub const PROFILES_ENV: &str = "FILMSIM_PROFILES";
/// Environment variable overriding the default quality tier.
pub const QUALITY_ENV: &str = "FILMSIM_QUALITY";
/// Catalog path used when `FILMSIM_PROFILES` is unset.
pub const DEFAULT_PROFILES_PATH: &str = "film_profiles/12-film-profiles.json";

/// Where the catalog lives and which quality tier renders use by default.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// Path of the JSON profile catalog.
    pub profiles_path: PathBuf,
    /// Quality tier selecting LUT resolution.
    pub quality: ProcessingQuality,
}

impl CatalogConfig {
    pub fn new(profiles_path: impl Into<PathBuf>) -> Self {
        Self {
            profiles_path: profiles_path.into(),
            quality: ProcessingQuality::High,
        }
    }

    /// Build from explicit environment values; `None` means unset.
    ///
    /// An unparsable quality falls back to the default with a warning.
    pub fn from_vars(profiles: Option<String>, quality: Option<String>) -> Self {
        let mut config = Self::new(profiles.unwrap_or_else(|| DEFAULT_PROFILES_PATH.to_string()));
        if let Some(raw) = quality {
            match raw.parse() {
                Ok(q) => config.quality = q,
                Err(err) => tracing::warn!("Ignoring {}: {}", QUALITY_ENV, err),
            }
        }
        config
    }

    /// Source reading the configured catalog path.
    pub fn file_source(&self) -> FileSource {
        FileSource::new(&self.profiles_path)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::from_vars(
            std::env::var(PROFILES_ENV).ok(),
            std::env::var(QUALITY_ENV).ok(),
        )
    }
}
