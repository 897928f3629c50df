//! Profile catalog loading and validation.
//!
//! A catalog is a JSON object mapping display names to profile records.
//! Loading is all-or-nothing: one invalid profile fails the whole catalog
//! and the report names every offending profile.

pub mod record;
pub mod source;
pub mod validate;

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::{LoadError, ValidationReport, Violation};
use crate::model::FilmProfile;

pub use record::{ProfileRecord, RecordError};
pub use source::{FileSource, MemorySource, ProfileSource};
pub use validate::{coordinate_violations, curve_violations, validate_profile};

/// Anything that can produce a validated catalog. The repository loads
/// through this seam.
pub trait CatalogLoader: Send + Sync {
    fn load_catalog(&self) -> Result<Vec<FilmProfile>, LoadError>;
}

/// Reads a catalog from a [`ProfileSource`] and validates it.
#[derive(Debug, Clone)]
pub struct ProfileLoader<S> {
    source: S,
}

impl<S: ProfileSource> ProfileLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The underlying byte source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Read, parse, and validate the full catalog.
    pub fn load(&self) -> Result<Vec<FilmProfile>, LoadError> {
        let origin = self.source.describe();
        tracing::info!("Loading film profiles from {}", origin);

        let bytes = self
            .source
            .read()
            .map_err(|source| LoadError::SourceUnavailable {
                origin: origin.clone(),
                source,
            })?;

        let profiles = parse_catalog(&bytes)?;
        tracing::info!("Loaded {} film profiles from {}", profiles.len(), origin);
        Ok(profiles)
    }

    /// Load the catalog and return the profile with display name `name`.
    pub fn load_profile(&self, name: &str) -> Result<FilmProfile, LoadError> {
        self.load()?
            .into_iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| LoadError::UnknownProfile {
                name: name.to_string(),
            })
    }
}

impl<S: ProfileSource> CatalogLoader for ProfileLoader<S> {
    fn load_catalog(&self) -> Result<Vec<FilmProfile>, LoadError> {
        self.load()
    }
}

/// Parse and validate catalog bytes. Profiles keep document key order.
pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<FilmProfile>, LoadError> {
    let entries: Map<String, Value> =
        serde_json::from_slice(bytes).map_err(|err| LoadError::Malformed {
            profile: None,
            reason: err.to_string(),
        })?;

    let mut report = ValidationReport::default();
    let mut profiles = Vec::with_capacity(entries.len());

    for (name, value) in entries {
        let record: ProfileRecord =
            serde_json::from_value(value).map_err(|err| LoadError::Malformed {
                profile: Some(name.clone()),
                reason: err.to_string(),
            })?;

        match record.to_profile(&name) {
            Ok(profile) => profiles.push(profile),
            Err(RecordError::Malformed(reason)) => {
                return Err(LoadError::Malformed {
                    profile: Some(name),
                    reason,
                });
            }
            Err(RecordError::Invalid(violations)) => report.push(name, violations),
        }
    }

    let mut seen: HashMap<&str, &str> = HashMap::with_capacity(profiles.len());
    for profile in &profiles {
        report.push(profile.name(), validate_profile(profile));
        if let Some(first) = seen.insert(profile.id(), profile.name()) {
            tracing::debug!("Profile {:?} derives the same id as {:?}", profile.name(), first);
            report.push(
                profile.name(),
                vec![Violation::DuplicateId(profile.id().to_string())],
            );
        }
    }

    if !report.is_empty() {
        for entry in &report.profiles {
            tracing::warn!(
                "Invalid film profile {:?}: {} violation(s)",
                entry.profile,
                entry.violations.len()
            );
        }
        return Err(LoadError::Validation(report));
    }

    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CurveChannel;
    use std::io;

    const CATALOG: &str = r#"{
        "Kodak Portra 400": {
            "color_curves": {
                "R": {"x": [0.0, 0.5, 1.0], "y": [0.02, 0.52, 0.97]},
                "G": {"x": [0.0, 1.0], "y": [0.0, 1.0]},
                "B": {"x": [0.0, 1.0], "y": [0.03, 0.95]}
            },
            "contrast": 1.05,
            "saturation": 0.95,
            "base_color": [255, 250, 240],
            "grain_amount": 0.15,
            "grain_size": 2
        },
        "Fuji Velvia 50": {
            "color_curves": {
                "R": {"x": [0.0, 1.0], "y": [0.0, 1.0]},
                "G": {"x": [0.0, 1.0], "y": [0.0, 1.0]},
                "B": {"x": [0.0, 1.0], "y": [0.0, 1.0]}
            },
            "contrast": 1.3,
            "saturation": 1.4,
            "base_color": [255, 255, 255]
        }
    }"#;

    struct FailingSource;

    impl ProfileSource for FailingSource {
        fn read(&self) -> io::Result<Vec<u8>> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }

        fn describe(&self) -> String {
            "failing".into()
        }
    }

    #[test]
    fn test_parse_preserves_document_order() {
        let profiles = parse_catalog(CATALOG.as_bytes()).unwrap();
        let names: Vec<&str> = profiles.iter().map(FilmProfile::name).collect();
        assert_eq!(names, vec!["Kodak Portra 400", "Fuji Velvia 50"]);
        assert_eq!(profiles[1].id(), "fuji_velvia_50");
    }

    #[test]
    fn test_source_failure_is_source_unavailable() {
        let err = ProfileLoader::new(FailingSource).load().unwrap_err();
        assert!(matches!(err, LoadError::SourceUnavailable { origin, .. } if origin == "failing"));
    }

    #[test]
    fn test_non_object_is_malformed() {
        let err = parse_catalog(b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, LoadError::Malformed { profile: None, .. }));
    }

    #[test]
    fn test_missing_required_field_is_malformed() {
        let err = parse_catalog(br#"{"Lomo": {"contrast": 1.0}}"#).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Malformed { profile: Some(name), .. } if name == "Lomo"
        ));
    }

    #[test]
    fn test_duplicate_ids_fail_validation() {
        let doc = CATALOG.replace("\"Fuji Velvia 50\"", "\"kodak portra 400\"");
        let Err(LoadError::Validation(report)) = parse_catalog(doc.as_bytes()) else {
            panic!("expected validation failure");
        };
        assert_eq!(report.offending_profiles(), vec!["kodak portra 400"]);
    }

    #[test]
    fn test_bad_point_does_not_hide_other_violations() {
        let doc = r#"{
            "Expired Agfa": {
                "color_curves": {
                    "R": {"x": [0.0, 1.0], "y": [0.0, 1.5]},
                    "G": {"x": [0.0, 1.0], "y": [0.0, 1.0]},
                    "B": {"x": [1.0, 0.0], "y": [0.0, 1.0]}
                },
                "contrast": 0.0,
                "saturation": -1.0,
                "base_color": [255, 255, 255]
            }
        }"#;
        let Err(LoadError::Validation(report)) = parse_catalog(doc.as_bytes()) else {
            panic!("expected validation failure");
        };
        assert_eq!(
            report.violations_for("Expired Agfa"),
            Some(
                &[
                    Violation::NonPositiveContrast(0.0),
                    Violation::NegativeSaturation(-1.0),
                    Violation::PointOutOfRange {
                        channel: CurveChannel::Red,
                        x: 1.0,
                        y: 1.5
                    },
                    Violation::PointsNotAscending {
                        channel: CurveChannel::Blue,
                        index: 1
                    },
                ][..]
            )
        );
    }

    #[test]
    fn test_load_profile_by_name() {
        let loader = ProfileLoader::new(MemorySource::new("test", CATALOG));
        let profile = loader.load_profile("Fuji Velvia 50").unwrap();
        assert_eq!(profile.params().saturation, 1.4);

        let err = loader.load_profile("Agfa Vista").unwrap_err();
        assert!(matches!(err, LoadError::UnknownProfile { name } if name == "Agfa Vista"));
    }
}
