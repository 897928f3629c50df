//! Error types for model construction, curve baking, catalog loading, and
//! repository access.

use std::fmt;
use std::sync::Arc;

use crate::model::CurveChannel;

/// A value type was constructed with out-of-range input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("curve point ({x}, {y}) is outside [0, 1] x [0, 1]")]
    CurvePointOutOfRange { x: f32, y: f32 },
    #[error("color component {value} is outside [0, 255]")]
    ColorComponentOutOfRange { value: i64 },
    #[error("{channel} curve must have at least one point")]
    EmptyCurve { channel: CurveChannel },
    #[error("color temperature {kelvin}K is outside [2000, 10000]")]
    ColorTempOutOfRange { kelvin: u32 },
}

/// Failure to bake control points into a LUT.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveError {
    #[error("curve has no control points")]
    Empty,
    #[error("LUT resolution must be at least 1, got {0}")]
    InvalidResolution(usize),
    #[error("two control points share x = {x}")]
    DuplicateX { x: f32 },
}

/// Failure to produce a validated catalog from a profile source.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("profile source {origin} is unavailable: {source}")]
    SourceUnavailable {
        origin: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed profile data{}: {reason}", profile_suffix(.profile))]
    Malformed {
        profile: Option<String>,
        reason: String,
    },
    #[error(transparent)]
    Validation(#[from] ValidationReport),
    #[error("no profile named {name:?} in catalog")]
    UnknownProfile { name: String },
}

fn profile_suffix(profile: &Option<String>) -> String {
    match profile {
        Some(name) => format!(" in {name:?}"),
        None => String::new(),
    }
}

/// Failure of a repository operation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepositoryError {
    /// The catalog could not be loaded. Shared by every caller that observed
    /// the same load attempt.
    #[error("profile catalog failed to load: {0}")]
    Load(Arc<LoadError>),
    #[error("no profile with id {id:?}")]
    NotFound { id: String },
}

/// A single semantic rule broken by a profile.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    NonPositiveContrast(f32),
    NegativeSaturation(f32),
    NegativeChromaticAberration(f32),
    NegativeBlur(f32),
    GrainAmountOutOfRange(f32),
    NonPositiveGrainSize(i32),
    NegativeHalationStrength(f32),
    HalationThresholdOutOfRange(f32),
    NegativeVignetteStrength(f32),
    NegativeHighlightRolloff(f32),
    NegativeColorBleed(f32),
    EmptyChannel(CurveChannel),
    PointOutOfRange { channel: CurveChannel, x: f32, y: f32 },
    PointsNotAscending { channel: CurveChannel, index: usize },
    ColorOutOfRange { field: &'static str, value: i64 },
    DuplicateId(String),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveContrast(v) => write!(f, "contrast must be > 0 (got {v})"),
            Self::NegativeSaturation(v) => write!(f, "saturation must be >= 0 (got {v})"),
            Self::NegativeChromaticAberration(v) => {
                write!(f, "chromatic aberration must be >= 0 (got {v})")
            }
            Self::NegativeBlur(v) => write!(f, "blur must be >= 0 (got {v})"),
            Self::GrainAmountOutOfRange(v) => {
                write!(f, "grain amount must be in [0.0, 1.0] (got {v})")
            }
            Self::NonPositiveGrainSize(v) => write!(f, "grain size must be > 0 (got {v})"),
            Self::NegativeHalationStrength(v) => {
                write!(f, "halation strength must be >= 0 (got {v})")
            }
            Self::HalationThresholdOutOfRange(v) => {
                write!(f, "halation threshold must be in [0.0, 1.0] (got {v})")
            }
            Self::NegativeVignetteStrength(v) => {
                write!(f, "vignette strength must be >= 0 (got {v})")
            }
            Self::NegativeHighlightRolloff(v) => {
                write!(f, "highlight rolloff must be >= 0 (got {v})")
            }
            Self::NegativeColorBleed(v) => write!(f, "color bleed must be >= 0 (got {v})"),
            Self::EmptyChannel(channel) => {
                write!(f, "{channel} curve must have at least one point")
            }
            Self::PointOutOfRange { channel, x, y } => {
                write!(f, "{channel} curve point ({x}, {y}) must be in [0.0, 1.0]")
            }
            Self::PointsNotAscending { channel, index } => write!(
                f,
                "{channel} curve points must be strictly ascending in x (point {index})"
            ),
            Self::ColorOutOfRange { field, value } => {
                write!(f, "{field} component {value} must be in [0, 255]")
            }
            Self::DuplicateId(id) => write!(f, "id {id:?} is shared with another profile"),
        }
    }
}

/// Every violation found for one profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileViolations {
    pub profile: String,
    pub violations: Vec<Violation>,
}

/// Aggregated validation failures across a whole catalog.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationReport {
    pub profiles: Vec<ProfileViolations>,
}

impl ValidationReport {
    /// Record violations for `profile`. Empty lists are ignored.
    pub fn push(&mut self, profile: impl Into<String>, violations: Vec<Violation>) {
        if violations.is_empty() {
            return;
        }
        let profile = profile.into();
        match self.profiles.iter_mut().find(|p| p.profile == profile) {
            Some(existing) => existing.violations.extend(violations),
            None => self.profiles.push(ProfileViolations {
                profile,
                violations,
            }),
        }
    }

    /// True when no profile has a violation.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Names of every profile with at least one violation, in report order.
    pub fn offending_profiles(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.profile.as_str()).collect()
    }

    /// Violations recorded for `profile`, if it has any.
    pub fn violations_for(&self, profile: &str) -> Option<&[Violation]> {
        self.profiles
            .iter()
            .find(|p| p.profile == profile)
            .map(|p| p.violations.as_slice())
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid profiles: {}", self.offending_profiles().join(", "))?;
        for entry in &self.profiles {
            for violation in &entry.violations {
                write!(f, "\n  {}: {violation}", entry.profile)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}
