//! Per-render processing parameters and quality tiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Fixed quality presets trading latency for fidelity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingQuality {
    /// Quarter resolution, smallest LUT. Interactive scrubbing.
    Preview,
    /// Half resolution.
    Medium,
    /// Three-quarter resolution. Final preview before export.
    High,
    /// Full resolution for export.
    Ultra,
}

impl ProcessingQuality {
    /// Every tier, lowest fidelity first.
    pub const fn all() -> [Self; 4] {
        [Self::Preview, Self::Medium, Self::High, Self::Ultra]
    }

    /// Resolution scale applied to the source image.
    pub const fn scale_factor(self) -> f32 {
        match self {
            Self::Preview => 0.25,
            Self::Medium => 0.5,
            Self::High => 0.75,
            Self::Ultra => 1.0,
        }
    }

    /// Number of samples per channel when baking curve LUTs.
    pub const fn lut_size(self) -> usize {
        match self {
            Self::Preview => 32,
            Self::Medium => 48,
            Self::High | Self::Ultra => 64,
        }
    }

    /// Human-readable tier name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Preview => "preview",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Ultra => "ultra",
        }
    }
}

impl fmt::Display for ProcessingQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unrecognized quality tier name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown processing quality {0:?} (expected preview, medium, high, or ultra)")]
pub struct ParseQualityError(pub String);

impl FromStr for ProcessingQuality {
    type Err = ParseQualityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|q| q.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseQualityError(s.to_string()))
    }
}

/// Parameters chosen at apply time, independent of the film profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProcessingParams {
    color_temp: u32,
    cross_process: bool,
    quality: ProcessingQuality,
}

impl ProcessingParams {
    pub const MIN_COLOR_TEMP: u32 = 2000;
    pub const MAX_COLOR_TEMP: u32 = 10000;
    pub const NEUTRAL_COLOR_TEMP: u32 = 6500;

    /// Neutral white balance, no cross-processing, high quality.
    pub const DEFAULT: Self = Self {
        color_temp: Self::NEUTRAL_COLOR_TEMP,
        cross_process: false,
        quality: ProcessingQuality::High,
    };

    /// Fails if `color_temp` (Kelvin) is outside `[2000, 10000]`.
    pub fn new(
        color_temp: u32,
        cross_process: bool,
        quality: ProcessingQuality,
    ) -> Result<Self, ModelError> {
        if !(Self::MIN_COLOR_TEMP..=Self::MAX_COLOR_TEMP).contains(&color_temp) {
            return Err(ModelError::ColorTempOutOfRange { kelvin: color_temp });
        }
        Ok(Self {
            color_temp,
            cross_process,
            quality,
        })
    }

    /// Fast settings for interactive previews.
    pub const fn preview() -> Self {
        Self {
            quality: ProcessingQuality::Preview,
            ..Self::DEFAULT
        }
    }

    /// Full-quality settings for final export.
    pub const fn export() -> Self {
        Self {
            quality: ProcessingQuality::Ultra,
            ..Self::DEFAULT
        }
    }

    /// White balance in kelvin.
    pub const fn color_temp(&self) -> u32 {
        self.color_temp
    }

    pub const fn cross_process(&self) -> bool {
        self.cross_process
    }

    /// Selected quality tier.
    pub const fn quality(&self) -> ProcessingQuality {
        self.quality
    }

    /// LUT resolution selected by this quality tier.
    pub const fn lut_size(&self) -> usize {
        self.quality.lut_size()
    }
}

impl Default for ProcessingParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}
