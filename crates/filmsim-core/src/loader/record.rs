//! Wire records of the profile source format and their conversion to the
//! domain model.
//!
//! Unknown fields are ignored. Absent optional fields take the defaults
//! below.

use serde::Deserialize;

use crate::error::Violation;
use crate::loader::validate::coordinate_violations;
use crate::model::{ColorCurves, ColorRGB, CurveChannel, CurvePoint, FilmParams, FilmProfile};

/// One profile entry, keyed by its display name in the catalog map.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRecord {
    pub color_curves: CurvesRecord,
    pub contrast: f32,
    pub saturation: f32,
    #[serde(default)]
    pub chromatic_aberration: f32,
    #[serde(default)]
    pub blur: f32,
    pub base_color: Vec<i64>,
    #[serde(default)]
    pub grain_amount: f32,
    #[serde(default = "default_grain_size")]
    pub grain_size: i32,
    #[serde(default)]
    pub halation_strength: f32,
    #[serde(default = "default_halation_threshold")]
    pub halation_threshold: f32,
    #[serde(default)]
    pub vignette_strength: f32,
    #[serde(default = "default_shadow_tint")]
    pub shadow_tint: Vec<i64>,
    #[serde(default)]
    pub highlight_rolloff: f32,
    #[serde(default)]
    pub color_bleed: f32,
}

fn default_grain_size() -> i32 {
    1
}

fn default_halation_threshold() -> f32 {
    0.7
}

fn default_shadow_tint() -> Vec<i64> {
    vec![0, 0, 0]
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurvesRecord {
    #[serde(rename = "R")]
    pub red: CurveRecord,
    #[serde(rename = "G")]
    pub green: CurveRecord,
    #[serde(rename = "B")]
    pub blue: CurveRecord,
}

impl CurvesRecord {
    fn channel(&self, channel: CurveChannel) -> &CurveRecord {
        match channel {
            CurveChannel::Red => &self.red,
            CurveChannel::Green => &self.green,
            CurveChannel::Blue => &self.blue,
        }
    }
}

/// Parallel coordinate arrays for one channel.
#[derive(Debug, Clone, Deserialize)]
pub struct CurveRecord {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
}

/// Why a record could not become a [`FilmProfile`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordError {
    /// Structural mismatch in the record itself.
    Malformed(String),
    /// Values that the model types refuse to construct from.
    Invalid(Vec<Violation>),
}

impl ProfileRecord {
    /// Convert into a domain profile named `name`.
    ///
    /// Shape problems abort immediately. If any point, channel, or color
    /// fails to construct, the error carries every violation of the record:
    /// numeric parameters, curve rules, and color components together.
    pub fn to_profile(&self, name: &str) -> Result<FilmProfile, RecordError> {
        self.check_shape()?;

        let built = (self.curves(), color(&self.base_color), color(&self.shadow_tint));
        let (Some(curves), Some(base_color), Some(shadow_tint)) = built else {
            return Err(RecordError::Invalid(self.violations()));
        };

        Ok(FilmProfile::new(name, curves, self.params(base_color, shadow_tint)))
    }

    /// Every violation of the raw record, in the order `validate_profile`
    /// reports them, followed by color component violations.
    pub fn violations(&self) -> Vec<Violation> {
        // Colors are checked below; the numeric rules never look at them.
        let mut violations = self.params(ColorRGB::WHITE, ColorRGB::BLACK).violations();
        for channel in CurveChannel::ALL {
            let record = self.color_curves.channel(channel);
            violations.extend(coordinate_violations(
                channel,
                record.x.iter().copied().zip(record.y.iter().copied()),
            ));
        }
        for (field, values) in self.colors() {
            violations.extend(
                values
                    .iter()
                    .filter(|v| !(0..=255).contains(*v))
                    .map(|&value| Violation::ColorOutOfRange { field, value }),
            );
        }
        violations
    }

    fn curves(&self) -> Option<ColorCurves> {
        let points = |channel: CurveChannel| {
            let record = self.color_curves.channel(channel);
            record
                .x
                .iter()
                .zip(&record.y)
                .map(|(&x, &y)| CurvePoint::new(x, y))
                .collect::<Result<Vec<_>, _>>()
                .ok()
        };
        ColorCurves::new(
            points(CurveChannel::Red)?,
            points(CurveChannel::Green)?,
            points(CurveChannel::Blue)?,
        )
        .ok()
    }

    fn params(&self, base_color: ColorRGB, shadow_tint: ColorRGB) -> FilmParams {
        FilmParams {
            contrast: self.contrast,
            saturation: self.saturation,
            chromatic_aberration: self.chromatic_aberration,
            blur: self.blur,
            base_color,
            grain_amount: self.grain_amount,
            grain_size: self.grain_size,
            halation_strength: self.halation_strength,
            halation_threshold: self.halation_threshold,
            vignette_strength: self.vignette_strength,
            shadow_tint,
            highlight_rolloff: self.highlight_rolloff,
            color_bleed: self.color_bleed,
        }
    }

    fn colors(&self) -> [(&'static str, &[i64]); 2] {
        [
            ("base_color", self.base_color.as_slice()),
            ("shadow_tint", self.shadow_tint.as_slice()),
        ]
    }

    fn check_shape(&self) -> Result<(), RecordError> {
        for channel in CurveChannel::ALL {
            let record = self.color_curves.channel(channel);
            if record.x.len() != record.y.len() {
                return Err(RecordError::Malformed(format!(
                    "curve {} has {} x values but {} y values",
                    channel.source_key(),
                    record.x.len(),
                    record.y.len()
                )));
            }
        }
        for (field, values) in self.colors() {
            if values.len() != 3 {
                return Err(RecordError::Malformed(format!(
                    "{field} must have exactly 3 components, got {}",
                    values.len()
                )));
            }
        }
        Ok(())
    }
}

/// Build a color from a shape-checked triple.
fn color(values: &[i64]) -> Option<ColorRGB> {
    match values {
        &[r, g, b] => ColorRGB::new(r, g, b).ok(),
        _ => None,
    }
}
