//! The film profile aggregate and its effect parameters.

use serde::Serialize;

use crate::error::Violation;
use crate::model::{ColorCurves, ColorRGB};

/// Derive the stable profile id from a display name: spaces become
/// underscores and the result is lowercased.
///
/// Consumers key by this id, so the mapping must never change.
pub fn profile_id(name: &str) -> String {
    name.replace(' ', "_").to_lowercase()
}

/// Numeric effect parameters of a film profile.
///
/// Values are stored as given; [`FilmParams::violations`] reports which of
/// them fall outside their allowed range. Only lower bounds exist for the
/// strength-like parameters, the renderer clamps them downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilmParams {
    /// Contrast multiplier. 1.0 = unchanged. Must be > 0.
    pub contrast: f32,
    /// Saturation multiplier. 0.0 = grayscale. Must be >= 0.
    pub saturation: f32,
    pub chromatic_aberration: f32,
    /// Blur radius.
    pub blur: f32,
    pub base_color: ColorRGB,
    /// Grain intensity in `[0, 1]`.
    pub grain_amount: f32,
    /// Grain particle size. Must be > 0.
    pub grain_size: i32,
    pub halation_strength: f32,
    /// Brightness threshold above which halation applies, in `[0, 1]`.
    pub halation_threshold: f32,
    pub vignette_strength: f32,
    pub shadow_tint: ColorRGB,
    pub highlight_rolloff: f32,
    /// Inter-channel bleeding strength.
    pub color_bleed: f32,
}

impl Default for FilmParams {
    /// Neutral tone with every optical effect disabled.
    fn default() -> Self {
        Self {
            contrast: 1.0,
            saturation: 1.0,
            chromatic_aberration: 0.0,
            blur: 0.0,
            base_color: ColorRGB::WHITE,
            grain_amount: 0.0,
            grain_size: 1,
            halation_strength: 0.0,
            halation_threshold: 0.7,
            vignette_strength: 0.0,
            shadow_tint: ColorRGB::BLACK,
            highlight_rolloff: 0.0,
            color_bleed: 0.0,
        }
    }
}

impl FilmParams {
    /// Every range rule these parameters break, in field order.
    pub fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        if !positive(self.contrast) {
            out.push(Violation::NonPositiveContrast(self.contrast));
        }
        if !non_negative(self.saturation) {
            out.push(Violation::NegativeSaturation(self.saturation));
        }
        if !non_negative(self.chromatic_aberration) {
            out.push(Violation::NegativeChromaticAberration(
                self.chromatic_aberration,
            ));
        }
        if !non_negative(self.blur) {
            out.push(Violation::NegativeBlur(self.blur));
        }
        if !unit(self.grain_amount) {
            out.push(Violation::GrainAmountOutOfRange(self.grain_amount));
        }
        if self.grain_size <= 0 {
            out.push(Violation::NonPositiveGrainSize(self.grain_size));
        }
        if !non_negative(self.halation_strength) {
            out.push(Violation::NegativeHalationStrength(self.halation_strength));
        }
        if !unit(self.halation_threshold) {
            out.push(Violation::HalationThresholdOutOfRange(
                self.halation_threshold,
            ));
        }
        if !non_negative(self.vignette_strength) {
            out.push(Violation::NegativeVignetteStrength(self.vignette_strength));
        }
        if !non_negative(self.highlight_rolloff) {
            out.push(Violation::NegativeHighlightRolloff(self.highlight_rolloff));
        }
        if !non_negative(self.color_bleed) {
            out.push(Violation::NegativeColorBleed(self.color_bleed));
        }
        out
    }

    /// True when [`violations`](Self::violations) is empty.
    pub fn is_valid(&self) -> bool {
        self.violations().is_empty()
    }
}

// NaN fails every check below.
fn positive(v: f32) -> bool {
    v > 0.0
}

fn non_negative(v: f32) -> bool {
    v >= 0.0
}

fn unit(v: f32) -> bool {
    (0.0..=1.0).contains(&v)
}

/// A named film simulation: tone curves plus optical effect parameters.
///
/// Profiles are immutable. [`FilmProfile::toggle_favorite`] returns a new
/// value; the repository swaps it into a fresh collection snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilmProfile {
    id: String,
    name: String,
    color_curves: ColorCurves,
    params: FilmParams,
    is_favorite: bool,
    is_custom: bool,
}

impl FilmProfile {
    /// Build a built-in profile. The id is derived from `name`.
    pub fn new(name: impl Into<String>, color_curves: ColorCurves, params: FilmParams) -> Self {
        let name = name.into();
        Self {
            id: profile_id(&name),
            name,
            color_curves,
            params,
            is_favorite: false,
            is_custom: false,
        }
    }

    /// Build a user-defined profile.
    pub fn custom(name: impl Into<String>, color_curves: ColorCurves, params: FilmParams) -> Self {
        Self {
            is_custom: true,
            ..Self::new(name, color_curves, params)
        }
    }

    /// Stable identifier derived from the display name.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name as it appears in the catalog.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color_curves(&self) -> &ColorCurves {
        &self.color_curves
    }

    pub fn params(&self) -> &FilmParams {
        &self.params
    }

    /// Whether the user marked this profile as a favorite.
    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    /// Whether this is a user-defined profile.
    pub fn is_custom(&self) -> bool {
        self.is_custom
    }

    /// Range check over the numeric parameters. Curve shape is not inspected.
    pub fn is_valid(&self) -> bool {
        self.params.is_valid()
    }

    /// Copy of this profile with the favorite flag negated.
    #[must_use]
    pub fn toggle_favorite(&self) -> Self {
        Self {
            is_favorite: !self.is_favorite,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_id_derivation() {
        assert_eq!(profile_id("Kodak Portra 400"), "kodak_portra_400");
        assert_eq!(profile_id("Ilford HP5 Plus"), "ilford_hp5_plus");
        assert_eq!(profile_id("velvia"), "velvia");
    }

    #[test]
    fn test_new_profile_flags() {
        let p = FilmProfile::new("Fuji Superia", ColorCurves::identity(), FilmParams::default());
        assert_eq!(p.id(), "fuji_superia");
        assert!(!p.is_favorite());
        assert!(!p.is_custom());

        let c = FilmProfile::custom("My Look", ColorCurves::identity(), FilmParams::default());
        assert!(c.is_custom());
        assert_eq!(c.id(), "my_look");
    }

    #[test]
    fn test_default_params_are_valid() {
        assert!(FilmParams::default().is_valid());
    }

    #[test]
    fn test_violations_enumerates_every_rule() {
        let params = FilmParams {
            contrast: 0.0,
            saturation: -0.1,
            grain_amount: 1.5,
            grain_size: 0,
            halation_threshold: f32::NAN,
            color_bleed: -2.0,
            ..FilmParams::default()
        };
        let v = params.violations();
        assert_eq!(v.len(), 6);
        assert_eq!(v[0], Violation::NonPositiveContrast(0.0));
        assert_eq!(v[3], Violation::NonPositiveGrainSize(0));
        assert!(matches!(v[4], Violation::HalationThresholdOutOfRange(t) if t.is_nan()));
        assert!(!params.is_valid());
    }

    #[test]
    fn test_toggle_favorite_changes_only_flag() {
        let p = FilmProfile::new("Kodak Gold 200", ColorCurves::identity(), FilmParams::default());
        let toggled = p.toggle_favorite();
        assert!(toggled.is_favorite());
        assert_eq!(toggled.id(), p.id());
        assert_eq!(toggled.params(), p.params());
        assert_eq!(toggled.toggle_favorite(), p);
    }
}
