//! 8-bit RGB color used for base color and shadow tint.

use serde::Serialize;

use crate::error::ModelError;

/// RGB color with integer components in `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColorRGB {
    r: u8,
    g: u8,
    b: u8,
}

impl ColorRGB {
    pub const WHITE: Self = Self::from_rgb8(255, 255, 255);
    pub const BLACK: Self = Self::from_rgb8(0, 0, 0);

    /// Fails if any component is outside `[0, 255]`.
    pub fn new(r: i64, g: i64, b: i64) -> Result<Self, ModelError> {
        Ok(Self {
            r: component(r)?,
            g: component(g)?,
            b: component(b)?,
        })
    }

    /// Infallible constructor from 8-bit components.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from normalized floats. Each channel is scaled by 255,
    /// truncated, then clamped to `[0, 255]`.
    pub fn from_normalized(r: f32, g: f32, b: f32) -> Self {
        let to_u8 = |v: f32| (v * 255.0).trunc().clamp(0.0, 255.0) as u8;
        Self {
            r: to_u8(r),
            g: to_u8(g),
            b: to_u8(b),
        }
    }

    /// Components divided by 255.
    pub fn to_normalized(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }

    /// Red component.
    pub const fn r(&self) -> u8 {
        self.r
    }

    /// Green component.
    pub const fn g(&self) -> u8 {
        self.g
    }

    /// Blue component.
    pub const fn b(&self) -> u8 {
        self.b
    }
}

fn component(value: i64) -> Result<u8, ModelError> {
    u8::try_from(value).map_err(|_| ModelError::ColorComponentOutOfRange { value })
}
