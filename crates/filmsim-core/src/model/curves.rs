//! Tone curve control points and per-channel curve sets.

use std::fmt;

use serde::Serialize;

use crate::error::ModelError;

/// A control point on a tone curve. Both coordinates lie in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    x: f32,
    y: f32,
}

impl CurvePoint {
    /// Fails unless both coordinates are in `[0, 1]`. NaN is rejected.
    pub fn new(x: f32, y: f32) -> Result<Self, ModelError> {
        if (0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y) {
            Ok(Self { x, y })
        } else {
            Err(ModelError::CurvePointOutOfRange { x, y })
        }
    }

    /// Input value.
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Output value.
    pub const fn y(&self) -> f32 {
        self.y
    }
}

/// One of the three color channels a curve applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CurveChannel {
    Red,
    Green,
    Blue,
}

impl CurveChannel {
    pub const ALL: [CurveChannel; 3] = [Self::Red, Self::Green, Self::Blue];

    /// Key used for this channel in the profile source format.
    pub const fn source_key(self) -> &'static str {
        match self {
            Self::Red => "R",
            Self::Green => "G",
            Self::Blue => "B",
        }
    }
}

impl fmt::Display for CurveChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => write!(f, "Red"),
            Self::Green => write!(f, "Green"),
            Self::Blue => write!(f, "Blue"),
        }
    }
}

/// Red, green, and blue tone curves. Each channel holds at least one point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorCurves {
    red: Vec<CurvePoint>,
    green: Vec<CurvePoint>,
    blue: Vec<CurvePoint>,
}

impl ColorCurves {
    /// Fails with [`ModelError::EmptyCurve`] if any channel has no points.
    pub fn new(
        red: Vec<CurvePoint>,
        green: Vec<CurvePoint>,
        blue: Vec<CurvePoint>,
    ) -> Result<Self, ModelError> {
        for (channel, points) in [
            (CurveChannel::Red, &red),
            (CurveChannel::Green, &green),
            (CurveChannel::Blue, &blue),
        ] {
            if points.is_empty() {
                return Err(ModelError::EmptyCurve { channel });
            }
        }
        Ok(Self { red, green, blue })
    }

    /// Straight `(0, 0) -> (1, 1)` curve on every channel.
    pub fn identity() -> Self {
        let line = vec![
            CurvePoint { x: 0.0, y: 0.0 },
            CurvePoint { x: 1.0, y: 1.0 },
        ];
        Self {
            red: line.clone(),
            green: line.clone(),
            blue: line,
        }
    }

    /// Red channel control points.
    pub fn red(&self) -> &[CurvePoint] {
        &self.red
    }

    /// Green channel control points.
    pub fn green(&self) -> &[CurvePoint] {
        &self.green
    }

    /// Blue channel control points.
    pub fn blue(&self) -> &[CurvePoint] {
        &self.blue
    }

    /// Control points of `channel`.
    pub fn channel(&self, channel: CurveChannel) -> &[CurvePoint] {
        match channel {
            CurveChannel::Red => &self.red,
            CurveChannel::Green => &self.green,
            CurveChannel::Blue => &self.blue,
        }
    }

    /// True when every point of every channel has `x == y`.
    pub fn is_identity(&self) -> bool {
        CurveChannel::ALL
            .iter()
            .all(|&c| self.channel(c).iter().all(|p| p.x == p.y))
    }
}
