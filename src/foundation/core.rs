use crate::foundation::error::{AvgColorError, AvgColorResult};

pub use kurbo::Vec2;

/// Two key times closer than this are the same key.
pub const TIME_EPSILON: f64 = 1e-9;

/// Composition size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Width as `f64`, for layout math.
    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`, for layout math.
    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }
}

/// Rational frame rate `num / den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator. Must be > 0.
    pub den: u32,
}

impl Fps {
    /// Create a frame rate; both parts must be non-zero.
    pub fn new(num: u32, den: u32) -> AvgColorResult<Self> {
        if den == 0 {
            return Err(AvgColorError::configuration("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(AvgColorError::configuration("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as `f64`.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Whole frames covered by `secs`, rounded down.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 50, den: 1 }
    }
}

/// One byte lane of an RGBA pixel.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Channel {
    /// Byte 0.
    Red,
    /// Byte 1.
    Green,
    /// Byte 2.
    Blue,
    /// Byte 3.
    Alpha,
}

impl Channel {
    /// Every channel in memory order.
    pub const ALL: [Channel; 4] = [Self::Red, Self::Green, Self::Blue, Self::Alpha];

    /// Byte offset within an RGBA8 pixel.
    pub fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
            Self::Alpha => 3,
        }
    }

    /// Display name, also used in node names.
    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Alpha => "Alpha",
        }
    }
}

/// Straight (non-premultiplied) RGBA8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red byte.
    pub r: u8,
    /// Green byte.
    pub g: u8,
    /// Blue byte.
    pub b: u8,
    /// Alpha byte.
    pub a: u8,
}

impl Rgba8 {
    /// Fully opaque pixel from RGB bytes.
    pub fn opaque([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// The byte stored in `channel`.
    pub fn channel(self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
            Channel::Alpha => self.a,
        }
    }

    /// Pack as a little-endian RGBA8 word: red in the low byte, alpha in the high byte.
    pub fn to_u32(self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, self.a])
    }
}

/// Normalized RGB used for fills and strokes, each component in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgb01 {
    /// Red in `[0, 1]`.
    pub r: f64,
    /// Green in `[0, 1]`.
    pub g: f64,
    /// Blue in `[0, 1]`.
    pub b: f64,
}

impl Rgb01 {
    /// `(0, 0, 0)`.
    pub const BLACK: Self = Self::gray(0.0);
    /// `(1, 1, 1)`.
    pub const WHITE: Self = Self::gray(1.0);

    /// Color from components.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Gray with every component set to `v`.
    pub const fn gray(v: f64) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Multiply every component by `k`.
    pub fn scale(self, k: f64) -> Self {
        Self {
            r: self.r * k,
            g: self.g * k,
            b: self.b * k,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
