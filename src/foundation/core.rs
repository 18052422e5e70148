use std::time::Duration;

use crate::foundation::error::{GridGifError, GridGifResult};

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> GridGifResult<Self> {
        if den == 0 {
            return Err(GridGifError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(GridGifError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Rate that shows each frame for `ms` milliseconds.
    pub fn from_frame_ms(ms: u32) -> GridGifResult<Self> {
        if ms == 0 {
            return Err(GridGifError::validation("frame duration must be > 0 ms"));
        }
        Self::new(1000, ms)
    }

    /// Re-check the invariants on a value that may have come from deserialization.
    pub fn validate(self) -> GridGifResult<()> {
        Self::new(self.num, self.den).map(|_| ())
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Duration of one frame, truncated to whole nanoseconds.
    pub fn frame_duration(self) -> Duration {
        let nanos = u64::from(self.den) * 1_000_000_000 / u64::from(self.num.max(1));
        Duration::from_nanos(nanos)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 10, den: 1 }
    }
}

/// Opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Straight-alpha RGBA8 with full opacity.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
