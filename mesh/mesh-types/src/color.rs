//! Canonical RGBA color for per-corner vertex paint.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RGBA color with normalized `f32` components.
///
/// This is the single canonical representation used by every color
/// comparison in the workspace. Components are expected in `[0, 1]`.
///
/// # Byte Conversion
///
/// Hosts that store 8-bit colors convert at the boundary:
///
/// - [`Color::from_bytes`] maps a byte `x` to `x / 255`.
/// - [`Color::to_bytes`] clamps to `[0, 1]` and maps to `round(x * 255)`.
///
/// The round trip `to_bytes(from_bytes(x)) == x` holds for every byte.
///
/// # Example
///
/// ```
/// use mesh_types::Color;
///
/// let orange = Color::from_bytes(255, 128, 0, 255);
/// assert_eq!(orange.to_bytes(), [255, 128, 0, 255]);
/// assert!((orange.g - 0.502).abs() < 0.001);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    /// Red component (0.0-1.0).
    pub r: f32,
    /// Green component (0.0-1.0).
    pub g: f32,
    /// Blue component (0.0-1.0).
    pub b: f32,
    /// Alpha component (0.0-1.0).
    pub a: f32,
}

impl Color {
    /// Create a color from normalized RGBA components.
    ///
    /// Components are stored as given; use [`Color::clamped`] to force them
    /// into range.
    #[inline]
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from normalized RGB components.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Color;
    ///
    /// let c = Color::from_rgb(1.0, 0.0, 0.0);
    /// assert_eq!(c, Color::RED);
    /// ```
    #[inline]
    #[must_use]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create a color from 8-bit RGBA components.
    #[inline]
    #[must_use]
    pub fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
            a: f32::from(a) / 255.0,
        }
    }

    /// Convert to 8-bit RGBA components.
    ///
    /// Values are clamped to `[0, 1]` first; NaN components map to 0.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    // Truncation and sign loss are safe: values are clamped to [0.0, 1.0] before * 255.0
    pub fn to_bytes(self) -> [u8; 4] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }

    /// Create a color from a `[r, g, b, a]` array.
    #[inline]
    #[must_use]
    pub const fn from_array([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }

    /// Components as a `[r, g, b, a]` array.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Bit patterns of the four components.
    ///
    /// Two colors with equal bits are exactly equal, which makes this a
    /// hashable key for deduplicating palettes. Note that `0.0` and `-0.0`
    /// have different bits.
    #[inline]
    #[must_use]
    pub fn to_bits(self) -> [u32; 4] {
        [
            self.r.to_bits(),
            self.g.to_bits(),
            self.b.to_bits(),
            self.a.to_bits(),
        ]
    }

    /// Copy of this color with every component clamped to `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    /// Check that every component is finite.
    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.to_array().iter().all(|c| c.is_finite())
    }

    /// Black color (0, 0, 0, 1).
    pub const BLACK: Self = Self::from_rgb(0.0, 0.0, 0.0);

    /// White color (1, 1, 1, 1).
    pub const WHITE: Self = Self::from_rgb(1.0, 1.0, 1.0);

    /// Red color (1, 0, 0, 1).
    pub const RED: Self = Self::from_rgb(1.0, 0.0, 0.0);

    /// Green color (0, 1, 0, 1).
    pub const GREEN: Self = Self::from_rgb(0.0, 1.0, 0.0);

    /// Blue color (0, 0, 1, 1).
    pub const BLUE: Self = Self::from_rgb(0.0, 0.0, 1.0);

    /// Fully transparent black (0, 0, 0, 0).
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 4]> for Color {
    fn from(value: [f32; 4]) -> Self {
        Self::from_array(value)
    }
}

impl From<Color> for [f32; 4] {
    fn from(value: Color) -> Self {
        value.to_array()
    }
}
