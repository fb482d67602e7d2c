//! Color equality under a tolerance policy.
//!
//! Every "is this the same color?" decision in the crate goes through
//! [`same_color`] (or [`ColorTolerance::matches`]), written against the
//! canonical normalized [`Color`] representation.

use hashbrown::HashSet;
use mesh_types::Color;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{PaintError, PaintResult};

/// Distance measure used by a [`ColorTolerance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColorMetric {
    /// Every component differs by at most `epsilon`.
    #[default]
    Componentwise,

    /// Squared RGBA distance divided by three is at most `epsilon`.
    ///
    /// This is the usual vertex-paint "similarity" slider; `0.005` is a
    /// good starting value.
    MeanSquared,
}

/// Tolerance policy for color equality.
///
/// The default is exact per-component equality. A positive epsilon absorbs
/// quantization and color-space conversion noise introduced upstream.
///
/// # Example
///
/// ```
/// use mesh_paint::{ColorTolerance, same_color};
/// use mesh_types::Color;
///
/// let a = Color::from_rgb(0.5, 0.5, 0.5);
/// let b = Color::from_rgb(0.5, 0.5, 0.503);
///
/// assert!(!same_color(a, b, &ColorTolerance::exact()));
/// assert!(same_color(a, b, &ColorTolerance::quantized()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColorTolerance {
    epsilon: f32,
    metric: ColorMetric,
}

impl Default for ColorTolerance {
    fn default() -> Self {
        Self::exact()
    }
}

impl ColorTolerance {
    /// Exact per-component equality.
    #[must_use]
    pub const fn exact() -> Self {
        Self {
            epsilon: 0.0,
            metric: ColorMetric::Componentwise,
        }
    }

    /// Componentwise bound of one 8-bit step (`1/255`).
    #[must_use]
    pub const fn quantized() -> Self {
        Self {
            epsilon: 1.0 / 255.0,
            metric: ColorMetric::Componentwise,
        }
    }

    /// Componentwise absolute-difference bound.
    ///
    /// # Errors
    ///
    /// Returns [`PaintError::InvalidTolerance`] if `epsilon` is negative or
    /// not finite.
    pub fn new(epsilon: f32) -> PaintResult<Self> {
        Self::with_metric(epsilon, ColorMetric::Componentwise)
    }

    /// Mean-squared distance bound.
    ///
    /// # Errors
    ///
    /// Returns [`PaintError::InvalidTolerance`] if `epsilon` is negative or
    /// not finite.
    pub fn mean_squared(epsilon: f32) -> PaintResult<Self> {
        Self::with_metric(epsilon, ColorMetric::MeanSquared)
    }

    /// Tolerance with an explicit metric.
    ///
    /// # Errors
    ///
    /// Returns [`PaintError::InvalidTolerance`] if `epsilon` is negative or
    /// not finite.
    pub fn with_metric(epsilon: f32, metric: ColorMetric) -> PaintResult<Self> {
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(PaintError::InvalidTolerance { epsilon });
        }
        Ok(Self { epsilon, metric })
    }

    /// The configured epsilon.
    #[must_use]
    pub const fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// The configured metric.
    #[must_use]
    pub const fn metric(&self) -> ColorMetric {
        self.metric
    }

    /// Check if this tolerance only accepts exact matches.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.epsilon <= 0.0
    }

    /// Check if two colors are the same under this tolerance.
    ///
    /// Symmetric, and reflexive for finite colors. Not transitive when the
    /// epsilon is nonzero: `a ~ b` and `b ~ c` do not imply `a ~ c`.
    #[must_use]
    pub fn matches(&self, a: Color, b: Color) -> bool {
        let a = a.to_array();
        let b = b.to_array();

        match self.metric {
            ColorMetric::Componentwise => a
                .iter()
                .zip(&b)
                .all(|(x, y)| (x - y).abs() <= self.epsilon),
            ColorMetric::MeanSquared => {
                let sum: f32 = a.iter().zip(&b).map(|(x, y)| (x - y) * (x - y)).sum();
                sum / 3.0 <= self.epsilon
            }
        }
    }
}

/// Check if two colors are the same under a tolerance.
///
/// Free-function form of [`ColorTolerance::matches`].
#[must_use]
pub fn same_color(a: Color, b: Color, tolerance: &ColorTolerance) -> bool {
    tolerance.matches(a, b)
}

/// A set of distinct reference colors.
///
/// Colors are deduplicated by exact bit pattern. Matching against the
/// palette is "any-match": a sample matches if it is the same color as at
/// least one palette entry.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    colors: Vec<Color>,
    seen: HashSet<[u32; 4]>,
}

impl Palette {
    /// Create an empty palette.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a color; returns `false` if it was already present.
    pub fn insert(&mut self, color: Color) -> bool {
        if self.seen.insert(color.to_bits()) {
            self.colors.push(color);
            true
        } else {
            false
        }
    }

    /// The distinct colors in insertion order.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Number of distinct colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if the palette is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Check if `color` matches any palette entry.
    #[must_use]
    pub fn matches(&self, color: Color, tolerance: &ColorTolerance) -> bool {
        self.colors.iter().any(|&c| tolerance.matches(c, color))
    }

    /// Check if two samples on either side of a seam both match the palette
    /// and each other.
    ///
    /// A traversal may only cross between samples that pass this check, so
    /// it never steps across a boundary between two palette colors.
    #[must_use]
    pub fn matches_pair(&self, a: Color, b: Color, tolerance: &ColorTolerance) -> bool {
        tolerance.matches(a, b) && self.matches(a, tolerance) && self.matches(b, tolerance)
    }
}

impl FromIterator<Color> for Palette {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        let mut palette = Self::new();
        for color in iter {
            palette.insert(color);
        }
        palette
    }
}
