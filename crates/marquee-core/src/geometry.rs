#![forbid(unsafe_code)]

//! Geometric primitives.

/// Width and height of a viewport or a measured glyph run.
///
/// Units are whatever the host surface measures in (points, pixels, cells).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// A zero-sized extent.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Vertical origin that centres a box of `inner` height inside `self`.
    #[inline]
    pub fn center_y(&self, inner: Size) -> f64 {
        (self.height - inner.height) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_empty() {
        assert!(Size::ZERO.is_empty());
        assert!(Size::new(10.0, 0.0).is_empty());
        assert!(!Size::new(10.0, 1.0).is_empty());
    }

    #[test]
    fn center_y_splits_slack() {
        let viewport = Size::new(100.0, 30.0);
        assert_eq!(viewport.center_y(Size::new(40.0, 10.0)), 10.0);
    }

    #[test]
    fn center_y_goes_negative_for_tall_content() {
        let viewport = Size::new(100.0, 10.0);
        assert_eq!(viewport.center_y(Size::new(40.0, 20.0)), -5.0);
    }
}
