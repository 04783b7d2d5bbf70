#![forbid(unsafe_code)]

//! Style attributes carried by every glyph run.

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque color from red, green and blue.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Whether the color is fully transparent.
    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Family name the host maps to its platform UI font.
pub const SYSTEM_FONT_FAMILY: &str = "system";

/// A font request: family plus point size.
///
/// The core never interprets fonts; it hands them to the host surface when
/// sizing glyph runs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Font {
    pub family: String,
    pub size: f64,
}

impl Font {
    /// A font in the given family.
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// The host's system UI font at `size`.
    pub fn system(size: f64) -> Self {
        Self::new(SYSTEM_FONT_FAMILY, size)
    }

    /// Same family, different size.
    #[must_use]
    pub fn with_size(&self, size: f64) -> Self {
        Self::new(self.family.clone(), size)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::system(crate::config::DEFAULT_FONT_SIZE)
    }
}

/// Everything a surface needs to style one glyph run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextStyle {
    pub font: Font,
    pub color: Color,
    /// `None` leaves the run's background transparent.
    pub background: Option<Color>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_is_opaque() {
        let c = Color::rgb(1, 2, 3);
        assert_eq!(c.a, 255);
        assert!(!c.is_transparent());
        assert!(Color::rgba(1, 2, 3, 0).is_transparent());
    }

    #[test]
    fn default_font_is_system_15() {
        let font = Font::default();
        assert_eq!(font.family, SYSTEM_FONT_FAMILY);
        assert_eq!(font.size, 15.0);
    }

    #[test]
    fn with_size_keeps_family() {
        let font = Font::new("Menlo", 12.0).with_size(18.0);
        assert_eq!(font, Font::new("Menlo", 18.0));
    }

    #[test]
    fn default_style_is_black_on_transparent() {
        let style = TextStyle::default();
        assert_eq!(style.color, Color::BLACK);
        assert_eq!(style.background, None);
    }
}
