#![forbid(unsafe_code)]

//! Marquee configuration.
//!
//! [`MarqueeConfig`] groups every tunable of a marquee. Defaults match the
//! classic widget: 50 units of spacing, 50 units per second, system font at
//! 15 points, black text on a transparent background.
//!
//! `text_spacing`, `scroll_speed` and `font` are locked while the marquee is
//! running or paused; colors may change at any time.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MarqueeError, Property};
use crate::style::{Color, Font, TextStyle};

pub const DEFAULT_TEXT_SPACING: f64 = 50.0;
pub const DEFAULT_SCROLL_SPEED: f64 = 50.0;
pub const DEFAULT_FONT_SIZE: f64 = 15.0;

/// Tunables for one marquee.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MarqueeConfig {
    /// Gap between the trailing edge of one run and the next.
    pub text_spacing: f64,
    /// Leftward travel in surface units per second.
    pub scroll_speed: f64,
    pub font: Font,
    pub text_color: Color,
    pub background_color: Option<Color>,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            text_spacing: DEFAULT_TEXT_SPACING,
            scroll_speed: DEFAULT_SCROLL_SPEED,
            font: Font::default(),
            text_color: Color::BLACK,
            background_color: None,
        }
    }
}

impl MarqueeConfig {
    #[must_use]
    pub fn with_text_spacing(mut self, spacing: f64) -> Self {
        self.text_spacing = spacing;
        self
    }

    #[must_use]
    pub fn with_scroll_speed(mut self, speed: f64) -> Self {
        self.scroll_speed = speed;
        self
    }

    #[must_use]
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    #[must_use]
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    #[must_use]
    pub fn with_background_color(mut self, color: Option<Color>) -> Self {
        self.background_color = color;
        self
    }

    /// Style handed to the surface for every glyph run.
    pub fn text_style(&self) -> TextStyle {
        TextStyle {
            font: self.font.clone(),
            color: self.text_color,
            background: self.background_color,
        }
    }

    /// Whether the fields locked outside `stopped` differ from `other`.
    pub(crate) fn locked_fields_differ(&self, other: &Self) -> Option<Property> {
        if self.text_spacing != other.text_spacing {
            Some(Property::TextSpacing)
        } else if self.scroll_speed != other.scroll_speed {
            Some(Property::ScrollSpeed)
        } else if self.font != other.font {
            Some(Property::Font)
        } else {
            None
        }
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        [
            check_spacing(self.text_spacing).err(),
            check_speed(self.scroll_speed).err(),
            check_font(&self.font).err(),
        ]
        .into_iter()
        .flatten()
        .map(|err| err.to_string())
        .collect()
    }

    /// Load from a JSON string. Missing fields take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

/// Spacing must be finite and non-negative.
pub(crate) fn check_spacing(value: f64) -> Result<f64, MarqueeError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(MarqueeError::InvalidValue {
            property: Property::TextSpacing,
            value,
        })
    }
}

/// Speed must be finite and non-negative. Zero freezes the strip in place.
pub(crate) fn check_speed(value: f64) -> Result<f64, MarqueeError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(MarqueeError::InvalidValue {
            property: Property::ScrollSpeed,
            value,
        })
    }
}

pub(crate) fn check_font(font: &Font) -> Result<(), MarqueeError> {
    if font.size.is_finite() && font.size > 0.0 {
        Ok(())
    } else {
        Err(MarqueeError::InvalidValue {
            property: Property::Font,
            value: font.size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_widget() {
        let config = MarqueeConfig::default();
        assert_eq!(config.text_spacing, 50.0);
        assert_eq!(config.scroll_speed, 50.0);
        assert_eq!(config.font, Font::system(15.0));
        assert_eq!(config.text_color, Color::BLACK);
        assert_eq!(config.background_color, None);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn validate_reports_every_problem() {
        let config = MarqueeConfig::default()
            .with_text_spacing(-1.0)
            .with_scroll_speed(f64::NAN)
            .with_font(Font::system(0.0));
        let problems = config.validate();
        assert_eq!(problems.len(), 3, "{problems:?}");
        assert!(problems[0].contains("text_spacing"));
        assert!(problems[1].contains("scroll_speed"));
        assert!(problems[2].contains("font"));
    }

    #[test]
    fn zero_spacing_and_speed_are_allowed() {
        let config = MarqueeConfig::default()
            .with_text_spacing(0.0)
            .with_scroll_speed(0.0);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn locked_fields_ignore_colors() {
        let base = MarqueeConfig::default();
        let recolored = base
            .clone()
            .with_text_color(Color::WHITE)
            .with_background_color(Some(Color::BLACK));
        assert_eq!(base.locked_fields_differ(&recolored), None);

        let faster = base.clone().with_scroll_speed(80.0);
        assert_eq!(
            base.locked_fields_differ(&faster),
            Some(Property::ScrollSpeed)
        );
    }

    #[test]
    fn text_style_mirrors_config() {
        let config = MarqueeConfig::default()
            .with_text_color(Color::rgb(200, 0, 0))
            .with_background_color(Some(Color::WHITE));
        let style = config.text_style();
        assert_eq!(style.color, Color::rgb(200, 0, 0));
        assert_eq!(style.background, Some(Color::WHITE));
        assert_eq!(style.font, config.font);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config = MarqueeConfig::from_json_str(r#"{"scroll_speed": 120.0}"#).unwrap();
        assert_eq!(config.scroll_speed, 120.0);
        assert_eq!(config.text_spacing, DEFAULT_TEXT_SPACING);
    }
}
