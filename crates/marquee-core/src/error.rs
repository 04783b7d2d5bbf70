#![forbid(unsafe_code)]

//! Errors raised by marquee configuration.
//!
//! The only failure domain is caller misuse. Locked-property violations are
//! precondition failures: the panicking setters on [`crate::Marquee`] raise
//! them with this type's message, and the `try_set_*` variants return them.

use crate::lifecycle::RunState;

/// A configurable property of the marquee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    TextSpacing,
    ScrollSpeed,
    Font,
}

impl Property {
    /// Name used in messages and log fields.
    pub const fn name(self) -> &'static str {
        match self {
            Self::TextSpacing => "text_spacing",
            Self::ScrollSpeed => "scroll_speed",
            Self::Font => "font",
        }
    }
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors from mutating marquee configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum MarqueeError {
    /// The property can only change while the marquee is stopped.
    PropertyLocked { property: Property, state: RunState },
    /// The value is out of range (negative, zero where not allowed, NaN).
    InvalidValue { property: Property, value: f64 },
    /// A whole configuration failed validation.
    InvalidConfig(Vec<String>),
}

impl std::fmt::Display for MarqueeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PropertyLocked { property, state } => write!(
                f,
                "{property} can only be changed while stopped (state is {state}); call stop() first"
            ),
            Self::InvalidValue { property, value } => {
                write!(f, "invalid value for {property}: {value}")
            }
            Self::InvalidConfig(problems) => {
                write!(f, "invalid marquee config: {}", problems.join("; "))
            }
        }
    }
}

impl std::error::Error for MarqueeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_message_names_property_and_state() {
        let err = MarqueeError::PropertyLocked {
            property: Property::ScrollSpeed,
            state: RunState::Paused,
        };
        let msg = err.to_string();
        assert!(msg.contains("scroll_speed"), "{msg}");
        assert!(msg.contains("paused"), "{msg}");
    }

    #[test]
    fn invalid_config_joins_problems() {
        let err = MarqueeError::InvalidConfig(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "invalid marquee config: a; b");
    }
}
