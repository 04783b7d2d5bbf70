#![forbid(unsafe_code)]

//! Capabilities the marquee consumes from its host.
//!
//! The engine never draws and never keeps time. A host supplies:
//!
//! 1. A [`TextSurface`] that can create, size, place, show, hide and destroy
//!    glyph runs ("display elements").
//! 2. A [`FrameClock`] that delivers ticks synchronized to display refresh.
//!    The clock hands out a [`TickId`]; when a subscription fires, the host
//!    calls [`crate::Marquee::on_tick`] with the elapsed time.
//!
//! The subscription never owns the widget. The id is the only link, and the
//! widget cancels it when dropped.

use crate::geometry::Size;
use crate::style::TextStyle;

/// Identifier of a tick subscription.
pub type TickId = u64;

/// A render surface that hosts glyph runs.
///
/// Handles are cheap copyable tokens. A handle stays valid until passed to
/// [`TextSurface::destroy`].
pub trait TextSurface {
    /// Token identifying one glyph run on this surface.
    type Handle: Copy + Eq + std::fmt::Debug;

    /// Create a detached glyph run styled with `style`.
    fn create_element(&mut self, style: &TextStyle) -> Self::Handle;

    /// Release a glyph run. The handle must not be used afterwards.
    fn destroy(&mut self, handle: Self::Handle);

    /// Assign `text` to the run and size it to fit. Returns the measured size.
    fn size_to_fit(&mut self, handle: Self::Handle, text: &str, style: &TextStyle) -> Size;

    /// Move the run's leading-top corner to viewport coordinates `(x, y)`.
    fn set_position(&mut self, handle: Self::Handle, x: f64, y: f64);

    /// Make the run part of the visible strip.
    fn attach(&mut self, handle: Self::Handle);

    /// Remove the run from the visible strip without destroying it.
    fn detach(&mut self, handle: Self::Handle);

    /// Restyle an existing run (font, color, background).
    fn apply_style(&mut self, handle: Self::Handle, style: &TextStyle);
}

/// A periodic tick source tied to display refresh.
///
/// A fresh subscription starts unpaused.
pub trait FrameClock {
    /// Register a new subscription.
    fn subscribe(&mut self) -> TickId;

    /// Cancel a subscription. No further ticks are delivered for `id`.
    fn unsubscribe(&mut self, id: TickId);

    /// Suspend or resume delivery for `id` without cancelling it.
    fn set_paused(&mut self, id: TickId, paused: bool);
}
