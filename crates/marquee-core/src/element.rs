#![forbid(unsafe_code)]

//! Display elements: one glyph run plus its placement on the strip.

use crate::geometry::Size;

/// A reusable glyph run.
///
/// At any instant an element is owned either by the [`crate::RecyclePool`]
/// (idle) or by the [`crate::VisibleQueue`] (active). Moving the value
/// between the two is what transfers ownership.
///
/// `x` is in content coordinates: the strip's scroll offset is subtracted
/// when the element is placed on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayElement<H> {
    handle: H,
    x: f64,
    size: Size,
    text_index: Option<usize>,
}

impl<H: Copy> DisplayElement<H> {
    /// Wrap a freshly created surface handle.
    pub fn new(handle: H) -> Self {
        Self {
            handle,
            x: 0.0,
            size: Size::ZERO,
            text_index: None,
        }
    }

    #[inline]
    pub fn handle(&self) -> H {
        self.handle
    }

    /// Leading (left) edge in content coordinates.
    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Trailing (right) edge in content coordinates.
    #[inline]
    pub fn trailing(&self) -> f64 {
        self.x + self.size.width
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.size.width
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Index into the text list of the text last assigned, if any.
    #[inline]
    pub fn text_index(&self) -> Option<usize> {
        self.text_index
    }

    /// Record a new text assignment and its measured size.
    pub(crate) fn assign(&mut self, text_index: usize, size: Size) {
        self.text_index = Some(text_index);
        self.size = size;
    }

    pub(crate) fn set_x(&mut self, x: f64) {
        self.x = x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_element_is_unassigned() {
        let el = DisplayElement::new(7u32);
        assert_eq!(el.handle(), 7);
        assert_eq!(el.text_index(), None);
        assert_eq!(el.width(), 0.0);
    }

    #[test]
    fn trailing_is_x_plus_width() {
        let mut el = DisplayElement::new(1u32);
        el.assign(3, Size::new(40.0, 12.0));
        el.set_x(100.0);
        assert_eq!(el.trailing(), 140.0);
        assert_eq!(el.text_index(), Some(3));
    }
}
